//! Drawing surface abstraction and the per-frame label draw sequence.

use super::color::Color;
use super::layout::{self, PanelLayout, PanelStyle};
use crate::overlay::AnimationSample;
use crate::util::{Point, Rect, Size};

/// Primitive drawing operations a render backend provides.
///
/// Implemented by the Cairo/Pango backend and by recording doubles in tests.
pub trait DrawingSurface {
    /// Backend font handle produced by [`DrawingSurface::create_font`].
    type Font;
    type Error;

    /// Clears the whole surface to transparent.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Creates a font at the given point size.
    fn create_font(&mut self, descriptor: &super::FontDescriptor, size: f64) -> Self::Font;

    /// Measures `text` set in `font`.
    fn measure_text(&mut self, font: &Self::Font, text: &str) -> Size;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error>;

    fn stroke_rect(&mut self, rect: Rect, thickness: f64, color: Color) -> Result<(), Self::Error>;

    /// Draws `text` with its top-left corner at `origin`.
    fn draw_text(
        &mut self,
        font: &Self::Font,
        origin: Point,
        color: Color,
        text: &str,
    ) -> Result<(), Self::Error>;
}

/// Draws one frame of the overlay.
///
/// The surface is always cleared. When the sample is visible and `label` is
/// non-empty the panel, optional border and text follow, in that order.
/// Returns the layout that was drawn, if any.
pub fn render_overlay<S: DrawingSurface>(
    surface: &mut S,
    label: Option<&str>,
    sample: &AnimationSample,
    style: &PanelStyle,
    viewport: Size,
) -> Result<Option<PanelLayout>, S::Error> {
    surface.clear()?;

    let text = match label {
        Some(text) if sample.visible && !text.is_empty() => text,
        _ => return Ok(None),
    };

    let font = surface.create_font(&style.font, style.scaled_font_size(sample));
    let extent = surface.measure_text(&font, text);
    let placed = layout::layout(sample, extent, viewport.center(), style);

    surface.fill_rect(placed.panel, placed.panel_color)?;
    if let Some(border) = placed.border {
        surface.stroke_rect(border, style.border_thickness, placed.text_color)?;
    }
    surface.draw_text(&font, placed.text_origin, placed.text_color, text)?;

    Ok(Some(placed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::FontDescriptor;
    use crate::overlay::OverlayPhase;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        CreateFont(f64),
        Measure(String),
        Fill(Rect),
        Stroke(Rect, f64),
        Text(Point, String),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl DrawingSurface for RecordingSurface {
        type Font = f64;
        type Error = std::convert::Infallible;

        fn clear(&mut self) -> Result<(), Self::Error> {
            self.calls.push(Call::Clear);
            Ok(())
        }

        fn create_font(&mut self, _descriptor: &FontDescriptor, size: f64) -> f64 {
            self.calls.push(Call::CreateFont(size));
            size
        }

        fn measure_text(&mut self, font: &f64, text: &str) -> Size {
            self.calls.push(Call::Measure(text.to_string()));
            // Fixed-advance font: half an em per character.
            Size::new(text.chars().count() as f64 * font / 2.0, *font)
        }

        fn fill_rect(&mut self, rect: Rect, _color: Color) -> Result<(), Self::Error> {
            self.calls.push(Call::Fill(rect));
            Ok(())
        }

        fn stroke_rect(
            &mut self,
            rect: Rect,
            thickness: f64,
            _color: Color,
        ) -> Result<(), Self::Error> {
            self.calls.push(Call::Stroke(rect, thickness));
            Ok(())
        }

        fn draw_text(
            &mut self,
            _font: &f64,
            origin: Point,
            _color: Color,
            text: &str,
        ) -> Result<(), Self::Error> {
            self.calls.push(Call::Text(origin, text.to_string()));
            Ok(())
        }
    }

    fn visible(scale: f64) -> AnimationSample {
        AnimationSample {
            phase: OverlayPhase::Pressed,
            scale,
            alpha: 1.0,
            visible: true,
        }
    }

    #[test]
    fn draws_in_fixed_order() {
        let mut surface = RecordingSurface::default();
        let style = PanelStyle::default();
        let drawn = render_overlay(
            &mut surface,
            Some("CTRL + S"),
            &visible(1.0),
            &style,
            Size::new(1000.0, 200.0),
        )
        .unwrap()
        .expect("label should be drawn");

        // 8 chars * 25px wide, 50px tall, centered at (500, 100)
        assert_eq!(drawn.text_box, Rect::new(400.0, 75.0, 200.0, 50.0));
        assert_eq!(
            surface.calls,
            vec![
                Call::Clear,
                Call::CreateFont(50.0),
                Call::Measure("CTRL + S".into()),
                Call::Fill(Rect::new(380.0, 65.0, 240.0, 70.0)),
                Call::Stroke(Rect::new(377.0, 62.0, 246.0, 76.0), 6.0),
                Call::Text(Point::new(400.0, 75.0), "CTRL + S".into()),
            ]
        );
    }

    #[test]
    fn font_size_follows_pop_in() {
        let mut surface = RecordingSurface::default();
        render_overlay(
            &mut surface,
            Some("A"),
            &visible(1.2),
            &PanelStyle::default(),
            Size::new(100.0, 100.0),
        )
        .unwrap();

        match surface.calls[1] {
            Call::CreateFont(size) => assert!((size - 60.0).abs() < 1e-9),
            ref other => panic!("expected font creation, got {other:?}"),
        }
    }

    #[test]
    fn border_is_skipped_when_disabled() {
        let mut surface = RecordingSurface::default();
        let style = PanelStyle {
            border_thickness: 0.0,
            ..PanelStyle::default()
        };
        render_overlay(
            &mut surface,
            Some("A"),
            &visible(1.0),
            &style,
            Size::new(100.0, 100.0),
        )
        .unwrap();

        assert!(!surface.calls.iter().any(|c| matches!(c, Call::Stroke(..))));
        assert!(matches!(surface.calls.last(), Some(Call::Text(..))));
    }

    #[test]
    fn hidden_sample_only_clears() {
        let mut surface = RecordingSurface::default();
        let drawn = render_overlay(
            &mut surface,
            Some("A"),
            &AnimationSample::HIDDEN,
            &PanelStyle::default(),
            Size::new(100.0, 100.0),
        )
        .unwrap();

        assert!(drawn.is_none());
        assert_eq!(surface.calls, vec![Call::Clear]);
    }

    #[test]
    fn missing_label_only_clears() {
        let mut surface = RecordingSurface::default();
        render_overlay(
            &mut surface,
            None,
            &visible(1.0),
            &PanelStyle::default(),
            Size::new(100.0, 100.0),
        )
        .unwrap();
        assert_eq!(surface.calls, vec![Call::Clear]);
    }
}
