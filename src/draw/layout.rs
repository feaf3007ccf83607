//! Panel geometry for the current animation sample.

use super::color::Color;
use super::font::FontDescriptor;
use crate::overlay::AnimationSample;
use crate::util::{Point, Rect, Size};

/// Resolved appearance of the label panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStyle {
    pub font: FontDescriptor,
    /// Resting font size in points, before the pop-in scale.
    pub font_size: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    /// Border stroke width; zero disables the border.
    pub border_thickness: f64,
    pub panel_color: Color,
    pub text_color: Color,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            font: FontDescriptor::default(),
            font_size: 50.0,
            padding_x: 20.0,
            padding_y: 10.0,
            border_thickness: 6.0,
            panel_color: super::color::PANEL_GRAY,
            text_color: super::color::BLACK,
        }
    }
}

impl PanelStyle {
    /// Font size for a sample, scaled with the pop-in.
    pub fn scaled_font_size(&self, sample: &AnimationSample) -> f64 {
        self.font_size * sample.scale
    }
}

/// Everything needed to draw one frame of the label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// Top-left corner where the text is drawn.
    pub text_origin: Point,
    /// Measured text box centered in the viewport.
    pub text_box: Rect,
    /// Filled background panel.
    pub panel: Rect,
    /// Rectangle stroked as the border, if one is configured.
    pub border: Option<Rect>,
    pub panel_color: Color,
    pub text_color: Color,
}

/// Lays out the panel around text of `text_extent` centered at `viewport_center`.
///
/// Padding grows with the sample's scale so the panel pops together with the
/// font. The border sits half its thickness outside the panel so the stroke
/// lands entirely outside the fill.
pub fn layout(
    sample: &AnimationSample,
    text_extent: Size,
    viewport_center: Point,
    style: &PanelStyle,
) -> PanelLayout {
    let text_box = Rect::centered_at(viewport_center, text_extent);
    let panel = text_box.inflate(style.padding_x * sample.scale, style.padding_y * sample.scale);
    let border = (style.border_thickness > 0.0).then(|| {
        let half = style.border_thickness / 2.0;
        panel.inflate(half, half)
    });

    PanelLayout {
        text_origin: text_box.origin(),
        text_box,
        panel,
        border,
        panel_color: style.panel_color.fade(sample.alpha),
        text_color: style.text_color.fade(sample.alpha),
    }
}
