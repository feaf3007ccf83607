use cairo::{Context, Format, ImageSurface};
use keyshow::draw::{CairoSurface, Color, PanelLayout, PanelStyle, render_overlay};
use keyshow::overlay::{AnimationSample, AnimationTiming, OverlayPhase, OverlayState, Transition};
use keyshow::util::Size;
use std::time::{Duration, Instant};

const WIDTH: i32 = 1000;
const HEIGHT: i32 = 200;

fn render(
    surface: &ImageSurface,
    label: Option<&str>,
    sample: &AnimationSample,
) -> Option<PanelLayout> {
    render_styled(surface, label, sample, &PanelStyle::default())
}

fn render_styled(
    surface: &ImageSurface,
    label: Option<&str>,
    sample: &AnimationSample,
    style: &PanelStyle,
) -> Option<PanelLayout> {
    let ctx = Context::new(surface).unwrap();
    let drawn = render_overlay(
        &mut CairoSurface::new(&ctx),
        label,
        sample,
        style,
        Size::new(f64::from(WIDTH), f64::from(HEIGHT)),
    )
    .unwrap();
    drop(ctx);
    surface.flush();
    drawn
}

/// Returns premultiplied (r, g, b, a) bytes at a pixel.
fn pixel(surface: &mut ImageSurface, x: f64, y: f64) -> (u8, u8, u8, u8) {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y as usize * stride + x as usize * 4;
    // ARgb32 is native-endian; little-endian byte order is B, G, R, A
    (
        data[offset + 2],
        data[offset + 1],
        data[offset],
        data[offset + 3],
    )
}

fn visible(alpha: f64) -> AnimationSample {
    AnimationSample {
        phase: OverlayPhase::Releasing,
        scale: 1.0,
        alpha,
        visible: true,
    }
}

#[test]
fn visible_label_paints_panel_and_border() {
    let mut surface = ImageSurface::create(Format::ARgb32, WIDTH, HEIGHT).unwrap();
    let layout = render(&surface, Some("CTRL + S"), &visible(1.0)).expect("label drawn");

    assert!(layout.text_box.width > 0.0);
    let center_y = layout.panel.center().y;

    // Inside the panel padding, clear of the border stroke: gray at 85%
    let (r, g, b, a) = pixel(&mut surface, layout.panel.x + 8.0, center_y);
    assert!((a as i32 - 217).abs() <= 2, "panel alpha was {a}");
    assert!((r as i32 - 130).abs() <= 2, "panel red was {r}");
    assert_eq!((r, g), (g, b));

    // Middle of the border stroke: opaque black
    let border = layout.border.expect("default style has a border");
    let (r, g, b, a) = pixel(&mut surface, border.x, center_y);
    assert_eq!((r, g, b), (0, 0, 0));
    assert!(a >= 250, "border alpha was {a}");

    // Outside everything: untouched
    assert_eq!(pixel(&mut surface, 1.0, 1.0), (0, 0, 0, 0));
}

#[test]
fn fading_label_scales_panel_alpha() {
    let mut surface = ImageSurface::create(Format::ARgb32, WIDTH, HEIGHT).unwrap();
    let layout = render(&surface, Some("A"), &visible(0.5)).expect("label drawn");

    let (_, _, _, a) = pixel(&mut surface, layout.panel.x + 8.0, layout.panel.center().y);
    assert!((a as i32 - 108).abs() <= 2, "faded panel alpha was {a}");
}

#[test]
fn text_edges_stay_neutral_gray() {
    let style = PanelStyle {
        text_color: Color::new(1.0, 1.0, 1.0, 1.0),
        ..PanelStyle::default()
    };
    let mut surface = ImageSurface::create(Format::ARgb32, WIDTH, HEIGHT).unwrap();
    let layout = render_styled(&surface, Some("W"), &visible(1.0), &style).expect("label drawn");

    // White glyphs over a gray panel: any colored pixel is a subpixel fringe
    let text = layout.text_box;
    let mut lit = 0;
    for y in (text.y as i32 + 1)..(text.bottom() as i32 - 1) {
        for x in (text.x as i32 + 1)..(text.right() as i32 - 1) {
            let (r, g, b, _) = pixel(&mut surface, f64::from(x), f64::from(y));
            assert!(r == g && g == b, "fringe at ({x}, {y}): {:?}", (r, g, b));
            if r > 200 {
                lit += 1;
            }
        }
    }
    assert!(lit > 0, "no glyph pixels found");
}

#[test]
fn hidden_sample_clears_previous_frame() {
    let mut surface = ImageSurface::create(Format::ARgb32, WIDTH, HEIGHT).unwrap();
    let layout = render(&surface, Some("A"), &visible(1.0)).expect("label drawn");
    let probe = (layout.panel.x + 8.0, layout.panel.center().y);
    assert_ne!(pixel(&mut surface, probe.0, probe.1).3, 0);

    assert!(render(&surface, Some("A"), &AnimationSample::HIDDEN).is_none());
    assert_eq!(pixel(&mut surface, probe.0, probe.1), (0, 0, 0, 0));
}

#[test]
fn expired_label_renders_nothing() {
    let start = Instant::now();
    let mut state = OverlayState::new(start);
    state.apply(Transition::KeyDown {
        label: "ESC".into(),
        at: start,
    });
    state.apply(Transition::KeyUp { at: start });

    let sample = state.sample(start + Duration::from_millis(2100), &AnimationTiming::default());
    let surface = ImageSurface::create(Format::ARgb32, WIDTH, HEIGHT).unwrap();
    assert!(render(&surface, state.label(), &sample).is_none());
}
