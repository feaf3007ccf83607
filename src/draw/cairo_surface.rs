//! Cairo and Pango implementation of [`DrawingSurface`].

use super::color::Color;
use super::font::FontDescriptor;
use super::surface::DrawingSurface;
use crate::util::{Point, Rect, Size};

/// Draws onto any Cairo context, typically one wrapping a shared-memory buffer.
pub struct CairoSurface {
    ctx: cairo::Context,
}

impl CairoSurface {
    pub fn new(ctx: &cairo::Context) -> Self {
        Self { ctx: ctx.clone() }
    }

    fn text_layout(&self, font: &pango::FontDescription, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.ctx);
        layout.set_font_description(Some(font));
        layout.set_text(text);
        layout
    }

    fn set_source(&self, color: Color) {
        self.ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }
}

impl DrawingSurface for CairoSurface {
    type Font = pango::FontDescription;
    type Error = cairo::Error;

    fn clear(&mut self) -> Result<(), cairo::Error> {
        self.ctx.save()?;
        self.ctx.set_operator(cairo::Operator::Clear);
        let painted = self.ctx.paint();
        self.ctx.restore()?;
        painted
    }

    fn create_font(&mut self, descriptor: &FontDescriptor, size: f64) -> pango::FontDescription {
        pango::FontDescription::from_string(&descriptor.to_pango_string(size))
    }

    fn measure_text(&mut self, font: &pango::FontDescription, text: &str) -> Size {
        let (_ink, logical) = self.text_layout(font, text).extents();
        let scale = f64::from(pango::SCALE);
        Size::new(
            f64::from(logical.width()) / scale,
            f64::from(logical.height()) / scale,
        )
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), cairo::Error> {
        self.set_source(color);
        self.ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.ctx.fill()
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        thickness: f64,
        color: Color,
    ) -> Result<(), cairo::Error> {
        self.set_source(color);
        self.ctx.set_line_width(thickness);
        self.ctx.set_line_join(cairo::LineJoin::Miter);
        self.ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.ctx.stroke()
    }

    fn draw_text(
        &mut self,
        font: &pango::FontDescription,
        origin: Point,
        color: Color,
        text: &str,
    ) -> Result<(), cairo::Error> {
        // Gray antialiasing: subpixel rendering fringes on a translucent surface.
        // Glyphs follow the font options, not the context antialias mode.
        let mut options = cairo::FontOptions::new()?;
        options.set_antialias(cairo::Antialias::Gray);
        self.ctx.save()?;
        self.ctx.set_font_options(&options);
        self.ctx.set_antialias(cairo::Antialias::Gray);
        let layout = self.text_layout(font, text);
        self.set_source(color);
        self.ctx.move_to(origin.x, origin.y);
        pangocairo::functions::show_layout(&self.ctx, &layout);
        self.ctx.restore()
    }
}
