//! Label rendering (Cairo-based).
//!
//! - [`Color`]: RGBA color with alpha fading
//! - [`layout`]: panel geometry for an animation sample
//! - [`DrawingSurface`]: primitive drawing operations, with [`render_overlay`]
//!   issuing them in a fixed order
//! - [`CairoSurface`]: the Cairo/Pango surface used by the Wayland backend

pub mod cairo_surface;
pub mod color;
pub mod font;
pub mod layout;
pub mod surface;

pub use cairo_surface::CairoSurface;
pub use color::Color;
pub use font::FontDescriptor;
pub use layout::{PanelLayout, PanelStyle};
pub use surface::{DrawingSurface, render_overlay};
