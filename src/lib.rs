//! On-screen keystroke overlay for Wayland compositors.
//!
//! Key events flow from an input source (the Wayland seat or the line-based
//! event feed) through the [`input::LabelFormatter`] into the
//! [`overlay::OverlayHub`], whose published snapshots the render loop samples
//! every frame and draws with [`draw::render_overlay`].

pub mod backend;
pub mod config;
pub mod draw;
pub mod input;
pub mod overlay;
pub mod placement;
pub mod shutdown;
pub mod util;

pub use config::Config;
