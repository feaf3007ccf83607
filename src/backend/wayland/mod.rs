//! wlr-layer-shell overlay backend.

mod backend;
mod handlers;
mod keymap;
mod state;
mod surface;

pub use backend::WaylandBackend;
