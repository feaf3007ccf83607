//! Layer-surface sizing, frame pacing and shared memory buffers for the overlay.

use anyhow::{Context, Result};
use log::info;
use smithay_client_toolkit::{
    shell::wlr_layer::LayerSurface,
    shm::{Shm, slot::SlotPool},
};

/// What a frame tick should do with the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDecision {
    /// Render a new buffer
    Draw,
    /// Nothing visible and the surface is already clear
    Idle,
    /// The compositor has not sent the initial configure yet
    Unconfigured,
    /// The previous frame has not been presented yet
    Throttled,
}

/// Tracks the overlay layer surface, its buffer pool and frame pacing.
pub struct SurfaceState {
    layer_surface: Option<LayerSurface>,
    pool: Option<SlotPool>,
    width: u32,
    height: u32,
    configured: bool,
    frame_callback_pending: bool,
    /// Whether the last committed buffer shows a label.
    has_content: bool,
}

impl SurfaceState {
    /// Creates a new, unconfigured surface state.
    pub fn new() -> Self {
        Self {
            layer_surface: None,
            pool: None,
            width: 0,
            height: 0,
            configured: false,
            frame_callback_pending: false,
            has_content: false,
        }
    }

    /// Assigns the layer surface produced during startup.
    pub fn set_layer_surface(&mut self, surface: LayerSurface) {
        self.layer_surface = Some(surface);
    }

    /// Returns the current layer surface, if initialized.
    pub fn layer_surface(&self) -> Option<&LayerSurface> {
        self.layer_surface.as_ref()
    }

    /// Updates the surface dimensions, returning `true` if the size changed.
    ///
    /// When the size changes, any existing buffer pool becomes invalid and is dropped.
    pub fn update_dimensions(&mut self, width: u32, height: u32) -> bool {
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        if changed {
            self.pool = None;
        }
        changed
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Marks the surface as configured by the compositor.
    pub fn set_configured(&mut self, configured: bool) {
        self.configured = configured;
    }

    pub fn set_frame_callback_pending(&mut self, pending: bool) {
        self.frame_callback_pending = pending;
    }

    /// Records whether the last committed frame showed a label.
    pub fn set_has_content(&mut self, has_content: bool) {
        self.has_content = has_content;
    }

    /// Decides whether a tick renders.
    ///
    /// A visible label is redrawn every tick; once it disappears exactly one
    /// more frame is drawn to clear the buffer. With vsync, ticks wait for the
    /// compositor's frame callback.
    pub fn frame_decision(&self, visible: bool, vsync: bool) -> FrameDecision {
        if !self.configured || self.width == 0 || self.height == 0 {
            FrameDecision::Unconfigured
        } else if !visible && !self.has_content {
            FrameDecision::Idle
        } else if vsync && self.frame_callback_pending {
            FrameDecision::Throttled
        } else {
            FrameDecision::Draw
        }
    }

    /// Ensures a shared memory pool of the appropriate size exists.
    pub fn ensure_pool(&mut self, shm: &Shm, buffer_count: usize) -> Result<&mut SlotPool> {
        if self.pool.is_none() {
            let buffer_size = (self.width * self.height * 4) as usize;
            let pool_size = buffer_size * buffer_count;
            info!(
                "Creating new SlotPool ({}x{}, {} bytes, {} buffers)",
                self.width, self.height, pool_size, buffer_count
            );
            let pool = SlotPool::new(pool_size, shm).context("Failed to create slot pool")?;
            self.pool = Some(pool);
        }

        self.pool
            .as_mut()
            .context("Buffer pool not initialized despite previous check")
    }
}
