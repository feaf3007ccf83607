// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules; renders overlay snapshots into shared-memory buffers.
use std::time::Instant;

use anyhow::{Context, Result};
use log::debug;
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{WaylandSurface, wlr_layer::LayerShell},
    shm::Shm,
};
use tokio::sync::watch;
use wayland_client::{QueueHandle, protocol::wl_shm};

use crate::{
    config::Config,
    draw::{CairoSurface, PanelStyle, render_overlay},
    input::Modifiers,
    overlay::{AnimationSample, AnimationTiming, OverlayHandle, OverlayState},
    shutdown::ExitFlag,
    util::Size,
};

use super::surface::{FrameDecision, SurfaceState};

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    // Surface and buffer management
    pub(super) surface: SurfaceState,

    // Configuration resolved once at startup
    pub(super) config: Config,
    pub(super) style: PanelStyle,
    pub(super) timing: AnimationTiming,

    // Overlay producer handle and the published snapshots
    pub(super) overlay: OverlayHandle,
    pub(super) snapshots: watch::Receiver<OverlayState>,

    /// Modifier state last reported by the seat.
    pub(super) modifiers: Modifiers,
    pub(super) exit: ExitFlag,
    /// Set by the frame timer, consumed by the main loop.
    pub(super) frame_due: bool,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        config: Config,
        overlay: OverlayHandle,
        snapshots: watch::Receiver<OverlayState>,
        exit: ExitFlag,
    ) -> Self {
        let style = config.style.panel_style();
        let timing = config.animation.timing();
        Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface: SurfaceState::new(),
            config,
            style,
            timing,
            overlay,
            snapshots,
            modifiers: Modifiers::default(),
            exit,
            frame_due: false,
        }
    }

    /// Size of the first advertised output, in logical pixels.
    pub(super) fn desktop_size(&self) -> Option<(i32, i32)> {
        let output = self.output_state.outputs().next()?;
        let info = self.output_state.info(&output)?;
        info.logical_size.or_else(|| {
            info.modes
                .iter()
                .find(|mode| mode.current)
                .map(|mode| mode.dimensions)
        })
    }

    /// Samples the latest snapshot and renders a frame if one is needed.
    ///
    /// Returns whether a buffer was committed.
    pub(super) fn draw_frame(&mut self, qh: &QueueHandle<Self>) -> Result<bool> {
        let snapshot = self.snapshots.borrow().clone();
        let sample = snapshot.sample(Instant::now(), &self.timing);

        match self
            .surface
            .frame_decision(sample.visible, self.config.performance.enable_vsync)
        {
            FrameDecision::Draw => {}
            FrameDecision::Throttled => {
                debug!("Skipping frame - frame callback already pending");
                return Ok(false);
            }
            FrameDecision::Idle | FrameDecision::Unconfigured => return Ok(false),
        }

        self.render(qh, snapshot.label(), &sample)?;
        self.surface.set_has_content(sample.visible);
        if self.config.performance.enable_vsync {
            self.surface.set_frame_callback_pending(true);
        }
        Ok(true)
    }

    fn render(
        &mut self,
        qh: &QueueHandle<Self>,
        label: Option<&str>,
        sample: &AnimationSample,
    ) -> Result<()> {
        debug!(
            "Rendering {:?} (scale {:.3}, alpha {:.3}, {:?})",
            label, sample.scale, sample.alpha, sample.phase
        );
        let buffer_count = self.config.performance.buffer_count as usize;
        let width = self.surface.width();
        let height = self.surface.height();

        let (buffer, canvas) = {
            let pool = self.surface.ensure_pool(&self.shm, buffer_count)?;
            pool.create_buffer(
                width as i32,
                height as i32,
                (width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?
        };

        // SAFETY: This unsafe block creates a Cairo surface from raw memory buffer.
        // Safety invariants that must be maintained:
        // 1. `canvas` is a valid mutable slice from SlotPool with exactly (width * height * 4) bytes
        // 2. The buffer format ARgb32 matches the allocation (4 bytes per pixel)
        // 3. The stride (width * 4) correctly represents the number of bytes per row
        // 4. `cairo_surface` and `ctx` are dropped before the buffer is committed to Wayland
        // 5. No other references to this memory exist during Cairo's usage
        let cairo_surface = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                canvas.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )
            .context("Failed to create Cairo surface")?
        };
        let ctx = cairo::Context::new(&cairo_surface).context("Failed to create Cairo context")?;

        let viewport = Size::new(f64::from(width), f64::from(height));
        render_overlay(
            &mut CairoSurface::new(&ctx),
            label,
            sample,
            &self.style,
            viewport,
        )
        .context("Failed to draw overlay")?;

        cairo_surface.flush();
        drop(ctx);
        drop(cairo_surface);

        let wl_surface = self
            .surface
            .layer_surface()
            .context("Layer surface not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(0, 0, width as i32, height as i32);

        if self.config.performance.enable_vsync {
            wl_surface.frame(qh, wl_surface.clone());
        }

        wl_surface.commit();
        Ok(())
    }
}
