// Coordinates backend startup/shutdown and drives the event loop while delegating
// rendering & protocol state to `WaylandState` and its handler modules.
use anyhow::{Context, Result, anyhow};
use calloop::{
    EventLoop,
    timer::{TimeoutAction, Timer},
};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::{CompositorState, Region},
    output::OutputState,
    reexports::calloop_wayland_source::WaylandSource,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{Anchor, Layer, LayerShell},
    },
    shm::Shm,
};
use tokio::sync::watch;
use wayland_client::{Connection, globals::registry_queue_init};

use super::state::WaylandState;
use crate::{
    config::Config,
    overlay::{OverlayHandle, OverlayState},
    placement::overlay_bounds,
    shutdown::ExitFlag,
};

const MAX_RENDER_FAILURES: u32 = 10;

/// Wayland overlay backend.
pub struct WaylandBackend {
    config: Config,
    overlay: OverlayHandle,
    snapshots: watch::Receiver<OverlayState>,
    exit: ExitFlag,
}

impl WaylandBackend {
    pub fn new(
        config: Config,
        overlay: OverlayHandle,
        snapshots: watch::Receiver<OverlayState>,
        exit: ExitFlag,
    ) -> Self {
        Self {
            config,
            overlay,
            snapshots,
            exit,
        }
    }

    /// Connects, maps the overlay surface and runs until exit is requested.
    pub fn run(self) -> Result<()> {
        info!("Starting Wayland backend");

        let conn =
            Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
        debug!("Connected to Wayland display");

        let (globals, mut event_queue) =
            registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
        let qh = event_queue.handle();

        let compositor_state =
            CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
        debug!("Bound compositor");

        let layer_shell =
            LayerShell::bind(&globals, &qh).context("zwlr_layer_shell_v1 not available")?;
        debug!("Bound layer shell");

        let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
        debug!("Bound shared memory");

        let output_state = OutputState::new(&globals, &qh);
        let seat_state = SeatState::new(&globals, &qh);
        let registry_state = RegistryState::new(&globals);

        debug!("  Font size: {:.1}pt", self.config.style.font_size);
        debug!("  Target FPS: {}", self.config.performance.target_fps);
        debug!("  Buffer count: {}", self.config.performance.buffer_count);
        debug!("  VSync: {}", self.config.performance.enable_vsync);

        let frame_interval = self.config.performance.frame_interval();
        let placement = self.config.placement.placement();
        let interactivity = self.config.input.keyboard_interactivity.interactivity();

        let mut state = WaylandState::new(
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            self.config,
            self.overlay,
            self.snapshots,
            self.exit.clone(),
        );

        // Output geometry arrives in the events following the initial bind.
        event_queue
            .roundtrip(&mut state)
            .context("Initial Wayland roundtrip failed")?;
        event_queue
            .roundtrip(&mut state)
            .context("Output information roundtrip failed")?;

        let desktop = state.desktop_size();
        let bounds = overlay_bounds(desktop, &placement).context("Cannot place overlay window")?;
        let desktop_height = desktop.map_or(0, |(_, height)| height);
        info!(
            "Desktop {:?}; overlay window {}x{} at ({}, {})",
            desktop, bounds.width, bounds.height, bounds.x, bounds.y
        );

        info!("Creating layer shell surface");
        let wl_surface = state.compositor_state.create_surface(&qh);
        let layer_surface = state.layer_shell.create_layer_surface(
            &qh,
            wl_surface,
            Layer::Overlay,
            Some("keyshow"),
            None,
        );

        // Anchored to the bottom edge only, so the compositor centers it horizontally.
        layer_surface.set_anchor(Anchor::BOTTOM);
        layer_surface.set_size(bounds.width as u32, bounds.height as u32);
        layer_surface.set_margin(0, 0, bounds.bottom_margin(desktop_height), 0);
        layer_surface.set_exclusive_zone(-1);
        layer_surface.set_keyboard_interactivity(interactivity);

        // Empty input region: pointer events pass through to whatever is below.
        let region = Region::new(&state.compositor_state).context("Failed to create input region")?;
        layer_surface
            .wl_surface()
            .set_input_region(Some(region.wl_region()));
        layer_surface.commit();

        state.surface.set_layer_surface(layer_surface);
        info!("Layer shell surface created");

        let mut event_loop: EventLoop<WaylandState> =
            EventLoop::try_new().context("Failed to create event loop")?;
        WaylandSource::new(conn.clone(), event_queue)
            .insert(event_loop.handle())
            .map_err(|e| anyhow!("Failed to register Wayland source: {}", e.error))?;
        event_loop
            .handle()
            .insert_source(Timer::from_duration(frame_interval), move |_, _, state| {
                state.frame_due = true;
                TimeoutAction::ToDuration(frame_interval)
            })
            .map_err(|e| anyhow!("Failed to register frame timer: {}", e.error))?;

        let mut consecutive_render_failures = 0u32;
        let mut loop_error: Option<anyhow::Error> = None;
        loop {
            if self.exit.is_requested() {
                info!("Exit requested, breaking event loop");
                break;
            }

            if let Err(e) = event_loop.dispatch(Some(frame_interval), &mut state) {
                warn!("Event loop error: {}", e);
                loop_error = Some(anyhow!("Wayland event loop error: {}", e));
                break;
            }

            if !std::mem::take(&mut state.frame_due) {
                continue;
            }

            match state.draw_frame(&qh) {
                Ok(_) => consecutive_render_failures = 0,
                Err(e) => {
                    consecutive_render_failures += 1;
                    warn!(
                        "Rendering error (attempt {}/{}): {:#}",
                        consecutive_render_failures, MAX_RENDER_FAILURES, e
                    );

                    if consecutive_render_failures >= MAX_RENDER_FAILURES {
                        loop_error = Some(anyhow!(
                            "Too many consecutive render failures ({}), exiting: {:#}",
                            consecutive_render_failures,
                            e
                        ));
                        break;
                    }
                }
            }
        }

        info!("Wayland backend exiting");
        // Let the state owner drain anything still queued before teardown.
        state.overlay.sync();

        match loop_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
