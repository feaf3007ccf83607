use anyhow::Result;

pub mod wayland;

use crate::config::Config;
use crate::overlay::OverlayHub;
use crate::shutdown::ExitFlag;

/// Run the Wayland overlay until the exit flag is raised.
///
/// # Arguments
/// * `config` - Validated configuration
/// * `hub` - Overlay state hub whose snapshots are rendered
/// * `exit` - Shared exit flag checked between event loop dispatches
pub fn run_wayland(config: Config, hub: &OverlayHub, exit: ExitFlag) -> Result<()> {
    let backend = wayland::WaylandBackend::new(config, hub.handle(), hub.snapshots(), exit);
    backend.run()
}
