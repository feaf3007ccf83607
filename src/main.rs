use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser};
use keyshow::{
    Config, backend,
    input::{LabelFormatter, feed},
    overlay::OverlayHub,
    shutdown::ExitFlag,
};

#[derive(Parser, Debug)]
#[command(name = "keyshow")]
#[command(version, about = "On-screen keystroke overlay for Wayland compositors")]
struct Cli {
    /// Configuration file (default: ~/.config/keyshow/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Replay key events from a file, or "-" for stdin (lines like "down ctrl+s", "up s", "wait 50")
    #[arg(long, short = 'e', value_name = "PATH")]
    events: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "init_config")]
    print_config: bool,

    /// Write a default configuration file and exit (never overwrites)
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::get_config_path()?,
    };

    if cli.init_config {
        Config::create_default_file(&config_path)?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config: {:#}. Using defaults.", e);
            Config::default()
        }
    };

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // Check for Wayland environment
    if std::env::var_os("WAYLAND_DISPLAY").is_none() {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!(
            "Please run on a compositor with wlr-layer-shell support (Sway, Hyprland, etc.)."
        );
        return Err(anyhow::anyhow!("Wayland environment required"));
    }

    let exit = ExitFlag::new();
    exit.register_signals()?;

    let formatter = Arc::new(LabelFormatter::with_overrides(&config.labels.aliases));
    let hub = OverlayHub::spawn(formatter, exit.clone())?;

    if let Some(path) = &cli.events {
        let reader = feed::open(path)?;
        feed::spawn(reader, hub.handle())?;
    } else if !config.input.keyboard_interactivity.accepts_keyboard() {
        log::warn!(
            "No --events source and keyboard_interactivity is \"none\"; no keys will be shown"
        );
    }

    log::info!("Starting keystroke overlay...");
    backend::run_wayland(config, &hub, exit)?;
    log::info!("Keystroke overlay closed.");

    Ok(())
}
