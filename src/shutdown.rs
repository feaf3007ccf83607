//! Process-wide exit request flag.
//!
//! Set by the Ctrl+Alt+Escape shortcut and by SIGINT/SIGTERM; polled by the
//! event loop between dispatches.

use anyhow::{Context, Result};
use log::info;
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared, cloneable exit request flag.
#[derive(Debug, Clone, Default)]
pub struct ExitFlag(Arc<AtomicBool>);

impl ExitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests termination. Idempotent.
    pub fn request(&self) {
        // Release pairs with the Acquire load in `is_requested`
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sets the flag when SIGINT or SIGTERM arrives.
    pub fn register_signals(&self) -> Result<()> {
        for signal in [SIGINT, SIGTERM] {
            signal_hook::flag::register(signal, Arc::clone(&self.0))
                .with_context(|| format!("Failed to register handler for signal {signal}"))?;
        }
        info!("Send SIGINT/SIGTERM or press Ctrl+Alt+Escape to quit");
        Ok(())
    }
}
