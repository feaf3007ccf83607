//! Single-owner state hub bridging input producers and the render loop.
//!
//! Producers (Wayland keyboard handler, event feed thread) submit
//! [`Transition`]s through an unbounded channel. One owner thread applies them
//! to the only [`OverlayState`] and publishes each new state as an immutable
//! snapshot over a `watch` channel, which the render loop samples once per
//! frame without ever blocking input.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot, watch};

use super::state::{OverlayState, Transition};
use crate::input::{KeyEvent, LabelFormatter};
use crate::shutdown::ExitFlag;

enum Command {
    Apply(Transition),
    Sync(oneshot::Sender<()>),
}

/// What a key-down did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDownOutcome {
    /// A new label was submitted
    Shown,
    /// Ctrl+Alt+Escape: exit requested, state untouched
    ExitRequested,
}

/// Cloneable producer-side handle; the overlay's inbound API.
#[derive(Clone)]
pub struct OverlayHandle {
    commands: mpsc::UnboundedSender<Command>,
    formatter: Arc<LabelFormatter>,
    exit: ExitFlag,
}

impl OverlayHandle {
    /// Handles a key press observed now.
    pub fn on_key_down(&self, event: &KeyEvent) -> KeyDownOutcome {
        self.on_key_down_at(event, Instant::now())
    }

    /// Handles a key press observed at `at`.
    ///
    /// The exit shortcut is intercepted before formatting and never reaches
    /// the overlay state.
    pub fn on_key_down_at(&self, event: &KeyEvent, at: Instant) -> KeyDownOutcome {
        if event.is_exit_shortcut() {
            info!("Exit shortcut pressed (Ctrl+Alt+Escape)");
            self.exit.request();
            return KeyDownOutcome::ExitRequested;
        }

        let label = self.formatter.format(event.key, event.modifiers);
        debug!("Key down {:?} {:?} -> {:?}", event.key, event.modifiers, label);
        self.submit(Transition::KeyDown { label, at });
        KeyDownOutcome::Shown
    }

    /// Handles a key release observed now.
    pub fn on_key_up(&self, event: &KeyEvent) {
        self.on_key_up_at(event, Instant::now());
    }

    /// Handles a key release observed at `at`.
    pub fn on_key_up_at(&self, event: &KeyEvent, at: Instant) {
        debug!("Key up {:?}", event.key);
        self.submit(Transition::KeyUp { at });
    }

    /// Blocks until every transition submitted before this call is applied.
    ///
    /// Returns `false` if the owner thread is gone.
    pub fn sync(&self) -> bool {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.commands.send(Command::Sync(reply_tx)).is_err() {
            return false;
        }
        reply_rx.blocking_recv().is_ok()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit.is_requested()
    }

    fn submit(&self, transition: Transition) {
        if self.commands.send(Command::Apply(transition)).is_err() {
            warn!("Overlay state owner stopped; dropping transition");
        }
    }
}

/// Owns the overlay state thread and the snapshot channel.
pub struct OverlayHub {
    handle: OverlayHandle,
    snapshots: watch::Receiver<OverlayState>,
}

impl OverlayHub {
    /// Spawns the owner thread with an empty, released state.
    ///
    /// The thread runs until every [`OverlayHandle`] has been dropped.
    pub fn spawn(formatter: Arc<LabelFormatter>, exit: ExitFlag) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(OverlayState::new(Instant::now()));

        thread::Builder::new()
            .name("overlay-state".into())
            .spawn(move || run_owner(command_rx, snapshot_tx))
            .context("Failed to spawn overlay state thread")?;

        Ok(Self {
            handle: OverlayHandle {
                commands: command_tx,
                formatter,
                exit,
            },
            snapshots: snapshot_rx,
        })
    }

    pub fn handle(&self) -> OverlayHandle {
        self.handle.clone()
    }

    /// A receiver for published snapshots, for render loops.
    pub fn snapshots(&self) -> watch::Receiver<OverlayState> {
        self.snapshots.clone()
    }

    /// Clone of the most recently published state.
    pub fn latest(&self) -> OverlayState {
        self.snapshots.borrow().clone()
    }
}

fn run_owner(
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<OverlayState>,
) {
    debug!("Overlay state owner started");
    while let Some(command) = commands.blocking_recv() {
        match command {
            Command::Apply(transition) => {
                let changed = snapshots.send_if_modified(|state| state.apply(transition));
                if !changed {
                    debug!("Transition ignored (already released)");
                }
            }
            Command::Sync(reply) => {
                let _ = reply.send(());
            }
        }
    }
    debug!("Overlay state owner exiting");
}
