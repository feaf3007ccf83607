//! Line-based key event feed.
//!
//! Lets already-decoded key events be piped into the overlay from a file or
//! stdin, one command per line:
//!
//! ```text
//! # comment
//! down ctrl+s
//! up s
//! wait 50
//! ```
//!
//! `down`/`up` take `+`-joined modifier names followed by a key name;
//! `wait` pauses replay for the given number of milliseconds.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use thiserror::Error;

use super::events::{Key, KeyEvent, KeyParseError};
use super::modifiers::Modifiers;
use crate::overlay::{KeyDownOutcome, OverlayHandle};

/// One parsed feed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCommand {
    Key(KeyEvent),
    Wait(Duration),
}

/// Errors produced while parsing a feed line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("line {line}: unknown command '{command}' (expected down, up or wait)")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' needs an argument")]
    MissingArgument { line: usize, command: String },

    #[error("line {line}: {source}")]
    BadKey {
        line: usize,
        #[source]
        source: KeyParseError,
    },

    #[error("line {line}: '{token}' is not a modifier")]
    NotAModifier { line: usize, token: String },

    #[error("line {line}: invalid wait duration '{value}'")]
    BadDuration { line: usize, value: String },
}

/// Parses a single feed line. Blank lines and comments yield `Ok(None)`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<FeedCommand>, FeedError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let (command, argument) = match text.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (text, ""),
    };
    let command = command.to_ascii_lowercase();

    if argument.is_empty() && matches!(command.as_str(), "down" | "up" | "wait") {
        return Err(FeedError::MissingArgument { line, command });
    }

    match command.as_str() {
        "down" => {
            let (key, modifiers) = parse_chord(line, argument)?;
            Ok(Some(FeedCommand::Key(KeyEvent::down(key, modifiers))))
        }
        "up" => {
            let (key, modifiers) = parse_chord(line, argument)?;
            Ok(Some(FeedCommand::Key(KeyEvent::up(key, modifiers))))
        }
        "wait" => argument
            .parse::<u64>()
            .map(|millis| Some(FeedCommand::Wait(Duration::from_millis(millis))))
            .map_err(|_| FeedError::BadDuration {
                line,
                value: argument.to_string(),
            }),
        _ => Err(FeedError::UnknownCommand { line, command }),
    }
}

/// Parses `mod+mod+key` into the key and its held modifiers.
fn parse_chord(line: usize, chord: &str) -> Result<(Key, Modifiers), FeedError> {
    let mut tokens: Vec<&str> = chord.split('+').map(str::trim).collect();
    // `split` always yields at least one item
    let key_token = tokens.pop().unwrap_or_default();
    let key = key_token
        .parse::<Key>()
        .map_err(|source| FeedError::BadKey { line, source })?;

    let mut modifiers = Modifiers::new();
    for token in tokens {
        let modifier = token
            .parse::<Key>()
            .ok()
            .and_then(|key| key.modifier())
            .ok_or_else(|| FeedError::NotAModifier {
                line,
                token: token.to_string(),
            })?;
        modifiers.set(modifier, true);
    }

    Ok((key, modifiers))
}

/// Opens a feed source; `-` means stdin.
pub fn open(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    if path.as_os_str() == "-" {
        info!("Reading key events from stdin");
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open event feed {}", path.display()))?;
    info!("Reading key events from {}", path.display());
    Ok(Box::new(BufReader::new(file)))
}

/// Replays every command from `reader` into the overlay.
///
/// Malformed lines, including ones that are not valid UTF-8, are logged and
/// skipped. Stops early once an exit has been requested.
pub fn replay<R: BufRead>(reader: R, handle: &OverlayHandle) -> io::Result<()> {
    for (index, bytes) in reader.split(b'\n').enumerate() {
        if handle.exit_requested() {
            debug!("Exit requested, stopping event feed");
            break;
        }

        let bytes = bytes?;
        let line = String::from_utf8_lossy(&bytes);
        match parse_line(index + 1, line.trim_end_matches('\r')) {
            Ok(Some(FeedCommand::Key(event))) if event.is_down => {
                if handle.on_key_down(&event) == KeyDownOutcome::ExitRequested {
                    break;
                }
            }
            Ok(Some(FeedCommand::Key(event))) => handle.on_key_up(&event),
            Ok(Some(FeedCommand::Wait(duration))) => thread::sleep(duration),
            Ok(None) => {}
            Err(err) => warn!("Skipping event feed {}", err),
        }
    }
    Ok(())
}

/// Runs [`replay`] on a background thread.
pub fn spawn(reader: Box<dyn BufRead + Send>, handle: OverlayHandle) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("event-feed".into())
        .spawn(move || match replay(reader, &handle) {
            Ok(()) => info!("Event feed finished"),
            Err(err) => warn!("Event feed read error: {}", err),
        })
        .context("Failed to spawn event feed thread")
}
