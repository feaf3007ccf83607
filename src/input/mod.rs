//! Keyboard input model and label formatting.
//!
//! Backends translate their native key events into [`KeyEvent`]s; the
//! [`LabelFormatter`] turns those into the text the overlay displays.

pub mod events;
pub mod feed;
pub mod label;
pub mod modifiers;

// Re-export commonly used types at module level
pub use events::{Key, KeyEvent, KeyParseError};
pub use label::LabelFormatter;
pub use modifiers::{Modifier, Modifiers};
