//! Keyboard modifier state tracking.

use std::fmt;

/// A single modifier key class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Control (left or right)
    Control,
    /// Alt (left or right)
    Alt,
    /// Shift (left or right)
    Shift,
    /// Meta / Super / Windows key
    Meta,
}

impl Modifier {
    /// Display order used when describing a modifier combination.
    pub const ORDER: [Modifier; 4] = [
        Modifier::Control,
        Modifier::Alt,
        Modifier::Shift,
        Modifier::Meta,
    ];

    /// Canonical human-readable name.
    ///
    /// Control keeps its long name here; the label formatter shortens it to
    /// "Ctrl" as a final pass.
    pub fn name(self) -> &'static str {
        match self {
            Modifier::Control => "Control",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::Meta => "Super",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Control, Alt, Shift, Meta) are held while a
/// key event is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
    /// Shift key pressed
    pub shift: bool,
    /// Meta/Super key pressed
    pub meta: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.meta)
    }

    /// Returns whether the given modifier is part of this set.
    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Control => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Shift => self.shift,
            Modifier::Meta => self.meta,
        }
    }

    /// Sets or clears a single modifier.
    pub fn set(&mut self, modifier: Modifier, held: bool) {
        match modifier {
            Modifier::Control => self.ctrl = held,
            Modifier::Alt => self.alt = held,
            Modifier::Shift => self.shift = held,
            Modifier::Meta => self.meta = held,
        }
    }

    /// Copy of this set with `modifier` added.
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.set(modifier, true);
        self
    }

    /// Copy of this set with `modifier` removed.
    pub fn without(mut self, modifier: Modifier) -> Self {
        self.set(modifier, false);
        self
    }

    /// Iterates active modifiers in display order.
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ORDER
            .into_iter()
            .filter(move |modifier| self.contains(*modifier))
    }

    /// Describes the combination, e.g. `Control + Shift`.
    ///
    /// Returns an empty string for an empty set.
    pub fn describe(&self) -> String {
        self.iter()
            .map(Modifier::name)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_uses_fixed_order() {
        let mods = Modifiers {
            ctrl: true,
            alt: false,
            shift: true,
            meta: true,
        };
        assert_eq!(mods.describe(), "Control + Shift + Super");
    }

    #[test]
    fn empty_set_describes_as_empty_string() {
        assert!(Modifiers::new().is_empty());
        assert_eq!(Modifiers::new().describe(), "");
    }

    #[test]
    fn with_and_without_toggle_single_modifier() {
        let mods = Modifiers::new().with(Modifier::Alt).with(Modifier::Shift);
        assert!(mods.alt && mods.shift);
        let mods = mods.without(Modifier::Alt);
        assert!(!mods.alt);
        assert!(mods.contains(Modifier::Shift));
    }
}
