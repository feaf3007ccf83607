//! Backend-neutral key codes and key events.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::modifiers::{Modifier, Modifiers};

/// Generic key representation for cross-backend compatibility.
///
/// Backend implementations (Wayland keysyms, the text event feed) map their
/// native key codes to these values before anything reaches the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Letter key, stored uppercase (`A`..=`Z`)
    Char(char),
    /// Top-row digit key (0-9)
    Digit(u8),
    /// Numeric keypad digit (0-9)
    Numpad(u8),
    /// Function key F1..F24
    Function(u8),
    Semicolon,
    Backslash,
    BracketLeft,
    BracketRight,
    Quote,
    Backquote,
    Comma,
    Period,
    Slash,
    Minus,
    Equal,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,
    NumpadDecimal,
    NumpadEnter,
    Backspace,
    Tab,
    Enter,
    Escape,
    Space,
    CapsLock,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Up,
    Down,
    Left,
    Right,
    PrintScreen,
    Pause,
    ScrollLock,
    NumLock,
    Menu,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftMeta,
    RightMeta,
    /// Unmapped key, carrying the backend's raw code
    Unknown(u32),
}

impl Key {
    /// Keys with a fixed default name, used for both printing and parsing.
    const NAMED: &'static [(Key, &'static str)] = &[
        (Key::Semicolon, "Semicolon"),
        (Key::Backslash, "Backslash"),
        (Key::BracketLeft, "BracketLeft"),
        (Key::BracketRight, "BracketRight"),
        (Key::Quote, "Quote"),
        (Key::Backquote, "Backquote"),
        (Key::Comma, "Comma"),
        (Key::Period, "Period"),
        (Key::Slash, "Slash"),
        (Key::Minus, "Minus"),
        (Key::Equal, "Equal"),
        (Key::NumpadAdd, "NumpadAdd"),
        (Key::NumpadSubtract, "NumpadSubtract"),
        (Key::NumpadMultiply, "NumpadMultiply"),
        (Key::NumpadDivide, "NumpadDivide"),
        (Key::NumpadDecimal, "NumpadDecimal"),
        (Key::NumpadEnter, "NumpadEnter"),
        (Key::Backspace, "Backspace"),
        (Key::Tab, "Tab"),
        (Key::Enter, "Enter"),
        (Key::Escape, "Escape"),
        (Key::Space, "Space"),
        (Key::CapsLock, "CapsLock"),
        (Key::PageUp, "PageUp"),
        (Key::PageDown, "PageDown"),
        (Key::Home, "Home"),
        (Key::End, "End"),
        (Key::Insert, "Insert"),
        (Key::Delete, "Delete"),
        (Key::Up, "Up"),
        (Key::Down, "Down"),
        (Key::Left, "Left"),
        (Key::Right, "Right"),
        (Key::PrintScreen, "PrintScreen"),
        (Key::Pause, "Pause"),
        (Key::ScrollLock, "ScrollLock"),
        (Key::NumLock, "NumLock"),
        (Key::Menu, "Menu"),
        (Key::LeftShift, "LeftShift"),
        (Key::RightShift, "RightShift"),
        (Key::LeftControl, "LeftControl"),
        (Key::RightControl, "RightControl"),
        (Key::LeftAlt, "LeftAlt"),
        (Key::RightAlt, "RightAlt"),
        (Key::LeftMeta, "LeftMeta"),
        (Key::RightMeta, "RightMeta"),
    ];

    /// Short spellings accepted by the parser in addition to the default names.
    const SHORTHANDS: &'static [(&'static str, Key)] = &[
        ("ctrl", Key::LeftControl),
        ("control", Key::LeftControl),
        ("lctrl", Key::LeftControl),
        ("rctrl", Key::RightControl),
        ("shift", Key::LeftShift),
        ("lshift", Key::LeftShift),
        ("rshift", Key::RightShift),
        ("alt", Key::LeftAlt),
        ("lalt", Key::LeftAlt),
        ("ralt", Key::RightAlt),
        ("altgr", Key::RightAlt),
        ("super", Key::LeftMeta),
        ("meta", Key::LeftMeta),
        ("win", Key::LeftMeta),
        ("logo", Key::LeftMeta),
        ("esc", Key::Escape),
        ("return", Key::Enter),
        ("pgup", Key::PageUp),
        ("prior", Key::PageUp),
        ("pgdn", Key::PageDown),
        ("next", Key::PageDown),
        ("del", Key::Delete),
        ("ins", Key::Insert),
        ("bksp", Key::Backspace),
        ("arrowup", Key::Up),
        ("arrowdown", Key::Down),
        ("arrowleft", Key::Left),
        ("arrowright", Key::Right),
        ("apostrophe", Key::Quote),
        ("grave", Key::Backquote),
        ("equals", Key::Equal),
        ("kpadd", Key::NumpadAdd),
        ("kpsubtract", Key::NumpadSubtract),
        ("kpmultiply", Key::NumpadMultiply),
        ("kpdivide", Key::NumpadDivide),
        ("kpdecimal", Key::NumpadDecimal),
        ("kpenter", Key::NumpadEnter),
    ];

    /// Default textual name, used when no alias exists for the key.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Key::Char(c) => Cow::Owned(c.to_string()),
            Key::Digit(n) => Cow::Owned(format!("Digit{n}")),
            Key::Numpad(n) => Cow::Owned(format!("Numpad{n}")),
            Key::Function(n) => Cow::Owned(format!("F{n}")),
            Key::Unknown(raw) => Cow::Owned(format!("Key{raw}")),
            named => Self::NAMED
                .iter()
                .find(|(key, _)| key == named)
                .map(|(_, name)| Cow::Borrowed(*name))
                .unwrap_or(Cow::Borrowed("Unknown")),
        }
    }

    /// Returns the modifier this key represents, if it is a modifier key.
    pub fn modifier(&self) -> Option<Modifier> {
        match self {
            Key::LeftShift | Key::RightShift => Some(Modifier::Shift),
            Key::LeftControl | Key::RightControl => Some(Modifier::Control),
            Key::LeftAlt | Key::RightAlt => Some(Modifier::Alt),
            Key::LeftMeta | Key::RightMeta => Some(Modifier::Meta),
            _ => None,
        }
    }

    fn from_punctuation(c: char) -> Option<Self> {
        Some(match c {
            ';' => Key::Semicolon,
            '\\' => Key::Backslash,
            '[' => Key::BracketLeft,
            ']' => Key::BracketRight,
            '\'' => Key::Quote,
            '`' => Key::Backquote,
            ',' => Key::Comma,
            '.' => Key::Period,
            '/' => Key::Slash,
            '-' => Key::Minus,
            '=' => Key::Equal,
            '*' => Key::NumpadMultiply,
            _ => return None,
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Error returned when a key name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key name '{0}'")]
pub struct KeyParseError(pub String);

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                return Ok(Key::Char(c.to_ascii_uppercase()));
            }
            if let Some(digit) = c.to_digit(10) {
                return Ok(Key::Digit(digit as u8));
            }
            if let Some(key) = Key::from_punctuation(c) {
                return Ok(key);
            }
            return Err(KeyParseError(trimmed.to_string()));
        }

        let lower = trimmed.to_ascii_lowercase();

        if let Some((key, _)) = Key::NAMED
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(&lower))
        {
            return Ok(*key);
        }

        if let Some((_, key)) = Key::SHORTHANDS.iter().find(|(name, _)| *name == lower) {
            return Ok(*key);
        }

        let numbered = |prefix: &str, max: u8| -> Option<u8> {
            lower
                .strip_prefix(prefix)
                .and_then(|rest| rest.parse::<u8>().ok())
                .filter(|n| *n <= max)
        };

        if let Some(n) = numbered("digit", 9) {
            return Ok(Key::Digit(n));
        }
        if let Some(n) = numbered("numpad", 9).or_else(|| numbered("kp", 9)) {
            return Ok(Key::Numpad(n));
        }
        if let Some(n) = numbered("f", 24).filter(|n| *n >= 1) {
            return Ok(Key::Function(n));
        }
        if let Some(raw) = lower
            .strip_prefix("key")
            .and_then(|rest| rest.parse::<u32>().ok())
        {
            return Ok(Key::Unknown(raw));
        }

        Err(KeyParseError(trimmed.to_string()))
    }
}

/// A decoded key press or release.
///
/// Produced by an input collaborator (Wayland keyboard focus, the text event
/// feed) and immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key that changed state
    pub key: Key,
    /// Modifiers held at the time of the event
    pub modifiers: Modifiers,
    /// `true` for key-down, `false` for key-up
    pub is_down: bool,
}

impl KeyEvent {
    /// Builds a key-down event.
    pub fn down(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            is_down: true,
        }
    }

    /// Builds a key-up event.
    pub fn up(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            is_down: false,
        }
    }

    /// Ctrl+Alt+Escape terminates the overlay instead of being displayed.
    pub fn is_exit_shortcut(&self) -> bool {
        self.is_down && self.key == Key::Escape && self.modifiers.ctrl && self.modifiers.alt
    }
}
