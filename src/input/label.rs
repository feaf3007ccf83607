//! Turns a key plus its held modifiers into the text shown on screen.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use super::events::Key;
use super::modifiers::Modifiers;

/// Built-in display aliases. Anything missing falls back to [`Key::name`].
#[rustfmt::skip]
const DEFAULT_ALIASES: &[(Key, &str)] = &[
    (Key::Digit(0), "0"), (Key::Digit(1), "1"), (Key::Digit(2), "2"), (Key::Digit(3), "3"), (Key::Digit(4), "4"),
    (Key::Digit(5), "5"), (Key::Digit(6), "6"), (Key::Digit(7), "7"), (Key::Digit(8), "8"), (Key::Digit(9), "9"),
    (Key::Numpad(0), "0"), (Key::Numpad(1), "1"), (Key::Numpad(2), "2"), (Key::Numpad(3), "3"), (Key::Numpad(4), "4"),
    (Key::Numpad(5), "5"), (Key::Numpad(6), "6"), (Key::Numpad(7), "7"), (Key::Numpad(8), "8"), (Key::Numpad(9), "9"),
    (Key::Semicolon, ";"),
    (Key::Backslash, "\\"),
    (Key::BracketRight, "]"),
    (Key::BracketLeft, "["),
    (Key::Quote, "'"),
    (Key::Backquote, "`"),
    (Key::Comma, ","),
    (Key::Period, "."),
    (Key::Slash, "/"),
    (Key::Minus, "Minus"),
    (Key::Equal, "="),
    (Key::NumpadAdd, "Plus"),
    (Key::NumpadSubtract, "Minus"),
    (Key::NumpadMultiply, "*"),
    (Key::NumpadDivide, "/"),
    (Key::NumpadDecimal, "."),
    (Key::NumpadEnter, "Enter"),
    (Key::Backspace, "Backspace"),
    (Key::Space, "Space"),
    (Key::Enter, "Enter"),
    (Key::PageUp, "Page Up"),
    (Key::PageDown, "Page Down"),
    (Key::Escape, "Esc"),
    (Key::Up, "Arrow Up"),
    (Key::Down, "Arrow Down"),
    (Key::Left, "Arrow Left"),
    (Key::Right, "Arrow Right"),
    (Key::LeftMeta, "Super"),
    (Key::RightMeta, "Super"),
];

/// Formats key events into overlay labels.
///
/// Built once at startup from the built-in alias table plus any user
/// overrides, then shared read-only between input producers.
#[derive(Debug, Clone)]
pub struct LabelFormatter {
    aliases: HashMap<Key, String>,
}

impl Default for LabelFormatter {
    fn default() -> Self {
        Self {
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(key, text)| (*key, (*text).to_string()))
                .collect(),
        }
    }
}

impl LabelFormatter {
    /// Creates a formatter with the built-in aliases, then applies overrides.
    ///
    /// Override keys are key names as accepted by [`Key`]'s parser. Names that
    /// fail to parse are logged and skipped.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut formatter = Self::default();
        for (name, text) in overrides {
            match name.parse::<Key>() {
                Ok(key) => {
                    debug!("Label alias override: {} -> {:?}", key, text);
                    formatter.aliases.insert(key, text.clone());
                }
                Err(err) => warn!("Ignoring label alias: {}", err),
            }
        }
        formatter
    }

    /// Resolves the display name of a single key.
    pub fn key_text(&self, key: Key) -> String {
        self.aliases
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.name().into_owned())
    }

    /// Builds the overlay label for `key` pressed with `modifiers` held.
    ///
    /// A bare modifier key collapses to its own name; when other modifiers
    /// are held as well the whole combination is shown instead. Other keys
    /// render as `<modifiers> + <key>`. The result is uppercased and never
    /// contains "Control" (always shortened to "Ctrl").
    pub fn format(&self, key: Key, modifiers: Modifiers) -> String {
        let label = match key.modifier() {
            Some(own) if modifiers.without(own).is_empty() => own.name().to_string(),
            Some(own) => modifiers.with(own).describe(),
            None if modifiers.is_empty() => self.key_text(key),
            None => format!("{} + {}", modifiers.describe(), self.key_text(key)),
        };

        label.to_uppercase().replace("CONTROL", "CTRL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifier;

    fn ctrl() -> Modifiers {
        Modifiers::new().with(Modifier::Control)
    }

    #[test]
    fn alias_table_entries_are_used_without_modifiers() {
        let formatter = LabelFormatter::default();
        for (key, text) in DEFAULT_ALIASES {
            assert_eq!(
                formatter.format(*key, Modifiers::new()),
                text.to_uppercase(),
                "alias for {key:?}"
            );
        }
    }

    #[test]
    fn unknown_keys_fall_back_to_default_name() {
        let formatter = LabelFormatter::default();
        assert_eq!(formatter.format(Key::Function(5), Modifiers::new()), "F5");
        assert_eq!(formatter.format(Key::Tab, Modifiers::new()), "TAB");
        assert_eq!(formatter.format(Key::Unknown(99), Modifiers::new()), "KEY99");
    }

    #[test]
    fn modifier_combination_prefixes_key() {
        let formatter = LabelFormatter::default();
        assert_eq!(formatter.format(Key::Char('S'), ctrl()), "CTRL + S");
        let mods = ctrl().with(Modifier::Shift);
        assert_eq!(formatter.format(Key::Char('Z'), mods), "CTRL + SHIFT + Z");
        assert_eq!(formatter.format(Key::Char('Ф'), ctrl()), "CTRL + Ф");
        assert_eq!(
            formatter.format(Key::Digit(1), Modifiers::new().with(Modifier::Alt)),
            "ALT + 1"
        );
    }

    #[test]
    fn bare_modifier_keys_collapse_to_canonical_name() {
        let formatter = LabelFormatter::default();
        let none = Modifiers::new();
        assert_eq!(formatter.format(Key::LeftShift, none), "SHIFT");
        assert_eq!(formatter.format(Key::RightControl, none), "CTRL");
        assert_eq!(formatter.format(Key::LeftAlt, none), "ALT");
        assert_eq!(formatter.format(Key::LeftMeta, none), "SUPER");
    }

    #[test]
    fn modifier_key_reporting_itself_still_collapses() {
        let formatter = LabelFormatter::default();
        let shift = Modifiers::new().with(Modifier::Shift);
        assert_eq!(formatter.format(Key::LeftShift, shift), "SHIFT");
    }

    #[test]
    fn modifier_key_with_other_modifiers_shows_combination() {
        let formatter = LabelFormatter::default();
        assert_eq!(formatter.format(Key::LeftShift, ctrl()), "CTRL + SHIFT");
        let ctrl_alt = ctrl().with(Modifier::Alt);
        assert_eq!(formatter.format(Key::RightAlt, ctrl_alt), "CTRL + ALT");
    }

    #[test]
    fn output_never_contains_control() {
        let formatter = LabelFormatter::with_overrides(&BTreeMap::from([(
            "F1".to_string(),
            "control panel".to_string(),
        )]));
        let keys = [
            Key::LeftControl,
            Key::RightControl,
            Key::Char('C'),
            Key::Function(1),
        ];
        for key in keys {
            for mods in [Modifiers::new(), ctrl(), ctrl().with(Modifier::Alt)] {
                let label = formatter.format(key, mods);
                assert!(!label.contains("CONTROL"), "{label}");
                assert!(!label.contains("Control"), "{label}");
            }
        }
    }

    #[test]
    fn overrides_replace_and_extend_aliases() {
        let overrides = BTreeMap::from([
            ("space".to_string(), "Пробел".to_string()),
            ("Tab".to_string(), "Tabulator".to_string()),
            ("not-a-key".to_string(), "ignored".to_string()),
        ]);
        let formatter = LabelFormatter::with_overrides(&overrides);
        assert_eq!(formatter.format(Key::Space, Modifiers::new()), "ПРОБЕЛ");
        assert_eq!(formatter.format(Key::Tab, ctrl()), "CTRL + TABULATOR");
        assert_eq!(formatter.key_text(Key::Escape), "Esc");
    }
}
