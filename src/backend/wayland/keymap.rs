// Translates xkb keysyms delivered by the seat into backend-neutral `Key` values.
use smithay_client_toolkit::seat::keyboard::{Keysym, Modifiers as XkbModifiers};

use crate::input::{Key, Modifiers};

/// Maps a keysym to the key that produced it.
///
/// Keysyms arrive with Shift already applied, so shifted punctuation on a US
/// layout is folded back onto its base key (`!` is the 1 key).
pub(super) fn keysym_to_key(keysym: Keysym) -> Key {
    let raw = keysym.raw();
    match raw {
        0x61..=0x7a => return Key::Char(char::from(raw as u8).to_ascii_uppercase()),
        0x41..=0x5a => return Key::Char(char::from(raw as u8)),
        0x30..=0x39 => return Key::Digit((raw - 0x30) as u8),
        0xffb0..=0xffb9 => return Key::Numpad((raw - 0xffb0) as u8),
        // F1 is 0xffbe; keysyms run contiguously up to F35
        0xffbe..=0xffd5 => return Key::Function((raw - 0xffbe + 1) as u8),
        _ => {}
    }

    match keysym {
        Keysym::Escape => Key::Escape,
        Keysym::Return => Key::Enter,
        Keysym::KP_Enter => Key::NumpadEnter,
        Keysym::BackSpace => Key::Backspace,
        Keysym::Tab | Keysym::ISO_Left_Tab => Key::Tab,
        Keysym::space => Key::Space,
        Keysym::Caps_Lock => Key::CapsLock,

        Keysym::Shift_L => Key::LeftShift,
        Keysym::Shift_R => Key::RightShift,
        Keysym::Control_L => Key::LeftControl,
        Keysym::Control_R => Key::RightControl,
        Keysym::Alt_L | Keysym::Meta_L => Key::LeftAlt,
        Keysym::Alt_R | Keysym::ISO_Level3_Shift => Key::RightAlt,
        Keysym::Super_L => Key::LeftMeta,
        Keysym::Super_R => Key::RightMeta,

        Keysym::Page_Up => Key::PageUp,
        Keysym::Page_Down => Key::PageDown,
        Keysym::Home => Key::Home,
        Keysym::End => Key::End,
        Keysym::Insert => Key::Insert,
        Keysym::Delete => Key::Delete,
        Keysym::Up => Key::Up,
        Keysym::Down => Key::Down,
        Keysym::Left => Key::Left,
        Keysym::Right => Key::Right,
        Keysym::Print => Key::PrintScreen,
        Keysym::Pause => Key::Pause,
        Keysym::Scroll_Lock => Key::ScrollLock,
        Keysym::Num_Lock => Key::NumLock,
        Keysym::Menu => Key::Menu,

        Keysym::KP_Add => Key::NumpadAdd,
        Keysym::KP_Subtract => Key::NumpadSubtract,
        Keysym::KP_Multiply => Key::NumpadMultiply,
        Keysym::KP_Divide => Key::NumpadDivide,
        Keysym::KP_Decimal | Keysym::KP_Separator => Key::NumpadDecimal,

        Keysym::semicolon | Keysym::colon => Key::Semicolon,
        Keysym::backslash | Keysym::bar => Key::Backslash,
        Keysym::bracketleft | Keysym::braceleft => Key::BracketLeft,
        Keysym::bracketright | Keysym::braceright => Key::BracketRight,
        Keysym::apostrophe | Keysym::quotedbl => Key::Quote,
        Keysym::grave | Keysym::asciitilde => Key::Backquote,
        Keysym::comma | Keysym::less => Key::Comma,
        Keysym::period | Keysym::greater => Key::Period,
        Keysym::slash | Keysym::question => Key::Slash,
        Keysym::minus | Keysym::underscore => Key::Minus,
        Keysym::equal | Keysym::plus => Key::Equal,

        Keysym::exclam => Key::Digit(1),
        Keysym::at => Key::Digit(2),
        Keysym::numbersign => Key::Digit(3),
        Keysym::dollar => Key::Digit(4),
        Keysym::percent => Key::Digit(5),
        Keysym::asciicircum => Key::Digit(6),
        Keysym::ampersand => Key::Digit(7),
        Keysym::asterisk => Key::Digit(8),
        Keysym::parenleft => Key::Digit(9),
        Keysym::parenright => Key::Digit(0),

        _ => letter_from_keysym(keysym).unwrap_or(Key::Unknown(raw)),
    }
}

/// Letters outside the Latin range (Cyrillic, Greek) keep their character.
fn letter_from_keysym(keysym: Keysym) -> Option<Key> {
    let c = keysym.key_char().filter(|c| c.is_alphabetic())?;
    Some(Key::Char(c.to_uppercase().next().unwrap_or(c)))
}

/// Converts the seat's modifier state; the logo key counts as Meta.
pub(super) fn modifiers_from_xkb(modifiers: &XkbModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        shift: modifiers.shift,
        meta: modifiers.logo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_uppercased() {
        assert_eq!(keysym_to_key(Keysym::s), Key::Char('S'));
        assert_eq!(keysym_to_key(Keysym::S), Key::Char('S'));
    }

    #[test]
    fn digits_and_keypad() {
        assert_eq!(keysym_to_key(Keysym::_7), Key::Digit(7));
        assert_eq!(keysym_to_key(Keysym::KP_3), Key::Numpad(3));
        assert_eq!(keysym_to_key(Keysym::KP_Add), Key::NumpadAdd);
    }

    #[test]
    fn function_keys() {
        assert_eq!(keysym_to_key(Keysym::F1), Key::Function(1));
        assert_eq!(keysym_to_key(Keysym::F12), Key::Function(12));
        assert_eq!(keysym_to_key(Keysym::F24), Key::Function(24));
    }

    #[test]
    fn shifted_punctuation_folds_to_base_key() {
        assert_eq!(keysym_to_key(Keysym::exclam), Key::Digit(1));
        assert_eq!(keysym_to_key(Keysym::underscore), Key::Minus);
        assert_eq!(keysym_to_key(Keysym::question), Key::Slash);
    }

    #[test]
    fn modifier_keys_keep_their_side() {
        assert_eq!(keysym_to_key(Keysym::Control_R), Key::RightControl);
        assert_eq!(keysym_to_key(Keysym::Super_L), Key::LeftMeta);
        assert_eq!(keysym_to_key(Keysym::Escape), Key::Escape);
    }

    #[test]
    fn non_latin_letters_keep_their_character() {
        assert_eq!(keysym_to_key(Keysym::Cyrillic_ef), Key::Char('Ф'));
        assert_eq!(keysym_to_key(Keysym::Greek_alpha), Key::Char('Α'));
    }

    #[test]
    fn unmapped_keysym_keeps_raw_code() {
        assert_eq!(
            keysym_to_key(Keysym::XF86_AudioPlay),
            Key::Unknown(Keysym::XF86_AudioPlay.raw())
        );
    }

    #[test]
    fn logo_modifier_is_meta() {
        let xkb = XkbModifiers {
            ctrl: true,
            logo: true,
            ..Default::default()
        };
        let mods = modifiers_from_xkb(&xkb);
        assert!(mods.ctrl && mods.meta);
        assert!(!mods.alt && !mods.shift);
    }
}
