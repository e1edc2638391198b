//! Key code resolution.
//!
//! Key codes throughout the crate are Windows virtual-key codes, which is
//! what the low-level keyboard hook reports. This module turns them into:
//!
//! - the short label drawn on screen ([`display_label`]), and
//! - the name used to look up a per-key override sound ([`sound_name`]).
//!
//! Character keys resolve through a US-layout table equivalent to
//! `MapVirtualKey(.., MAPVK_VK_TO_CHAR)`.

pub const VK_BACK: u32 = 0x08;
pub const VK_TAB: u32 = 0x09;
pub const VK_RETURN: u32 = 0x0D;
pub const VK_SHIFT: u32 = 0x10;
pub const VK_CONTROL: u32 = 0x11;
pub const VK_MENU: u32 = 0x12;
pub const VK_PAUSE: u32 = 0x13;
pub const VK_CAPITAL: u32 = 0x14;
pub const VK_ESCAPE: u32 = 0x1B;
pub const VK_SPACE: u32 = 0x20;
pub const VK_PRIOR: u32 = 0x21;
pub const VK_NEXT: u32 = 0x22;
pub const VK_END: u32 = 0x23;
pub const VK_HOME: u32 = 0x24;
pub const VK_SNAPSHOT: u32 = 0x2C;
pub const VK_INSERT: u32 = 0x2D;
pub const VK_DELETE: u32 = 0x2E;
pub const VK_F: u32 = 0x46;
pub const VK_LWIN: u32 = 0x5B;
pub const VK_RWIN: u32 = 0x5C;
pub const VK_NUMPAD0: u32 = 0x60;
pub const VK_F1: u32 = 0x70;
pub const VK_F12: u32 = 0x7B;
pub const VK_NUMLOCK: u32 = 0x90;
pub const VK_SCROLL: u32 = 0x91;
pub const VK_LSHIFT: u32 = 0xA0;
pub const VK_RSHIFT: u32 = 0xA1;
pub const VK_LCONTROL: u32 = 0xA2;
pub const VK_RCONTROL: u32 = 0xA3;
pub const VK_LMENU: u32 = 0xA4;
pub const VK_RMENU: u32 = 0xA5;
pub const VK_VOLUME_MUTE: u32 = 0xAD;
pub const VK_VOLUME_DOWN: u32 = 0xAE;
pub const VK_VOLUME_UP: u32 = 0xAF;
pub const VK_MEDIA_NEXT_TRACK: u32 = 0xB0;
pub const VK_MEDIA_PREV_TRACK: u32 = 0xB1;
pub const VK_MEDIA_STOP: u32 = 0xB2;
pub const VK_MEDIA_PLAY_PAUSE: u32 = 0xB3;

pub fn is_control(code: u32) -> bool {
    matches!(code, VK_CONTROL | VK_LCONTROL | VK_RCONTROL)
}

pub fn is_alt(code: u32) -> bool {
    matches!(code, VK_MENU | VK_LMENU | VK_RMENU)
}

/// Unshifted character produced by `code` on a US layout.
pub fn key_char(code: u32) -> Option<char> {
    let c = match code {
        0x30..=0x39 | 0x41..=0x5A => char::from_u32(code)?,
        0x60..=0x69 => char::from_u32(code - VK_NUMPAD0 + '0' as u32)?,
        VK_SPACE => ' ',
        0x6A => '*',
        0x6B => '+',
        0x6D => '-',
        0x6E => '.',
        0x6F => '/',
        0xBA => ';',
        0xBB => '=',
        0xBC => ',',
        0xBD => '-',
        0xBE => '.',
        0xBF => '/',
        0xC0 => '`',
        0xDB => '[',
        0xDC => '\\',
        0xDD => ']',
        0xDE => '\'',
        _ => return None,
    };
    Some(c)
}

/// Short on-screen label for a key.
pub fn display_label(code: u32) -> String {
    let label = match code {
        VK_RETURN => "RET",
        VK_BACK => "BKSP",
        VK_MENU | VK_LMENU | VK_RMENU => "ALT",
        VK_CONTROL | VK_LCONTROL | VK_RCONTROL => "CTRL",
        VK_SHIFT | VK_LSHIFT | VK_RSHIFT => "SHFT",
        VK_LWIN | VK_RWIN => "WIN",
        VK_DELETE => "DEL",
        VK_INSERT => "INS",
        VK_HOME => "HOME",
        VK_END => "END",
        VK_PRIOR => "PGUP",
        VK_NEXT => "PGDN",
        VK_SNAPSHOT => "PRSTC",
        VK_SCROLL => "SCRL",
        VK_PAUSE => "PAUSE",
        VK_NUMLOCK => "NUM",
        VK_CAPITAL => "CAPS",
        VK_TAB => "TAB",
        VK_ESCAPE => "ESC",
        VK_SPACE => " ",
        VK_VOLUME_MUTE => "MUTE",
        VK_VOLUME_DOWN => "VOL-",
        VK_VOLUME_UP => "VOL+",
        VK_MEDIA_NEXT_TRACK => "NEXT",
        VK_MEDIA_PREV_TRACK => "PREV",
        VK_MEDIA_STOP => "STOP",
        VK_MEDIA_PLAY_PAUSE => "PLAY",
        VK_F1..=VK_F12 => return format!("F{}", code - VK_F1 + 1),
        _ => return key_char(code).map_or_else(|| "?".to_string(), String::from),
    };
    label.to_string()
}

/// Name under which a per-key override sound is configured, if the key has one.
pub fn sound_name(code: u32) -> Option<String> {
    let name = match code {
        VK_BACK => "backspace",
        VK_RETURN => "enter",
        VK_SPACE => "space",
        VK_MENU | VK_LMENU | VK_RMENU => "alt",
        VK_SHIFT | VK_LSHIFT | VK_RSHIFT => "shift",
        VK_CONTROL | VK_LCONTROL | VK_RCONTROL => "control",
        VK_LWIN | VK_RWIN => "win",
        VK_DELETE => "delete",
        VK_INSERT => "insert",
        VK_HOME => "home",
        VK_END => "end",
        VK_PRIOR => "pageup",
        VK_NEXT => "pagedown",
        VK_SNAPSHOT => "printscreen",
        VK_SCROLL => "scrolllock",
        VK_PAUSE => "pause",
        VK_NUMLOCK => "numlock",
        VK_CAPITAL => "capslock",
        VK_TAB => "tab",
        VK_ESCAPE => "escape",
        VK_VOLUME_MUTE => "volmute",
        VK_VOLUME_DOWN => "voldown",
        VK_VOLUME_UP => "volup",
        VK_MEDIA_NEXT_TRACK => "nexttrack",
        VK_MEDIA_PREV_TRACK => "prevtrack",
        VK_MEDIA_STOP => "stop",
        VK_MEDIA_PLAY_PAUSE => "playpause",
        _ => return key_char(code).map(|c| c.to_ascii_lowercase().to_string()),
    };
    Some(name.to_string())
}

/// Virtual-key code for a raylib `KeyboardKey` value, for the keys the
/// window polling fallback can observe.
pub fn from_raylib_key(key: i32) -> Option<u32> {
    let code = match key {
        // Letters, digits and space share their ASCII value.
        32 | 48..=57 | 65..=90 => key as u32,
        39 => 0xDE,
        44 => 0xBC,
        45 => 0xBD,
        46 => 0xBE,
        47 => 0xBF,
        59 => 0xBA,
        61 => 0xBB,
        91 => 0xDB,
        92 => 0xDC,
        93 => 0xDD,
        96 => 0xC0,
        256 => VK_ESCAPE,
        257 => VK_RETURN,
        258 => VK_TAB,
        259 => VK_BACK,
        260 => VK_INSERT,
        261 => VK_DELETE,
        266 => VK_PRIOR,
        267 => VK_NEXT,
        268 => VK_HOME,
        269 => VK_END,
        280 => VK_CAPITAL,
        281 => VK_SCROLL,
        282 => VK_NUMLOCK,
        283 => VK_SNAPSHOT,
        284 => VK_PAUSE,
        290..=301 => VK_F1 + (key - 290) as u32,
        320..=329 => VK_NUMPAD0 + (key - 320) as u32,
        340 => VK_LSHIFT,
        341 => VK_LCONTROL,
        342 => VK_LMENU,
        343 => VK_LWIN,
        344 => VK_RSHIFT,
        345 => VK_RCONTROL,
        346 => VK_RMENU,
        347 => VK_RWIN,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_labels() {
        assert_eq!(display_label(VK_RETURN), "RET");
        assert_eq!(display_label(VK_LSHIFT), "SHFT");
        assert_eq!(display_label(VK_RMENU), "ALT");
        assert_eq!(display_label(VK_SPACE), " ");
        assert_eq!(display_label(VK_MEDIA_PLAY_PAUSE), "PLAY");
    }

    #[test]
    fn test_function_key_labels() {
        assert_eq!(display_label(VK_F1), "F1");
        assert_eq!(display_label(0x72), "F3");
        assert_eq!(display_label(VK_F12), "F12");
    }

    #[test]
    fn test_character_labels() {
        assert_eq!(display_label(0x41), "A");
        assert_eq!(display_label(0x37), "7");
        assert_eq!(display_label(0xBD), "-");
        assert_eq!(display_label(0x63), "3");
        assert_eq!(display_label(0xFF), "?");
    }

    #[test]
    fn test_sound_names() {
        assert_eq!(sound_name(VK_RETURN).as_deref(), Some("enter"));
        assert_eq!(sound_name(VK_BACK).as_deref(), Some("backspace"));
        assert_eq!(sound_name(VK_RCONTROL).as_deref(), Some("control"));
        assert_eq!(sound_name(0x51).as_deref(), Some("q"));
        assert_eq!(sound_name(0xDC).as_deref(), Some("\\"));
        assert_eq!(sound_name(VK_F1), None);
    }

    #[test]
    fn test_modifier_predicates() {
        assert!(is_control(VK_LCONTROL) && is_control(VK_CONTROL));
        assert!(is_alt(VK_RMENU) && !is_alt(VK_F));
    }

    #[test]
    fn test_raylib_keys_map_to_virtual_keys() {
        assert_eq!(from_raylib_key(65), Some(0x41));
        assert_eq!(from_raylib_key(257), Some(VK_RETURN));
        assert_eq!(from_raylib_key(292), Some(0x72));
        assert_eq!(from_raylib_key(345), Some(VK_RCONTROL));
        assert_eq!(from_raylib_key(0), None);
    }
}
