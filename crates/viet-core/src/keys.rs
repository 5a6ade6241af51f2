//! Key codes and their character mapping.
//!
//! A key code is the ASCII code of the key's lowercase character, carried as
//! `u16`. Capitalization travels separately (see [`crate::keystroke`]), so
//! `a` and `A` share a code. Code `0` is the out-of-bounds sentinel returned
//! by buffer accessors and never maps to a character.

/// Caps flag bit used by the packed `u32` representation of a keystroke.
pub const CAPS_BIT: u32 = 1 << 16;

/// Named codes for the non-letter keys the engine dispatches on.
pub mod key {
    pub const BACKSPACE: u16 = 0x08;
    pub const SPACE: u16 = 0x20;
}

/// Map a typed character to its key code plus caps flag.
/// Returns `None` for characters outside the single-byte ASCII range.
pub fn char_to_key_code(ch: char) -> Option<(u16, bool)> {
    if !ch.is_ascii() || ch == '\0' {
        return None;
    }
    let lower = ch.to_ascii_lowercase();
    Some((lower as u16, ch.is_ascii_uppercase()))
}

/// Map a key code back to its lowercase character.
pub fn key_code_to_char(code: u16) -> Option<char> {
    if code == 0 || code > 0x7f {
        return None;
    }
    Some(code as u8 as char)
}

/// True for the six plain vowel letter codes (a e i o u y).
pub fn is_vowel_code(code: u16) -> bool {
    matches!(key_code_to_char(code), Some('a' | 'e' | 'i' | 'o' | 'u' | 'y'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_round_trip() {
        let (code, caps) = char_to_key_code('A').unwrap();
        assert_eq!(code, b'a' as u16);
        assert!(caps);
        assert_eq!(key_code_to_char(code), Some('a'));
    }

    #[test]
    fn test_sentinel_has_no_char() {
        assert_eq!(key_code_to_char(0), None);
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert_eq!(char_to_key_code('â'), None);
    }

    #[test]
    fn test_vowel_codes() {
        for v in [b'a', b'e', b'i', b'o', b'u', b'y'] {
            assert!(is_vowel_code(v as u16));
        }
        assert!(!is_vowel_code(b'w' as u16));
        assert!(!is_vowel_code(0));
    }
}
