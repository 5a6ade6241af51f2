//! A single physical keystroke: key code plus capitalization.

use crate::keys::CAPS_BIT;

/// Immutable keystroke value. Round-trips to a packed 32-bit word for
/// storage and for legacy-compatible persistence; two keystrokes are equal
/// iff their packed words are equal, which the derived `PartialEq` gives us
/// since both fields participate in the packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub code: u16,
    pub caps: bool,
}

impl Keystroke {
    pub fn new(code: u16, caps: bool) -> Self {
        Self { code, caps }
    }

    /// Pack as `code | CAPS_BIT`.
    pub fn packed(self) -> u32 {
        u32::from(self.code) | if self.caps { CAPS_BIT } else { 0 }
    }

    pub fn from_packed(word: u32) -> Self {
        Self {
            code: (word & 0xffff) as u16,
            caps: word & CAPS_BIT != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_round_trip() {
        let ks = Keystroke::new(b'q' as u16, true);
        assert_eq!(Keystroke::from_packed(ks.packed()), ks);

        let plain = Keystroke::new(b'q' as u16, false);
        assert_ne!(ks.packed(), plain.packed());
        assert_eq!(Keystroke::from_packed(plain.packed()), plain);
    }

    #[test]
    fn test_equality_is_packed_equality() {
        let a = Keystroke::new(5, false);
        let b = Keystroke::from_packed(5);
        assert_eq!(a, b);
        assert_ne!(a, Keystroke::new(5, true));
    }
}
