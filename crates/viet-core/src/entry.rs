//! One logical output character slot.
//!
//! The legacy representation packed everything into one `u32` bitmask; here
//! the tone and shape are named fields and the bit layout survives only at
//! the [`CharacterEntry::packed`] / [`CharacterEntry::from_packed`] boundary
//! for externally-serialized word arrays.

use crate::keys::CAPS_BIT;
use crate::keystroke::Keystroke;

/// The five Vietnamese tone diacritics, in their conventional order
/// (Telex `s f r x j`, VNI `1 2 3 4 5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneMark {
    Acute,
    Grave,
    HookAbove,
    Tilde,
    DotBelow,
}

impl ToneMark {
    pub(crate) fn bits(self) -> u32 {
        match self {
            Self::Acute => 1,
            Self::Grave => 2,
            Self::HookAbove => 3,
            Self::Tilde => 4,
            Self::DotBelow => 5,
        }
    }

    pub(crate) fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(Self::Acute),
            2 => Some(Self::Grave),
            3 => Some(Self::HookAbove),
            4 => Some(Self::Tilde),
            5 => Some(Self::DotBelow),
            _ => None,
        }
    }
}

/// Letter-identity modifiers: circumflex (â ê ô), breve (ă), horn (ơ ư),
/// and the d-stroke (đ).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMark {
    Circumflex,
    Breve,
    Horn,
    Stroke,
}

impl ShapeMark {
    pub(crate) fn bits(self) -> u32 {
        match self {
            Self::Circumflex => 1,
            Self::Breve => 2,
            Self::Horn => 3,
            Self::Stroke => 4,
        }
    }

    pub(crate) fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(Self::Circumflex),
            2 => Some(Self::Breve),
            3 => Some(Self::Horn),
            4 => Some(Self::Stroke),
            _ => None,
        }
    }
}

const TONE_SHIFT: u32 = 17;
const SHAPE_SHIFT: u32 = 20;

/// One display character: effective key code, applied modifiers, and the
/// ordered modifier keystrokes that produced it. The entry's own initiating
/// keystroke is tracked implicitly through `key_code`/`caps`, so
/// `keystroke_count() == 1 + modifiers.len()` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterEntry {
    key_code: u16,
    caps: bool,
    tone: Option<ToneMark>,
    shape: Option<ShapeMark>,
    modifiers: Vec<Keystroke>,
}

impl CharacterEntry {
    pub fn new(key_code: u16, caps: bool) -> Self {
        Self {
            key_code,
            caps,
            tone: None,
            shape: None,
            modifiers: Vec::new(),
        }
    }

    pub fn key_code(&self) -> u16 {
        self.key_code
    }

    pub fn caps(&self) -> bool {
        self.caps
    }

    pub fn tone(&self) -> Option<ToneMark> {
        self.tone
    }

    pub fn shape(&self) -> Option<ShapeMark> {
        self.shape
    }

    /// Change the effective key code, preserving all modifier state.
    pub fn set_key_code(&mut self, key_code: u16) {
        self.key_code = key_code;
    }

    pub fn set_tone(&mut self, tone: Option<ToneMark>) {
        self.tone = tone;
    }

    pub fn set_shape(&mut self, shape: Option<ShapeMark>) {
        self.shape = shape;
    }

    pub fn push_modifier(&mut self, keystroke: Keystroke) {
        self.modifiers.push(keystroke);
    }

    pub fn pop_modifier(&mut self) -> Option<Keystroke> {
        self.modifiers.pop()
    }

    pub fn modifiers(&self) -> &[Keystroke] {
        &self.modifiers
    }

    pub fn keystroke_count(&self) -> usize {
        1 + self.modifiers.len()
    }

    /// Initiating keystroke followed by the modifiers, in application order.
    pub fn all_keystrokes(&self) -> Vec<Keystroke> {
        let mut all = Vec::with_capacity(self.keystroke_count());
        all.push(Keystroke::new(self.key_code, self.caps));
        all.extend_from_slice(&self.modifiers);
        all
    }

    /// Legacy bit layout: bits 0-15 key code, 16 caps, 17-19 tone, 20-22
    /// shape. Modifier keystrokes are not representable in a packed word.
    pub fn packed(&self) -> u32 {
        let mut word = u32::from(self.key_code);
        if self.caps {
            word |= CAPS_BIT;
        }
        if let Some(tone) = self.tone {
            word |= tone.bits() << TONE_SHIFT;
        }
        if let Some(shape) = self.shape {
            word |= shape.bits() << SHAPE_SHIFT;
        }
        word
    }

    pub fn from_packed(word: u32) -> Self {
        Self {
            key_code: (word & 0xffff) as u16,
            caps: word & CAPS_BIT != 0,
            tone: ToneMark::from_bits((word >> TONE_SHIFT) & 0b111),
            shape: ShapeMark::from_bits((word >> SHAPE_SHIFT) & 0b111),
            modifiers: Vec::new(),
        }
    }
}
