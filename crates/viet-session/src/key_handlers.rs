use tracing::debug_span;

use viet_core::entry::ToneMark;
use viet_core::keys::{key, key_code_to_char};
use viet_core::keystroke::Keystroke;
use viet_core::settings::InputMethod;

use crate::response::KeyOutcome;
use crate::transform::ShapeTargets;
use crate::InputSession;

/// What a key does under the active input method.
pub(crate) enum KeyRole {
    Tone(ToneMark),
    ToneRemove,
    /// Circumflex trigger: Telex doubling carries the matching base vowel,
    /// VNI `6` targets any of a/e/o.
    Circumflex { base: Option<u16> },
    /// Breve/horn trigger with the vowels it may land on.
    Shape(ShapeTargets),
    /// D-stroke trigger: Telex doubling strokes the `d` just typed, VNI `9`
    /// the word-initial one.
    Stroke { word_initial: bool },
    Plain,
}

pub(crate) fn classify(method: InputMethod, code: u16) -> KeyRole {
    let Some(ch) = key_code_to_char(code) else {
        return KeyRole::Plain;
    };
    match method {
        InputMethod::Telex => match ch {
            's' => KeyRole::Tone(ToneMark::Acute),
            'f' => KeyRole::Tone(ToneMark::Grave),
            'r' => KeyRole::Tone(ToneMark::HookAbove),
            'x' => KeyRole::Tone(ToneMark::Tilde),
            'j' => KeyRole::Tone(ToneMark::DotBelow),
            'z' => KeyRole::ToneRemove,
            'a' | 'e' | 'o' => KeyRole::Circumflex { base: Some(code) },
            'w' => KeyRole::Shape(ShapeTargets::TelexW),
            'd' => KeyRole::Stroke { word_initial: false },
            _ => KeyRole::Plain,
        },
        InputMethod::Vni => match ch {
            '1' => KeyRole::Tone(ToneMark::Acute),
            '2' => KeyRole::Tone(ToneMark::Grave),
            '3' => KeyRole::Tone(ToneMark::HookAbove),
            '4' => KeyRole::Tone(ToneMark::Tilde),
            '5' => KeyRole::Tone(ToneMark::DotBelow),
            '6' => KeyRole::Circumflex { base: None },
            '7' => KeyRole::Shape(ShapeTargets::Horn),
            '8' => KeyRole::Shape(ShapeTargets::Breve),
            '9' => KeyRole::Stroke { word_initial: true },
            '0' => KeyRole::ToneRemove,
            _ => KeyRole::Plain,
        },
    }
}

impl InputSession {
    /// One call per ordinary physical keystroke.
    pub fn process_key(&mut self, ch: char, key_code: u16, caps: bool) -> KeyOutcome {
        let _span = debug_span!("process_key", %ch, key_code, caps).entered();

        if key_code == key::BACKSPACE {
            return self.handle_backspace();
        }
        if key_code == key::SPACE {
            return self.process_word_break(' ');
        }
        if key_code_to_char(key_code).is_none() {
            return KeyOutcome::passthrough();
        }

        // The word is about to grow: pending trailing spaces become a
        // history unit now, keeping the stack in true typed order.
        if self.space_count > 0 {
            self.history.save_spaces(self.space_count);
            self.space_count = 0;
        }

        let keystroke = Keystroke::new(key_code, caps);
        self.macro_key.push(keystroke.packed());

        if self.temp_disabled {
            return self.append_plain(key_code, caps, ch);
        }

        match classify(self.settings.input_method, key_code) {
            KeyRole::Tone(tone) => self.handle_tone(tone, keystroke, ch),
            KeyRole::ToneRemove => self.handle_tone_remove(keystroke, ch),
            KeyRole::Circumflex { base } => self.handle_circumflex(base, keystroke, ch),
            KeyRole::Shape(targets) => self.handle_shape(targets, keystroke, ch),
            KeyRole::Stroke { word_initial } => self.handle_stroke(word_initial, keystroke, ch),
            KeyRole::Plain => self.append_plain(key_code, caps, ch),
        }
    }
}
