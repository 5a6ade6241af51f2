//! Word termination: macro expansion, history save, space accounting.

use tracing::debug_span;

use viet_core::keys::char_to_key_code;
use viet_core::keystroke::Keystroke;

use crate::response::KeyOutcome;
use crate::InputSession;

impl InputSession {
    /// One call per word-terminating character: space, punctuation, or a
    /// macro-trigger symbol.
    pub fn process_word_break(&mut self, ch: char) -> KeyOutcome {
        let _span = debug_span!("process_word_break", %ch).entered();

        if let Some(outcome) = self.try_expand_macro(ch) {
            return outcome;
        }

        if !self.buffer.is_empty() {
            self.history.save(self.buffer.snapshot());
        }
        self.clear_word_state();
        if ch == ' ' {
            self.space_count += 1;
        }
        KeyOutcome::passthrough()
    }

    /// Match the accumulated trigger keystrokes; for a symbol break also
    /// try the trigger with the symbol included.
    fn try_expand_macro(&mut self, break_char: char) -> Option<KeyOutcome> {
        if !self.settings.macros_enabled || self.macro_key.is_empty() {
            return None;
        }
        let macros = self.macros.as_ref()?;

        let (expansion, break_consumed) = match macros.find(&self.macro_key) {
            Some(expansion) => (expansion, false),
            None => {
                if break_char == ' ' {
                    return None;
                }
                let (code, caps) = char_to_key_code(break_char)?;
                let mut with_break = self.macro_key.clone();
                with_break.push(Keystroke::new(code, caps).packed());
                (macros.find(&with_break)?, true)
            }
        };

        // The visible trigger characters are replaced by the expansion;
        // the break character follows unless it was part of the trigger.
        let backspaces = self.macro_key.len();
        let mut output = expansion;
        if !break_consumed {
            output.push(break_char);
        }
        self.clear_word_state();
        self.space_count = if break_char == ' ' { 1 } else { 0 };
        Some(KeyOutcome::replace(backspaces, output))
    }
}
