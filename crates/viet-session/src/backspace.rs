//! The backspace/restore state machine.
//!
//! The engine never sees the real field, so every restore decision weighs a
//! wrong guess (mangling visible text) against doing nothing. Under any
//! uncertainty signal the machine does nothing and records the uncertainty
//! as a flag.

use tracing::debug;

use viet_core::compose::render;
use viet_core::history::HistoryUnit;

use crate::response::KeyOutcome;
use crate::InputSession;

enum Verify {
    Match,
    NoMatch,
}

impl InputSession {
    pub(crate) fn handle_backspace(&mut self) -> KeyOutcome {
        // One backspace removes one visible glyph: the whole entry goes,
        // never its modifiers one at a time.
        if let Some(popped) = self.buffer.remove_last() {
            let keep = self
                .macro_key
                .len()
                .saturating_sub(popped.keystroke_count());
            self.macro_key.truncate(keep);
            if self.buffer.is_empty() {
                self.macro_key.clear();
            }
            return KeyOutcome::passthrough();
        }

        if self.space_count > 0 {
            self.space_count -= 1;
            return KeyOutcome::passthrough();
        }

        if self.cursor_moved_since_reset {
            // Prior content is no longer trustworthy once the cursor went
            // somewhere we could not see.
            self.history.clear();
            return KeyOutcome::passthrough();
        }

        if self.focus_changed_during_typing {
            match self.verify_against_field() {
                Verify::Match => {
                    debug!("trailing text verified, restoring across focus change");
                }
                Verify::NoMatch => {
                    self.buffer_desync_detected = true;
                    self.history.clear();
                    return KeyOutcome::passthrough();
                }
            }
        }

        match self.history.pop_last() {
            None => {
                // Empty history is indistinguishable from having lost
                // track; treat it as a cursor move.
                self.cursor_moved_since_reset = true;
                KeyOutcome::passthrough()
            }
            Some(HistoryUnit::Spaces(count)) => {
                self.space_count = count;
                KeyOutcome::consumed()
            }
            Some(HistoryUnit::Word(snapshot)) => {
                self.buffer.restore(&snapshot);
                self.macro_key = self
                    .buffer
                    .all_raw_keystrokes()
                    .iter()
                    .map(|k| k.packed())
                    .collect();
                self.temp_disabled = false;
                self.refresh_temp_disabled();
                KeyOutcome::consumed()
            }
        }
    }

    /// Single synchronous query against the real field; only reached on the
    /// focus-changed path, at most once per backspace-to-empty event.
    fn verify_against_field(&self) -> Verify {
        let Some(verifier) = &self.verifier else {
            return Verify::NoMatch;
        };
        let Some(trailing) = verifier.trailing_text() else {
            return Verify::NoMatch;
        };
        let matches = match self.history.last() {
            Some(HistoryUnit::Word(snapshot)) => {
                let word = render(snapshot.entries());
                !word.is_empty() && trailing.ends_with(&word)
            }
            Some(HistoryUnit::Spaces(count)) => {
                trailing.ends_with(&" ".repeat(*count as usize))
            }
            None => false,
        };
        if matches {
            Verify::Match
        } else {
            Verify::NoMatch
        }
    }
}
