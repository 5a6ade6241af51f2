//! Stateful Vietnamese input session: keystroke-in, transformation-out.
//!
//! `InputSession` owns the typing buffer and word history for one focused
//! editing context and processes one keystroke at a time, returning
//! [`KeyOutcome`]s that the host's injection layer applies to the real text
//! field. The real field lives in another application, so the session's
//! model of it is a belief that can desynchronize; the host reports the
//! signals it can observe (`notify_focus_changed`, `reset_with_cursor_moved`)
//! and the session fails open — no restore under any uncertainty.

mod backspace;
mod key_handlers;
mod response;
mod transform;
mod word_break;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use viet_core::buffer::TypingBuffer;
use viet_core::history::TypingHistory;
use viet_core::keys::key_code_to_char;
use viet_core::macros::MacroLookup;
use viet_core::settings::{InputMethod, Settings};
use viet_core::spelling::looks_foreign;

pub use response::KeyOutcome;
pub use viet_core::keys::key;

/// Host-supplied verification query: the real field's current trailing
/// text. Called at most once per backspace-to-empty event, and only on the
/// focus-changed path; never on the ordinary keystroke path.
pub trait FieldVerifier {
    fn trailing_text(&self) -> Option<String>;
}

/// One session per focused editing context. Single-threaded,
/// call-and-return; not to be shared across concurrent callers.
pub struct InputSession {
    buffer: TypingBuffer,
    history: TypingHistory,
    settings: Settings,

    /// Trailing spaces typed since the buffer was last non-empty. Tracked
    /// outside the buffer because a space clears it immediately.
    space_count: u32,
    cursor_moved_since_reset: bool,
    focus_changed_during_typing: bool,
    buffer_desync_detected: bool,
    /// Vietnamese transformation suppressed for the current word.
    temp_disabled: bool,

    /// Packed keystrokes of the current word, for macro trigger matching.
    macro_key: Vec<u32>,

    macros: Option<Arc<dyn MacroLookup>>,
    verifier: Option<Arc<dyn FieldVerifier>>,
}

impl InputSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            buffer: TypingBuffer::new(),
            history: TypingHistory::new(),
            settings,
            space_count: 0,
            cursor_moved_since_reset: false,
            focus_changed_during_typing: false,
            buffer_desync_detected: false,
            temp_disabled: false,
            macro_key: Vec::new(),
            macros: None,
            verifier: None,
        }
    }

    pub fn with_macros(mut self, macros: Arc<dyn MacroLookup>) -> Self {
        self.macros = Some(macros);
        self
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn FieldVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn set_input_method(&mut self, method: InputMethod) {
        self.settings.input_method = method;
    }

    pub fn set_modern_orthography(&mut self, modern: bool) {
        self.settings.modern_orthography = modern;
    }

    pub fn set_macros_enabled(&mut self, enabled: bool) {
        self.settings.macros_enabled = enabled;
    }

    /// Always equal to the buffer's entry count; derived, never stored.
    pub fn index(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &TypingBuffer {
        &self.buffer
    }

    /// Display text of the word currently being composed.
    pub fn current_word(&self) -> String {
        viet_core::compose::render(self.buffer.entries())
    }

    pub fn space_count(&self) -> u32 {
        self.space_count
    }

    pub fn buffer_desync_detected(&self) -> bool {
        self.buffer_desync_detected
    }

    pub fn cursor_moved_since_reset(&self) -> bool {
        self.cursor_moved_since_reset
    }

    pub fn is_temp_disabled(&self) -> bool {
        self.temp_disabled
    }

    /// Clear buffer, flags, macro accumulator, and history.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.history.clear();
        self.clear_word_state();
        self.space_count = 0;
        self.cursor_moved_since_reset = false;
        self.focus_changed_during_typing = false;
        self.buffer_desync_detected = false;
    }

    /// Designated boundary for a field or application switch. Clears the
    /// same state as `reset`; kept separate so call sites say what happened.
    pub fn start_new_session(&mut self) {
        self.reset();
    }

    /// Host observed a focus change while this session may have content.
    pub fn notify_focus_changed(&mut self) {
        self.focus_changed_during_typing = true;
    }

    /// Host observed the cursor relocating (mouse click, arrow keys).
    pub fn reset_with_cursor_moved(&mut self) {
        self.reset();
        self.cursor_moved_since_reset = true;
    }

    fn clear_word_state(&mut self) {
        self.buffer.clear();
        self.macro_key.clear();
        self.temp_disabled = false;
    }

    /// Re-run the foreign-token check on the current entries. Overflow is
    /// deliberately excluded: stale overflow surviving a restore must not
    /// contaminate the check. Skipped once any transform has been applied,
    /// since modifier keystrokes in the raw text (w, s, digits) are not
    /// evidence of a foreign word.
    fn refresh_temp_disabled(&mut self) {
        let transformed = self
            .buffer
            .iter()
            .any(|e| e.tone().is_some() || e.shape().is_some());
        if transformed {
            return;
        }
        let raw = self.buffer.raw_input_string_from_entries(key_code_to_char);
        if looks_foreign(&raw) {
            self.temp_disabled = true;
        }
    }
}
