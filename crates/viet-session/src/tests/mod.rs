mod desync;

use std::sync::Arc;

use viet_core::keys::{char_to_key_code, key};
use viet_core::macros::MacroTable;
use viet_core::settings::{InputMethod, Settings};

use super::{InputSession, KeyOutcome};

pub(super) fn telex_session() -> InputSession {
    InputSession::new(Settings::default())
}

pub(super) fn vni_session() -> InputSession {
    InputSession::new(Settings {
        input_method: InputMethod::Vni,
        ..Settings::default()
    })
}

pub(super) fn make_test_macros() -> Arc<MacroTable> {
    Arc::new(MacroTable::from_entries([
        ("bb", "bạn bè"),
        ("vn", "Việt Nam"),
        ("a@", "anh@example.com"),
    ]))
}

/// Feed one typed character, routing it the way a host would: spaces and
/// punctuation end the word, everything else is an ordinary keystroke.
pub(super) fn feed(session: &mut InputSession, ch: char) -> KeyOutcome {
    if ch == ' ' || ch.is_ascii_punctuation() {
        return session.process_word_break(ch);
    }
    match char_to_key_code(ch) {
        Some((code, caps)) => session.process_key(ch, code, caps),
        None => session.process_word_break(ch),
    }
}

// Helper: simulate typing a string one character at a time
pub(super) fn type_str(session: &mut InputSession, s: &str) -> Vec<KeyOutcome> {
    s.chars().map(|ch| feed(session, ch)).collect()
}

pub(super) fn press_backspace(session: &mut InputSession) -> KeyOutcome {
    session.process_key('\u{8}', key::BACKSPACE, false)
}

/// Type a string into a fresh Telex session and return the composed word.
pub(super) fn telex_word(s: &str) -> String {
    let mut session = telex_session();
    type_str(&mut session, s);
    session.current_word()
}

pub(super) fn vni_word(s: &str) -> String {
    let mut session = vni_session();
    type_str(&mut session, s);
    session.current_word()
}
