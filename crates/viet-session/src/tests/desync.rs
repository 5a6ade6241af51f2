use std::sync::Arc;

use super::*;
use crate::FieldVerifier;

/// Verifier with a fixed answer, standing in for a host accessibility query.
struct FixedField(Option<&'static str>);

impl FieldVerifier for FixedField {
    fn trailing_text(&self) -> Option<String> {
        self.0.map(str::to_string)
    }
}

#[test]
fn test_focus_change_without_verifier_blocks_restore() {
    let mut session = telex_session();
    type_str(&mut session, "xin ");
    session.notify_focus_changed();

    press_backspace(&mut session);
    let outcome = press_backspace(&mut session);
    assert!(!outcome.consumed);
    assert!(session.buffer_desync_detected());
    assert_eq!(session.index(), 0);

    // history is gone, nothing ever comes back
    let outcome = press_backspace(&mut session);
    assert!(!outcome.consumed);
    assert_eq!(session.index(), 0);
}

#[test]
fn test_focus_change_with_matching_field_restores() {
    let verifier = Arc::new(FixedField(Some("xin")));
    let mut session = telex_session().with_verifier(verifier);
    type_str(&mut session, "xin ");
    session.notify_focus_changed();

    press_backspace(&mut session);
    let outcome = press_backspace(&mut session);
    assert!(outcome.consumed);
    assert_eq!(session.current_word(), "xin");
    assert!(!session.buffer_desync_detected());
}

#[test]
fn test_focus_change_with_mismatched_field_flags_desync() {
    let verifier = Arc::new(FixedField(Some("something else")));
    let mut session = telex_session().with_verifier(verifier);
    type_str(&mut session, "xin ");
    session.notify_focus_changed();

    press_backspace(&mut session);
    let outcome = press_backspace(&mut session);
    assert!(!outcome.consumed);
    assert!(session.buffer_desync_detected());
    assert_eq!(session.index(), 0);
}

#[test]
fn test_verifier_with_no_answer_blocks_restore() {
    let verifier = Arc::new(FixedField(None));
    let mut session = telex_session().with_verifier(verifier);
    type_str(&mut session, "xin ");
    session.notify_focus_changed();

    press_backspace(&mut session);
    let outcome = press_backspace(&mut session);
    assert!(!outcome.consumed);
    assert!(session.buffer_desync_detected());
}

#[test]
fn test_backspace_into_unknown_territory_sets_cursor_moved() {
    let mut session = telex_session();
    let outcome = press_backspace(&mut session);
    assert!(!outcome.consumed);
    assert!(session.cursor_moved_since_reset());
}

#[test]
fn test_cursor_moved_blocks_later_restores() {
    let mut session = telex_session();
    press_backspace(&mut session);
    assert!(session.cursor_moved_since_reset());

    type_str(&mut session, "an ");
    press_backspace(&mut session);
    let outcome = press_backspace(&mut session);
    assert!(!outcome.consumed);
    assert_eq!(session.index(), 0);
}

#[test]
fn test_reset_clears_everything() {
    let mut session = telex_session();
    type_str(&mut session, "vieetj nam");
    session.notify_focus_changed();
    session.reset();

    assert_eq!(session.index(), 0);
    assert_eq!(session.current_word(), "");
    assert_eq!(session.space_count(), 0);
    assert!(!session.cursor_moved_since_reset());
    assert!(!session.buffer_desync_detected());
}

#[test]
fn test_reset_with_cursor_moved_keeps_the_flag() {
    let mut session = telex_session();
    type_str(&mut session, "an ");
    session.reset_with_cursor_moved();
    assert!(session.cursor_moved_since_reset());
    assert_eq!(session.index(), 0);

    session.reset();
    assert!(!session.cursor_moved_since_reset());
}

#[test]
fn test_new_session_boundary_drops_history() {
    let mut session = telex_session();
    type_str(&mut session, "an ");
    session.start_new_session();

    let outcome = press_backspace(&mut session);
    assert!(!outcome.consumed);
    assert_eq!(session.index(), 0);
}
