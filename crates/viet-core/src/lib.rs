//! Value types and pure algorithms for Vietnamese keystroke transduction.
//!
//! Everything here is session-free: the packed keystroke and character-entry
//! types, the bounded typing buffer with its overflow spill area, the
//! word-unit history stack, the glyph composition tables, the tone placement
//! rules, the foreign-token heuristic, and the macro/settings configuration
//! layer. The stateful per-context engine lives in `viet-session`.

pub mod buffer;
pub mod compose;
pub mod entry;
pub mod history;
pub mod keys;
pub mod keystroke;
pub mod macros;
pub mod placement;
pub mod settings;
pub mod spelling;
