//! Abbreviation macros: packed-trigger lookup and the TOML-backed table.

mod config;

pub use config::{parse_macros_toml, MacroConfigError};

use std::collections::HashMap;

use crate::keys::char_to_key_code;
use crate::keystroke::Keystroke;

/// Read path the engine uses to resolve a trigger. Storage and management
/// of macros stay with the host; the engine only ever calls `find`.
pub trait MacroLookup {
    /// Expansion for the given packed keystroke words, if registered.
    fn find(&self, key: &[u32]) -> Option<String>;
}

/// In-memory macro table keyed by packed trigger keystrokes.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    entries: HashMap<Vec<u32>, String>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut table = Self::new();
        for (trigger, expansion) in pairs {
            table.insert(trigger, expansion);
        }
        table
    }

    /// Register a trigger. Caps flags are derived from uppercase trigger
    /// characters; non-ASCII trigger characters are skipped.
    pub fn insert(&mut self, trigger: &str, expansion: &str) {
        let key = pack_trigger(trigger);
        if !key.is_empty() {
            self.entries.insert(key, expansion.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MacroLookup for MacroTable {
    fn find(&self, key: &[u32]) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Pack a trigger string the same way the session packs typed keystrokes.
pub fn pack_trigger(trigger: &str) -> Vec<u32> {
    trigger
        .chars()
        .filter_map(char_to_key_code)
        .map(|(code, caps)| Keystroke::new(code, caps).packed())
        .collect()
}
