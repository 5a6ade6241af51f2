//! LIFO stack of committed word units and synthetic space runs.
//!
//! Pop order is how individual backspaces map to "restore one unit", so the
//! stack must reconstruct the exact reverse-chronological sequence of
//! committed units no matter which engine path saved them. Units are never
//! coalesced: a space run and a word are always distinct stack entries.

use crate::buffer::BufferSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryUnit {
    Word(BufferSnapshot),
    Spaces(u32),
}

#[derive(Debug, Clone, Default)]
pub struct TypingHistory {
    units: Vec<HistoryUnit>,
}

impl TypingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a committed word unit.
    pub fn save(&mut self, snapshot: BufferSnapshot) {
        self.units.push(HistoryUnit::Word(snapshot));
    }

    /// Push a synthetic run of consecutive spaces. Zero-length runs are
    /// dropped rather than pushed as empty units.
    pub fn save_spaces(&mut self, count: u32) {
        if count > 0 {
            self.units.push(HistoryUnit::Spaces(count));
        }
    }

    pub fn pop_last(&mut self) -> Option<HistoryUnit> {
        self.units.pop()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Most recent unit without popping it.
    pub fn last(&self) -> Option<&HistoryUnit> {
        self.units.last()
    }
}
