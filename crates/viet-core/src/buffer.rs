//! Bounded buffer of character entries for the word being typed.
//!
//! The buffer never rejects input: appending past [`MAX_SIZE`] evicts the
//! oldest entry into a FIFO overflow area. Overflow content is excluded from
//! counts and from the entries-only raw-input accessor, and included only
//! where a caller explicitly asks for it.

use crate::entry::CharacterEntry;
use crate::keys::key;
use crate::keystroke::Keystroke;

/// Maximum number of live entries before the oldest spills to overflow.
pub const MAX_SIZE: usize = 32;

/// Immutable copy of a buffer's entries and overflow; the unit of
/// save/restore for the history stack.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSnapshot {
    entries: Vec<CharacterEntry>,
    overflow: Vec<CharacterEntry>,
}

impl BufferSnapshot {
    pub fn entries(&self) -> &[CharacterEntry] {
        &self.entries
    }

    pub fn overflow(&self) -> &[CharacterEntry] {
        &self.overflow
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn keystroke_count(&self) -> usize {
        self.entries.iter().map(CharacterEntry::keystroke_count).sum()
    }

    /// Key code of the first entry, or the zero sentinel when empty.
    pub fn first_key_code(&self) -> u16 {
        self.entries.first().map_or(0, CharacterEntry::key_code)
    }

    /// True iff the snapshot is a single space-key entry.
    pub fn is_space(&self) -> bool {
        self.entries.len() == 1 && self.first_key_code() == key::SPACE
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypingBuffer {
    entries: Vec<CharacterEntry>,
    overflow: Vec<CharacterEntry>,
}

impl TypingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }

    /// Append a new entry, evicting the oldest into overflow when full.
    /// Returns the evicted entry so callers can account for the glyph that
    /// stays on screen but leaves the live window.
    pub fn append(&mut self, key_code: u16, caps: bool) -> Option<CharacterEntry> {
        let evicted = if self.entries.len() == MAX_SIZE {
            let oldest = self.entries.remove(0);
            self.overflow.push(oldest.clone());
            Some(oldest)
        } else {
            None
        };
        self.entries.push(CharacterEntry::new(key_code, caps));
        evicted
    }

    /// Record a modifying keystroke on the last entry without creating a new
    /// slot. Silently a no-op on an empty buffer.
    pub fn add_modifier_to_last(&mut self, keystroke: Keystroke) {
        if let Some(last) = self.entries.last_mut() {
            last.push_modifier(keystroke);
        }
    }

    pub fn remove_last(&mut self) -> Option<CharacterEntry> {
        self.entries.pop()
    }

    /// Pop the most recent modifier keystroke off the last entry. Distinct
    /// from `remove_last`, which drops the whole display character.
    pub fn remove_last_modifier_from_last(&mut self) -> Option<Keystroke> {
        self.entries.last_mut().and_then(CharacterEntry::pop_modifier)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.overflow.clear();
    }

    /// Key code at `index`, or the zero sentinel when out of bounds.
    pub fn key_code_at(&self, index: usize) -> u16 {
        self.entries.get(index).map_or(0, CharacterEntry::key_code)
    }

    pub fn get(&self, index: usize) -> Option<&CharacterEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CharacterEntry> {
        self.entries.get_mut(index)
    }

    pub fn last(&self) -> Option<&CharacterEntry> {
        self.entries.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut CharacterEntry> {
        self.entries.last_mut()
    }

    pub fn entries(&self) -> &[CharacterEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [CharacterEntry] {
        &mut self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CharacterEntry> {
        self.entries.iter()
    }

    /// Sum of keystroke counts over current entries; overflow is excluded.
    pub fn total_keystroke_count(&self) -> usize {
        self.entries.iter().map(CharacterEntry::keystroke_count).sum()
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            entries: self.entries.clone(),
            overflow: self.overflow.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: &BufferSnapshot) {
        self.entries = snapshot.entries.clone();
        self.overflow = snapshot.overflow.clone();
    }

    /// Every entry's keystrokes flattened in buffer order (entries only).
    pub fn all_raw_keystrokes(&self) -> Vec<Keystroke> {
        self.entries
            .iter()
            .flat_map(CharacterEntry::all_keystrokes)
            .collect()
    }

    /// Literal typed text, overflow included.
    pub fn raw_input_string(&self, key_code_to_char: impl Fn(u16) -> Option<char>) -> String {
        Self::raw_string(
            self.overflow.iter().chain(self.entries.iter()),
            &key_code_to_char,
        )
    }

    /// Literal typed text from the current entries only. Overflow content
    /// surviving a restore can cause false matches in downstream text
    /// heuristics, so those callers use this accessor.
    pub fn raw_input_string_from_entries(
        &self,
        key_code_to_char: impl Fn(u16) -> Option<char>,
    ) -> String {
        Self::raw_string(self.entries.iter(), &key_code_to_char)
    }

    fn raw_string<'a>(
        entries: impl Iterator<Item = &'a CharacterEntry>,
        key_code_to_char: &impl Fn(u16) -> Option<char>,
    ) -> String {
        let mut out = String::new();
        for entry in entries {
            for ks in entry.all_keystrokes() {
                if let Some(ch) = key_code_to_char(ks.code) {
                    out.push(if ks.caps { ch.to_ascii_uppercase() } else { ch });
                }
            }
        }
        out
    }

    /// Rebuild the buffer from an externally-serialized packed-word array.
    /// Modifier keystrokes are not reconstructable from packed words, so
    /// each word becomes a single-keystroke entry.
    pub fn restore_from_legacy(&mut self, words: &[u32]) {
        self.clear();
        for &word in words {
            let entry = CharacterEntry::from_packed(word);
            if self.entries.len() == MAX_SIZE {
                self.overflow.push(self.entries.remove(0));
            }
            self.entries.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ShapeMark, ToneMark};
    use crate::keys::key_code_to_char;

    fn ks(ch: char) -> Keystroke {
        Keystroke::new(ch as u16, false)
    }

    #[test]
    fn test_append_and_remove() {
        let mut buf = TypingBuffer::new();
        assert!(buf.append(b'a' as u16, false).is_none());
        assert!(buf.append(b'b' as u16, true).is_none());
        assert_eq!(buf.len(), 2);

        let popped = buf.remove_last().unwrap();
        assert_eq!(popped.key_code(), b'b' as u16);
        assert!(popped.caps());
        assert_eq!(buf.len(), 1);

        buf.remove_last();
        assert!(buf.remove_last().is_none());
    }

    #[test]
    fn test_modifier_on_empty_is_noop() {
        let mut buf = TypingBuffer::new();
        buf.add_modifier_to_last(ks('s'));
        assert!(buf.is_empty());
        assert!(buf.remove_last_modifier_from_last().is_none());
    }

    #[test]
    fn test_out_of_bounds_returns_sentinel() {
        let mut buf = TypingBuffer::new();
        assert_eq!(buf.key_code_at(0), 0);
        buf.append(b'x' as u16, false);
        assert_eq!(buf.key_code_at(0), b'x' as u16);
        assert_eq!(buf.key_code_at(7), 0);
    }

    #[test]
    fn test_overflow_eviction() {
        let mut buf = TypingBuffer::new();
        for _ in 0..MAX_SIZE {
            assert!(buf.append(b'a' as u16, false).is_none());
        }
        assert!(!buf.has_overflow());

        let evicted = buf.append(b'b' as u16, false);
        assert!(evicted.is_some());
        assert!(buf.has_overflow());
        assert_eq!(buf.len(), MAX_SIZE);

        buf.append(b'c' as u16, false);
        let raw = buf.raw_input_string(key_code_to_char);
        assert_eq!(raw.len(), MAX_SIZE + 2);
        let raw_entries = buf.raw_input_string_from_entries(key_code_to_char);
        assert_eq!(raw_entries.len(), MAX_SIZE);
        assert!(raw_entries.ends_with("bc"));
    }

    #[test]
    fn test_total_keystroke_count_excludes_overflow() {
        let mut buf = TypingBuffer::new();
        for _ in 0..=MAX_SIZE {
            buf.append(b'a' as u16, false);
        }
        assert!(buf.has_overflow());
        assert_eq!(buf.total_keystroke_count(), MAX_SIZE);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut buf = TypingBuffer::new();
        buf.append(b'a' as u16, false);
        buf.last_mut().unwrap().set_shape(Some(ShapeMark::Circumflex));
        buf.add_modifier_to_last(ks('a'));
        buf.append(b'n' as u16, false);
        buf.last_mut().unwrap().set_tone(Some(ToneMark::Grave));

        let snap = buf.snapshot();
        let mut other = TypingBuffer::new();
        other.restore(&snap);

        assert_eq!(other.len(), buf.len());
        assert_eq!(other.total_keystroke_count(), buf.total_keystroke_count());
        for (a, b) in other.iter().zip(buf.iter()) {
            assert_eq!(a.packed(), b.packed());
        }
    }

    #[test]
    fn test_raw_keystrokes_flatten_in_order() {
        let mut buf = TypingBuffer::new();
        buf.append(b't' as u16, false);
        buf.append(b'o' as u16, false);
        buf.append(b'a' as u16, false);
        buf.append(b'n' as u16, false);
        buf.add_modifier_to_last(ks('s'));
        let raw: String = buf
            .all_raw_keystrokes()
            .iter()
            .filter_map(|k| key_code_to_char(k.code))
            .collect();
        assert_eq!(raw, "toans");
    }

    #[test]
    fn test_snapshot_is_space() {
        let mut buf = TypingBuffer::new();
        buf.append(crate::keys::key::SPACE, false);
        assert!(buf.snapshot().is_space());
        buf.append(b'a' as u16, false);
        assert!(!buf.snapshot().is_space());
        assert_eq!(buf.snapshot().first_key_code(), crate::keys::key::SPACE);
    }

    #[test]
    fn test_restore_from_legacy() {
        let mut src = TypingBuffer::new();
        src.append(b'd' as u16, true);
        src.last_mut().unwrap().set_shape(Some(ShapeMark::Stroke));
        src.append(b'i' as u16, false);
        src.last_mut().unwrap().set_tone(Some(ToneMark::DotBelow));
        let words: Vec<u32> = src.iter().map(|e| e.packed()).collect();

        let mut buf = TypingBuffer::new();
        buf.restore_from_legacy(&words);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(0).unwrap().shape(), Some(ShapeMark::Stroke));
        assert!(buf.get(0).unwrap().caps());
        assert_eq!(buf.get(1).unwrap().tone(), Some(ToneMark::DotBelow));
        assert_eq!(buf.total_keystroke_count(), 2);
    }
}
