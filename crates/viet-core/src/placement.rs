//! Tone placement: which vowel of a syllable carries the tone diacritic.
//!
//! A Vietnamese syllable carries its tone on exactly one vowel of the
//! trailing vowel nucleus. The choice depends on the cluster, on whether a
//! trailing consonant follows, and for the `uy` cluster on the orthography
//! convention in effect. Syllables with a trailing consonant are
//! unambiguous and orthography-invariant.

use tracing::debug;

use crate::entry::CharacterEntry;
use crate::keys::{is_vowel_code, key_code_to_char};

/// The trailing vowel nucleus of the entry run: entry indices of the
/// nucleus vowels plus whether consonants follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllable {
    pub vowel_indices: Vec<usize>,
    pub has_trailing_consonant: bool,
}

/// Locate the nucleus. The `u` of a leading `qu` and the `i` of a leading
/// `gi` act as part of the onset, not the nucleus, when more vowels follow.
pub fn syllable(entries: &[CharacterEntry]) -> Option<Syllable> {
    let last_vowel = entries
        .iter()
        .rposition(|e| is_vowel_code(e.key_code()))?;
    let mut start = last_vowel;
    while start > 0 && is_vowel_code(entries[start - 1].key_code()) {
        start -= 1;
    }

    let mut indices: Vec<usize> = (start..=last_vowel).collect();

    // qu / gi onsets: drop the glide vowel from the nucleus.
    if indices.len() > 1 && start > 0 {
        let onset = key_code_to_char(entries[start - 1].key_code());
        let first = key_code_to_char(entries[start].key_code());
        match (onset, first) {
            (Some('q'), Some('u')) | (Some('g'), Some('i')) => {
                indices.remove(0);
            }
            _ => {}
        }
    }

    Some(Syllable {
        has_trailing_consonant: last_vowel + 1 < entries.len(),
        vowel_indices: indices,
    })
}

/// Entry index that should carry the tone, or `None` when the run has no
/// vowel to carry one.
pub fn tone_target(entries: &[CharacterEntry], modern_orthography: bool) -> Option<usize> {
    let syl = syllable(entries)?;
    let v = &syl.vowel_indices;

    if v.len() == 1 {
        return Some(v[0]);
    }

    // A circumflexed, breved, or horned vowel always takes the tone,
    // regardless of orthography mode. With two shaped vowels (ươ) the
    // second one carries it.
    if let Some(&shaped) = v.iter().filter(|&&i| entries[i].shape().is_some()).last() {
        return Some(shaped);
    }

    let cluster: String = v
        .iter()
        .filter_map(|&i| key_code_to_char(entries[i].key_code()))
        .collect();

    if syl.has_trailing_consonant {
        return v.last().copied();
    }

    match cluster.as_str() {
        // oa takes the second vowel under both conventions.
        "oa" => Some(v[1]),
        // uy diverges: modern puts the tone on the final vowel, the old
        // convention on the first (only in open syllables; the trailing
        // consonant case never reaches here).
        "uy" => Some(if modern_orthography { v[1] } else { v[0] }),
        // Default open-syllable rule: penultimate vowel (ai → a, uou → o).
        _ => Some(v[v.len() - 2]),
    }
}

/// Move an applied tone to the computed target after the syllable changed
/// shape (a vowel was appended or a shape mark landed). Returns `true` when
/// a tone actually moved. Flags other than the tone are preserved on both
/// entries.
pub fn reposition_tone(entries: &mut [CharacterEntry], modern_orthography: bool) -> bool {
    let current = match entries.iter().position(|e| e.tone().is_some()) {
        Some(i) => i,
        None => return false,
    };
    let target = match tone_target(entries, modern_orthography) {
        Some(i) => i,
        None => return false,
    };
    if target == current {
        return false;
    }
    let tone = entries[current].tone();
    entries[current].set_tone(None);
    entries[target].set_tone(tone);
    debug!(from = current, to = target, "tone repositioned");
    true
}
