//! Cheap structural check for tokens that are not Vietnamese.
//!
//! Judged on the literal typed letters (the overflow-excluding raw string),
//! not on composed glyphs, and on prefix validity so that suppression can
//! kick in before the word is finished. The engine stops transforming the
//! current word once this fires; a wrongly transformed English token is far
//! more annoying than a missed diacritic.

const ONSETS: &[&str] = &[
    "b", "c", "ch", "d", "g", "gh", "gi", "h", "k", "kh", "l", "m", "n", "ng", "ngh", "nh", "p",
    "ph", "qu", "r", "s", "t", "th", "tr", "v", "x",
];

const CODAS: &[&str] = &["c", "ch", "k", "m", "n", "ng", "nh", "p", "t"];

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

fn valid_onset(onset: &str, complete: bool) -> bool {
    if onset.is_empty() {
        return true;
    }
    if complete {
        ONSETS.contains(&onset)
    } else {
        ONSETS.iter().any(|o| o.starts_with(onset))
    }
}

fn valid_coda(coda: &str, complete: bool) -> bool {
    if coda.is_empty() {
        return true;
    }
    if complete {
        CODAS.contains(&coda)
    } else {
        CODAS.iter().any(|c| c.starts_with(coda))
    }
}

/// True when `word` cannot be (a prefix of) a Vietnamese syllable.
///
/// `word` is the raw typed text of the current entries, lowercased by the
/// caller or mixed-case; case is ignored here. Empty input is never foreign.
pub fn looks_foreign(word: &str) -> bool {
    let letters: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
    if letters.is_empty() {
        return false;
    }

    // Letters the Vietnamese alphabet lacks, or digits inside a word.
    if letters
        .iter()
        .any(|&c| matches!(c, 'f' | 'j' | 'w' | 'z') || c.is_ascii_digit())
    {
        return true;
    }
    if letters.iter().any(|&c| !c.is_ascii_alphabetic()) {
        return true;
    }

    let first_vowel = letters.iter().position(|&c| is_vowel(c));
    let onset_end = first_vowel.unwrap_or(letters.len());
    let onset: String = letters[..onset_end].iter().collect();
    if !valid_onset(&onset, first_vowel.is_some()) {
        return true;
    }
    let Some(first_vowel) = first_vowel else {
        // All consonants so far; a valid onset prefix may still grow into
        // a syllable.
        return false;
    };

    let mut i = first_vowel;
    while i < letters.len() && is_vowel(letters[i]) {
        i += 1;
    }

    let coda: String = letters[i..].iter().collect();
    if coda.chars().any(is_vowel) {
        // Letters resume after the coda (a second nucleus): multi-syllable
        // ASCII tokens like "code" or "into" are not a single Vietnamese
        // word.
        return true;
    }
    !valid_coda(&coda, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vietnamese_words_pass() {
        for w in ["", "t", "th", "thu", "thuo", "thuon", "thuong", "nghieng", "quan", "gi", "a"] {
            assert!(!looks_foreign(w), "{w} flagged as foreign");
        }
    }

    #[test]
    fn test_missing_letters_flag() {
        assert!(looks_foreign("few"));
        assert!(looks_foreign("jam"));
        assert!(looks_foreign("web"));
        assert!(looks_foreign("zoo"));
        assert!(looks_foreign("a1b"));
    }

    #[test]
    fn test_invalid_onset_flags_early() {
        assert!(looks_foreign("st"));
        assert!(looks_foreign("str"));
        assert!(looks_foreign("pr"));
        assert!(!looks_foreign("ng"));
        assert!(!looks_foreign("ngh"));
    }

    #[test]
    fn test_invalid_coda() {
        assert!(looks_foreign("tex"));
        assert!(looks_foreign("hello"));
        assert!(!looks_foreign("tin"));
        assert!(!looks_foreign("tinh"));
    }

    #[test]
    fn test_second_nucleus_flags() {
        assert!(looks_foreign("code"));
        assert!(looks_foreign("into"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(!looks_foreign("THuong"));
        assert!(looks_foreign("STR"));
    }
}
