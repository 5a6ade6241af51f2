//! Glyph composition: effective key code + shape + tone + caps → one
//! precomposed display character.
//!
//! Every entry renders to exactly one char, which is what makes a single
//! host backspace remove a single visible glyph.

use crate::entry::{CharacterEntry, ShapeMark, ToneMark};
use crate::keys::key_code_to_char;

/// Shaped base glyph for a letter, or `None` when the pair is invalid
/// (breve only fits `a`, horn only `o`/`u`, stroke only `d`, ...).
pub fn shaped_vowel(base: char, shape: Option<ShapeMark>) -> Option<char> {
    match shape {
        None => Some(base),
        Some(ShapeMark::Circumflex) => match base {
            'a' => Some('â'),
            'e' => Some('ê'),
            'o' => Some('ô'),
            _ => None,
        },
        Some(ShapeMark::Breve) => match base {
            'a' => Some('ă'),
            _ => None,
        },
        Some(ShapeMark::Horn) => match base {
            'o' => Some('ơ'),
            'u' => Some('ư'),
            _ => None,
        },
        Some(ShapeMark::Stroke) => match base {
            'd' => Some('đ'),
            _ => None,
        },
    }
}

/// Apply one of the five tones to a (possibly shaped) vowel glyph.
/// Returns the glyph unchanged when it cannot carry a tone.
pub fn toned_vowel(glyph: char, tone: ToneMark) -> char {
    use ToneMark::{Acute, DotBelow, Grave, HookAbove, Tilde};
    let row: [char; 5] = match glyph {
        'a' => ['á', 'à', 'ả', 'ã', 'ạ'],
        'ă' => ['ắ', 'ằ', 'ẳ', 'ẵ', 'ặ'],
        'â' => ['ấ', 'ầ', 'ẩ', 'ẫ', 'ậ'],
        'e' => ['é', 'è', 'ẻ', 'ẽ', 'ẹ'],
        'ê' => ['ế', 'ề', 'ể', 'ễ', 'ệ'],
        'i' => ['í', 'ì', 'ỉ', 'ĩ', 'ị'],
        'o' => ['ó', 'ò', 'ỏ', 'õ', 'ọ'],
        'ô' => ['ố', 'ồ', 'ổ', 'ỗ', 'ộ'],
        'ơ' => ['ớ', 'ờ', 'ở', 'ỡ', 'ợ'],
        'u' => ['ú', 'ù', 'ủ', 'ũ', 'ụ'],
        'ư' => ['ứ', 'ừ', 'ử', 'ữ', 'ự'],
        'y' => ['ý', 'ỳ', 'ỷ', 'ỹ', 'ỵ'],
        other => return other,
    };
    match tone {
        Acute => row[0],
        Grave => row[1],
        HookAbove => row[2],
        Tilde => row[3],
        DotBelow => row[4],
    }
}

/// Composed display character for an entry. `None` when the key code does
/// not map to a printable character (e.g. the zero sentinel).
pub fn entry_char(entry: &CharacterEntry) -> Option<char> {
    let base = key_code_to_char(entry.key_code())?;
    let mut glyph = shaped_vowel(base, entry.shape()).unwrap_or(base);
    if let Some(tone) = entry.tone() {
        glyph = toned_vowel(glyph, tone);
    }
    if entry.caps() {
        glyph = glyph.to_uppercase().next().unwrap_or(glyph);
    }
    Some(glyph)
}

/// Render a run of entries to the display string, one char per entry.
pub fn render(entries: &[CharacterEntry]) -> String {
    entries.iter().filter_map(entry_char).collect()
}

/// Render to a char vector, for prefix-diffing against a previous render.
pub fn render_chars(entries: &[CharacterEntry]) -> Vec<char> {
    entries.iter().filter_map(entry_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ch: char, caps: bool, tone: Option<ToneMark>, shape: Option<ShapeMark>) -> CharacterEntry {
        let mut e = CharacterEntry::new(ch as u16, caps);
        e.set_tone(tone);
        e.set_shape(shape);
        e
    }

    #[test]
    fn test_shape_table() {
        assert_eq!(shaped_vowel('a', Some(ShapeMark::Circumflex)), Some('â'));
        assert_eq!(shaped_vowel('a', Some(ShapeMark::Breve)), Some('ă'));
        assert_eq!(shaped_vowel('o', Some(ShapeMark::Horn)), Some('ơ'));
        assert_eq!(shaped_vowel('u', Some(ShapeMark::Horn)), Some('ư'));
        assert_eq!(shaped_vowel('d', Some(ShapeMark::Stroke)), Some('đ'));
        assert_eq!(shaped_vowel('e', Some(ShapeMark::Breve)), None);
        assert_eq!(shaped_vowel('i', Some(ShapeMark::Circumflex)), None);
    }

    #[test]
    fn test_tone_table_covers_shaped_vowels() {
        assert_eq!(toned_vowel('a', ToneMark::Acute), 'á');
        assert_eq!(toned_vowel('ă', ToneMark::DotBelow), 'ặ');
        assert_eq!(toned_vowel('â', ToneMark::Grave), 'ầ');
        assert_eq!(toned_vowel('ê', ToneMark::Tilde), 'ễ');
        assert_eq!(toned_vowel('ơ', ToneMark::HookAbove), 'ở');
        assert_eq!(toned_vowel('ư', ToneMark::Acute), 'ứ');
        assert_eq!(toned_vowel('y', ToneMark::Grave), 'ỳ');
    }

    #[test]
    fn test_tone_passes_consonants_through() {
        assert_eq!(toned_vowel('t', ToneMark::Acute), 't');
    }

    #[test]
    fn test_entry_char_composition() {
        let e = entry('a', false, Some(ToneMark::Acute), Some(ShapeMark::Circumflex));
        assert_eq!(entry_char(&e), Some('ấ'));

        let caps = entry('d', true, None, Some(ShapeMark::Stroke));
        assert_eq!(entry_char(&caps), Some('Đ'));

        let toned_caps = entry('o', true, Some(ToneMark::DotBelow), Some(ShapeMark::Horn));
        assert_eq!(entry_char(&toned_caps), Some('Ợ'));
    }

    #[test]
    fn test_render_one_char_per_entry() {
        let entries = vec![
            entry('v', false, None, None),
            entry('i', false, None, None),
            entry('e', false, Some(ToneMark::DotBelow), Some(ShapeMark::Circumflex)),
            entry('t', false, None, None),
        ];
        assert_eq!(render(&entries), "việt");
        assert_eq!(render_chars(&entries).len(), entries.len());
    }
}
