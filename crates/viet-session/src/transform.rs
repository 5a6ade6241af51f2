//! Tone/shape application against the buffer, and the rendered-diff
//! machinery that turns a model mutation into a host outcome.

use viet_core::compose::{entry_char, render_chars};
use viet_core::entry::{ShapeMark, ToneMark};
use viet_core::keys::key_code_to_char;
use viet_core::keystroke::Keystroke;
use viet_core::placement::{reposition_tone, syllable, tone_target};

use crate::response::KeyOutcome;
use crate::InputSession;

/// Vowels a breve/horn trigger may land on.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ShapeTargets {
    /// Telex `w`: a → breve, o/u → horn, `uo` pair horns both.
    TelexW,
    /// VNI `7`: o/u → horn, `uo` pair horns both.
    Horn,
    /// VNI `8`: a → breve.
    Breve,
}

impl ShapeTargets {
    fn shape_for(self, base: char) -> Option<ShapeMark> {
        match (self, base) {
            (Self::TelexW | Self::Breve, 'a') => Some(ShapeMark::Breve),
            (Self::TelexW | Self::Horn, 'o' | 'u') => Some(ShapeMark::Horn),
            _ => None,
        }
    }

    fn pairs_uo(self) -> bool {
        matches!(self, Self::TelexW | Self::Horn)
    }
}

impl InputSession {
    /// Compare the buffer render against `before` and produce the outcome.
    ///
    /// `evicted` is the glyph of an entry pushed to overflow during the
    /// mutation: it stays on screen untouched, so it is re-anchored in
    /// front of the after-render before diffing. When the net effect is
    /// exactly the host typing `typed` at the end, the key passes through.
    fn outcome_since(
        &self,
        before: Vec<char>,
        evicted: Option<char>,
        typed: Option<char>,
    ) -> KeyOutcome {
        let mut after = render_chars(self.buffer.entries());
        if let Some(glyph) = evicted {
            after.insert(0, glyph);
        }
        let common = before
            .iter()
            .zip(after.iter())
            .take_while(|(b, a)| b == a)
            .count();
        let backspaces = before.len() - common;
        let output: String = after[common..].iter().collect();

        if backspaces == 0 {
            if output.is_empty() {
                return KeyOutcome::consumed();
            }
            if let Some(t) = typed {
                if output.chars().eq(std::iter::once(t)) {
                    return KeyOutcome::passthrough();
                }
            }
        }
        KeyOutcome::replace(backspaces, output)
    }

    fn render_now(&self) -> Vec<char> {
        render_chars(self.buffer.entries())
    }

    /// Ordinary character: new entry, tone repositioning if the nucleus
    /// grew, foreign-token check.
    pub(crate) fn append_plain(&mut self, key_code: u16, caps: bool, typed: char) -> KeyOutcome {
        let before = self.render_now();
        let evicted = self
            .buffer
            .append(key_code, caps)
            .as_ref()
            .and_then(entry_char);
        if viet_core::keys::is_vowel_code(key_code) {
            reposition_tone(self.buffer.entries_mut(), self.settings.modern_orthography);
        }
        self.refresh_temp_disabled();
        self.outcome_since(before, evicted, Some(typed))
    }

    /// Revert path shared by all modifiers: the repeated key undoes its own
    /// transform and lands as a literal character.
    fn append_literal(&mut self, before: Vec<char>, typed: char) -> KeyOutcome {
        let (code, caps) = match viet_core::keys::char_to_key_code(typed) {
            Some(pair) => pair,
            None => return self.outcome_since(before, None, None),
        };
        let evicted = self
            .buffer
            .append(code, caps)
            .as_ref()
            .and_then(entry_char);
        if viet_core::keys::is_vowel_code(code) {
            reposition_tone(self.buffer.entries_mut(), self.settings.modern_orthography);
        }
        self.refresh_temp_disabled();
        self.outcome_since(before, evicted, Some(typed))
    }

    pub(crate) fn handle_tone(
        &mut self,
        tone: ToneMark,
        keystroke: Keystroke,
        typed: char,
    ) -> KeyOutcome {
        let modern = self.settings.modern_orthography;
        let target = match tone_target(self.buffer.entries(), modern) {
            Some(t) => t,
            None => return self.append_plain(keystroke.code, keystroke.caps, typed),
        };
        let before = self.render_now();
        if self.buffer.entries()[target].tone() == Some(tone) {
            self.buffer.entries_mut()[target].set_tone(None);
            return self.append_literal(before, typed);
        }
        self.buffer.entries_mut()[target].set_tone(Some(tone));
        self.buffer.add_modifier_to_last(keystroke);
        self.outcome_since(before, None, None)
    }

    pub(crate) fn handle_tone_remove(&mut self, keystroke: Keystroke, typed: char) -> KeyOutcome {
        let toned = self
            .buffer
            .entries()
            .iter()
            .position(|e| e.tone().is_some());
        let Some(toned) = toned else {
            return self.append_plain(keystroke.code, keystroke.caps, typed);
        };
        let before = self.render_now();
        self.buffer.entries_mut()[toned].set_tone(None);
        self.buffer.add_modifier_to_last(keystroke);
        self.outcome_since(before, None, None)
    }

    pub(crate) fn handle_circumflex(
        &mut self,
        base: Option<u16>,
        keystroke: Keystroke,
        typed: char,
    ) -> KeyOutcome {
        let target = self.circumflex_target(base);
        let Some(target) = target else {
            return self.append_plain(keystroke.code, keystroke.caps, typed);
        };
        let before = self.render_now();
        match self.buffer.entries()[target].shape() {
            None => {
                self.buffer.entries_mut()[target].set_shape(Some(ShapeMark::Circumflex));
                self.buffer.add_modifier_to_last(keystroke);
                reposition_tone(self.buffer.entries_mut(), self.settings.modern_orthography);
                self.outcome_since(before, None, None)
            }
            Some(ShapeMark::Circumflex) => {
                self.buffer.entries_mut()[target].set_shape(None);
                self.append_literal(before, typed)
            }
            // Contradictory shape already applied: the key is a literal.
            Some(_) => self.append_plain(keystroke.code, keystroke.caps, typed),
        }
    }

    fn circumflex_target(&self, base: Option<u16>) -> Option<usize> {
        let syl = syllable(self.buffer.entries())?;
        syl.vowel_indices.iter().rev().copied().find(|&i| {
            let code = self.buffer.entries()[i].key_code();
            match base {
                Some(b) => code == b,
                None => matches!(key_code_to_char(code), Some('a' | 'e' | 'o')),
            }
        })
    }

    pub(crate) fn handle_shape(
        &mut self,
        targets: ShapeTargets,
        keystroke: Keystroke,
        typed: char,
    ) -> KeyOutcome {
        let entries = self.buffer.entries();
        let syl = syllable(entries);

        // uo at the end of the nucleus takes the horn on both vowels
        // (nước, tương).
        if targets.pairs_uo() {
            if let Some(syl) = &syl {
                let v = &syl.vowel_indices;
                if v.len() >= 2 {
                    let (iu, io) = (v[v.len() - 2], v[v.len() - 1]);
                    let is_uo = entries[iu].key_code() == b'u' as u16
                        && entries[io].key_code() == b'o' as u16;
                    if is_uo {
                        let shapes = (entries[iu].shape(), entries[io].shape());
                        match shapes {
                            (None, None) => {
                                let before = self.render_now();
                                let e = self.buffer.entries_mut();
                                e[iu].set_shape(Some(ShapeMark::Horn));
                                e[io].set_shape(Some(ShapeMark::Horn));
                                self.buffer.add_modifier_to_last(keystroke);
                                reposition_tone(
                                    self.buffer.entries_mut(),
                                    self.settings.modern_orthography,
                                );
                                return self.outcome_since(before, None, None);
                            }
                            (Some(ShapeMark::Horn), Some(ShapeMark::Horn)) => {
                                let before = self.render_now();
                                let e = self.buffer.entries_mut();
                                e[iu].set_shape(None);
                                e[io].set_shape(None);
                                return self.append_literal(before, typed);
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        let found = syl.as_ref().and_then(|syl| {
            syl.vowel_indices
                .iter()
                .rev()
                .copied()
                .find_map(|i| {
                    let base = key_code_to_char(self.buffer.entries()[i].key_code())?;
                    targets.shape_for(base).map(|shape| (i, shape))
                })
        });
        let Some((target, shape)) = found else {
            return self.append_plain(keystroke.code, keystroke.caps, typed);
        };

        let before = self.render_now();
        match self.buffer.entries()[target].shape() {
            None => {
                self.buffer.entries_mut()[target].set_shape(Some(shape));
                self.buffer.add_modifier_to_last(keystroke);
                reposition_tone(self.buffer.entries_mut(), self.settings.modern_orthography);
                self.outcome_since(before, None, None)
            }
            Some(applied) if applied == shape => {
                self.buffer.entries_mut()[target].set_shape(None);
                self.append_literal(before, typed)
            }
            Some(_) => self.append_plain(keystroke.code, keystroke.caps, typed),
        }
    }

    pub(crate) fn handle_stroke(
        &mut self,
        word_initial: bool,
        keystroke: Keystroke,
        typed: char,
    ) -> KeyOutcome {
        let target = if word_initial { 0 } else { self.buffer.len().wrapping_sub(1) };
        let is_d = self
            .buffer
            .get(target)
            .is_some_and(|e| e.key_code() == b'd' as u16);
        if !is_d {
            return self.append_plain(keystroke.code, keystroke.caps, typed);
        }
        let before = self.render_now();
        match self.buffer.entries()[target].shape() {
            None => {
                self.buffer.entries_mut()[target].set_shape(Some(ShapeMark::Stroke));
                self.buffer.add_modifier_to_last(keystroke);
                self.outcome_since(before, None, None)
            }
            Some(ShapeMark::Stroke) => {
                self.buffer.entries_mut()[target].set_shape(None);
                self.append_literal(before, typed)
            }
            Some(_) => self.append_plain(keystroke.code, keystroke.caps, typed),
        }
    }
}
