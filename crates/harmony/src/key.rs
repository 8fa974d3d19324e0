//! Free-text key parsing ("Em", "Bb major", "D dorian", "F#moll").
//!
//! The grammar is a heuristic inherited from how people actually type keys
//! into song sheets. Mode detection runs in a fixed precedence so that e.g.
//! "mixolydian" is never read as the bare-"m" minor shorthand.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{HarmonyError, Result};
use crate::mode::ModeId;
use crate::pitch::{self, note_name, PitchClass, SpelledNote, FLAT_MAJOR_ROOTS};

/// Keyword groups, checked in order. A keyword only counts at the start of a
/// word, so "lydian" inside "mixolydian" does not fire early.
const MODE_KEYWORDS: &[(&[&str], ModeId)] = &[
    (&["minor", "moll", "aeolian"], ModeId::Aeolian),
    (&["major", "dur", "ionian"], ModeId::Ionian),
    (&["dorian"], ModeId::Dorian),
    (&["phrygian", "frygisk"], ModeId::Phrygian),
    (&["lydian"], ModeId::Lydian),
    (&["mixolydian", "mixo"], ModeId::Mixolydian),
    (&["locrian", "lokrisk"], ModeId::Locrian),
];

/// A parsed key: tonic as written plus mode. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    tonic: SpelledNote,
    tonic_pc: PitchClass,
    mode: ModeId,
}

/// Parse a free-text key. Returns `None` when no tonic letter leads the text.
pub fn parse_key(text: &str) -> Option<Key> {
    let Some((tonic, remainder)) = pitch::parse_root(text.trim()) else {
        trace!(text, "key text does not start with a note letter");
        return None;
    };

    let mode = detect_mode(remainder);
    Some(Key::from_parts(tonic, mode))
}

fn detect_mode(remainder: &str) -> ModeId {
    let trimmed = remainder.trim();

    match trimmed {
        "m" => return ModeId::Aeolian,
        "M" => return ModeId::Ionian,
        _ => {}
    }

    let lower = trimmed.to_lowercase();
    for (keywords, mode) in MODE_KEYWORDS {
        if keywords.iter().any(|kw| contains_word_start(&lower, kw)) {
            return *mode;
        }
    }

    if has_bare_minor_m(trimmed) {
        return ModeId::Aeolian;
    }

    ModeId::Ionian
}

/// True when `needle` occurs in `haystack` at offset 0 or after a non-letter.
fn contains_word_start(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(idx, _)| {
        haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphabetic())
    })
}

/// Lowercase `m` that is not the start of "maj" or "mix" ("Fm7", "Am add9").
fn has_bare_minor_m(text: &str) -> bool {
    text.match_indices('m').any(|(idx, _)| {
        let follow = text[idx + 1..].to_lowercase();
        !(follow.starts_with("aj") || follow.starts_with("ix"))
    })
}

impl Key {
    /// Build a key from a bare tonic ("F#", "Bb") and an explicit mode.
    pub fn new(tonic: &str, mode: ModeId) -> Result<Key> {
        match pitch::parse_root(tonic) {
            Some((note, rest)) if rest.trim().is_empty() => Ok(Key::from_parts(note, mode)),
            _ => Err(HarmonyError::InvalidTonic(tonic.to_string())),
        }
    }

    pub(crate) fn from_parts(tonic: SpelledNote, mode: ModeId) -> Key {
        Key {
            tonic,
            tonic_pc: tonic.pitch_class(),
            mode,
        }
    }

    pub fn tonic(&self) -> SpelledNote {
        self.tonic
    }

    pub fn tonic_pc(&self) -> PitchClass {
        self.tonic_pc
    }

    pub fn mode(&self) -> ModeId {
        self.mode
    }

    /// Pitch class of the major key sharing this key's signature.
    pub fn relative_major(&self) -> PitchClass {
        pitch::transpose(
            self.tonic_pc,
            -(self.mode.def().relative_major_offset as i32),
        )
    }

    /// Flat/sharp spelling preference.
    ///
    /// A written accidental on the tonic decides, in every mode: "Db dorian"
    /// spells with flats even though its relative major is B. A natural
    /// tonic defers to the relative major, so G aeolian spells like Bb major.
    pub fn use_flats(&self) -> bool {
        match self.tonic.accidental {
            a if a < 0 => true,
            a if a > 0 => false,
            _ => FLAT_MAJOR_ROOTS.contains(&self.relative_major()),
        }
    }

    /// Pitch classes of degrees 1-7.
    pub fn scale(&self) -> [PitchClass; 7] {
        let intervals = self.mode.intervals();
        std::array::from_fn(|i| pitch::transpose(self.tonic_pc, intervals[i] as i32))
    }

    /// One letter per degree, starting from the tonic's letter.
    ///
    /// Degrees that would need a double accidental fall back to the plain
    /// enharmonic name in the key's flat/sharp preference.
    pub fn scale_spelling(&self) -> [String; 7] {
        let scale = self.scale();
        std::array::from_fn(|i| self.spell_on_degree(i, scale[i]))
    }

    /// Spell `pc` on the letter of scale degree `index` (0-based) if a
    /// single accidental suffices.
    pub fn spell_on_degree(&self, index: usize, pc: PitchClass) -> String {
        let letter = self.tonic.letter.step(index);
        match SpelledNote::on_letter(letter, pc) {
            Some(note) => note.to_string(),
            None => note_name(pc as i32, self.use_flats()).to_string(),
        }
    }

    /// Spell a chord root on the letter of scale degree `index` (0-based),
    /// allowing a double accidental ("Bbb" for bVI in Db) so the root reads
    /// back as the same degree.
    pub fn spell_root_on_degree(&self, index: usize, pc: PitchClass) -> String {
        let letter = self.tonic.letter.step(index);
        match SpelledNote::on_letter_within(letter, pc, 2) {
            Some(note) => note.to_string(),
            None => note_name(pc as i32, self.use_flats()).to_string(),
        }
    }

    pub fn tonic_name(&self) -> String {
        self.tonic.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}
