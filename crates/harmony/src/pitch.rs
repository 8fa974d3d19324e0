//! Pitch-class arithmetic and enharmonic spelling.
//!
//! Pitch classes are `u8` in `0..12` with C = 0. Everything that adds or
//! subtracts semitones goes through [`transpose`] so results stay normalized.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HarmonyError, Result};

pub type PitchClass = u8;

const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Major-key roots whose signatures are written with flats (Db, Eb, F, Ab, Bb).
///
/// F# / Gb (6) is left out: a natural tonic never lands there except as
/// B lydian, which reads as F# major.
pub static FLAT_MAJOR_ROOTS: [PitchClass; 5] = [1, 3, 5, 8, 10];

/// Shift a pitch class by a signed number of semitones, wrapping mod 12.
pub fn transpose(pc: PitchClass, semitones: i32) -> PitchClass {
    (pc as i32 + semitones).rem_euclid(12) as PitchClass
}

/// Signed distance from `from` to `to`, folded into `-5..=6`.
pub fn signed_interval(from: PitchClass, to: PitchClass) -> i8 {
    let up = (to as i32 - from as i32).rem_euclid(12);
    if up > 6 {
        (up - 12) as i8
    } else {
        up as i8
    }
}

/// Parse one of the canonical note spellings (natural, single sharp, single flat).
pub fn parse_note_name(name: &str) -> Result<PitchClass> {
    let trimmed = name.trim();
    NOTE_NAMES_SHARP
        .iter()
        .position(|n| *n == trimmed)
        .or_else(|| NOTE_NAMES_FLAT.iter().position(|n| *n == trimmed))
        .map(|idx| idx as PitchClass)
        .ok_or_else(|| HarmonyError::UnknownNote(name.to_string()))
}

/// Spell a pitch class. Total: the input is normalized mod 12 first.
pub fn note_name(pitch_class: i32, use_flats: bool) -> &'static str {
    let idx = pitch_class.rem_euclid(12) as usize;
    if use_flats {
        NOTE_NAMES_FLAT[idx]
    } else {
        NOTE_NAMES_SHARP[idx]
    }
}

/// Flat/sharp preference for a literal tonic string.
///
/// A written flat wins, then a written sharp, then the conventional flat-side
/// major tonics.
pub fn prefers_flats(tonic: &str) -> bool {
    match parse_root(tonic) {
        Some((note, _)) if note.accidental < 0 => true,
        Some((note, _)) if note.accidental > 0 => false,
        Some((note, _)) => FLAT_MAJOR_ROOTS.contains(&note.pitch_class()),
        None => false,
    }
}

/// Natural note letters, in scale order from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitone offset from C (0-11)
    pub fn to_semitone(self) -> PitchClass {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position in C D E F G A B.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The letter `steps` positions above this one, wrapping.
    pub fn step(self, steps: usize) -> Letter {
        Letter::ALL[(self.index() + steps) % 7]
    }

    /// Letter distance going upward, `0..7`.
    pub fn distance_to(self, other: Letter) -> usize {
        (other.index() + 7 - self.index()) % 7
    }

    /// Parse from a character (case-insensitive)
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }
}

/// A written note: letter plus signed accidental (-2..=2 in practice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpelledNote {
    pub letter: Letter,
    pub accidental: i8,
}

impl SpelledNote {
    pub fn new(letter: Letter, accidental: i8) -> Self {
        SpelledNote { letter, accidental }
    }

    pub fn pitch_class(&self) -> PitchClass {
        transpose(self.letter.to_semitone(), self.accidental as i32)
    }

    /// Spell `pc` on `letter` if it needs at most a single accidental.
    pub fn on_letter(letter: Letter, pc: PitchClass) -> Option<SpelledNote> {
        Self::on_letter_within(letter, pc, 1)
    }

    /// Spell `pc` on `letter` with up to `max` sharps or flats.
    pub fn on_letter_within(letter: Letter, pc: PitchClass, max: i8) -> Option<SpelledNote> {
        let accidental = signed_interval(letter.to_semitone(), pc);
        (-max..=max)
            .contains(&accidental)
            .then_some(SpelledNote { letter, accidental })
    }
}

impl fmt::Display for SpelledNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter.as_str())?;
        let mark = if self.accidental < 0 { "b" } else { "#" };
        for _ in 0..self.accidental.unsigned_abs() {
            f.write_str(mark)?;
        }
        Ok(())
    }
}

/// Read a root note off the front of `text`: a letter A-G (either case)
/// optionally followed by `#`, `b`, or the word `flat`.
///
/// Returns the note and the unconsumed remainder. Leading whitespace is
/// skipped; anything other than a note letter first fails.
pub fn parse_root(text: &str) -> Option<(SpelledNote, &str)> {
    let text = text.trim_start();
    let first = text.chars().next()?;
    let letter = Letter::from_char(first)?;
    let rest = &text[first.len_utf8()..];

    let spaced = rest.trim_start();
    if spaced
        .get(..4)
        .is_some_and(|word| word.eq_ignore_ascii_case("flat"))
    {
        return Some((SpelledNote::new(letter, -1), &spaced[4..]));
    }

    let (accidental, rest) = if let Some(r) = rest.strip_prefix('#') {
        (1, r)
    } else if let Some(r) = rest.strip_prefix('b') {
        (-1, r)
    } else {
        (0, rest)
    };

    Some((SpelledNote::new(letter, accidental), rest))
}

/// [`parse_root`] that also reads a doubled sign ("Bbb", "F##").
///
/// Chord roots keep the letter of their scale degree, so a flattened degree
/// that is already flat in the key is written with two flats. Keys never are.
pub fn parse_chord_root(text: &str) -> Option<(SpelledNote, &str)> {
    let (note, rest) = parse_root(text)?;
    let doubled = match note.accidental {
        1 => rest.strip_prefix('#'),
        -1 => rest.strip_prefix('b'),
        _ => None,
    };
    match doubled {
        Some(rest) => Some((SpelledNote::new(note.letter, note.accidental * 2), rest)),
        None => Some((note, rest)),
    }
}
