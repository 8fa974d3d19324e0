//! Roman-numeral parsing and resolution against a key.

use std::fmt;

use serde::Serialize;

use crate::diatonic::roman_for;
use crate::error::{HarmonyError, Result};
use crate::key::Key;
use crate::pitch::{self, PitchClass};
use crate::types::ChordKind;

/// Numerals in match order: longer spellings first so "vii" never reads as "v".
const NUMERALS: [(&str, u8); 7] = [
    ("VII", 7),
    ("III", 3),
    ("VI", 6),
    ("IV", 4),
    ("II", 2),
    ("V", 5),
    ("I", 1),
];

/// A scale-degree chord label such as "bVII7" or "iiø7".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RomanNumeral {
    /// Semitones relative to the diatonic degree, -2..=2
    pub accidental: i8,
    /// 1-7
    pub degree: u8,
    pub kind: ChordKind,
}

/// A Roman numeral made concrete in a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedChord {
    pub root: PitchClass,
    pub root_name: String,
    pub kind: ChordKind,
    pub symbol: String,
}

/// Prefix for a signed semitone shift, if it is writable.
pub fn accidental_prefix(semitones: i8) -> Option<&'static str> {
    match semitones {
        -2 => Some("bb"),
        -1 => Some("b"),
        0 => Some(""),
        1 => Some("#"),
        2 => Some("##"),
        _ => None,
    }
}

impl RomanNumeral {
    pub fn new(accidental: i8, degree: u8, kind: ChordKind) -> Result<Self> {
        if accidental_prefix(accidental).is_none() {
            return Err(HarmonyError::UnrepresentableAccidental {
                semitones: accidental,
            });
        }
        Ok(RomanNumeral {
            accidental,
            degree,
            kind,
        })
    }

    pub fn parse(text: &str) -> Option<RomanNumeral> {
        let text = text.trim();
        let (accidental, rest) = if let Some(r) = text.strip_prefix("bb") {
            (-2, r)
        } else if let Some(r) = text.strip_prefix('b') {
            (-1, r)
        } else if let Some(r) = text.strip_prefix("##") {
            (2, r)
        } else if let Some(r) = text.strip_prefix('#') {
            (1, r)
        } else {
            (0, text)
        };

        let (numeral, degree) = NUMERALS.iter().find_map(|(numeral, degree)| {
            let head = rest.get(..numeral.len())?;
            head.eq_ignore_ascii_case(numeral).then_some((head, *degree))
        })?;

        let upper = if numeral.chars().all(|c| c.is_ascii_uppercase()) {
            true
        } else if numeral.chars().all(|c| c.is_ascii_lowercase()) {
            false
        } else {
            return None;
        };

        let kind = kind_from_suffix(upper, &rest[numeral.len()..])?;
        Some(RomanNumeral {
            accidental,
            degree,
            kind,
        })
    }

    /// Same degree and accidental, seventh dropped.
    pub fn triad_form(&self) -> RomanNumeral {
        RomanNumeral {
            kind: self.kind.triad(),
            ..*self
        }
    }

    /// Concrete chord for this numeral in `key`.
    ///
    /// The root keeps the letter of its scale degree ("bVII" in C is Bb, not
    /// A#; "bVI" in Db is Bbb), so [`chord_numeral`](crate::analyze::chord_numeral)
    /// reads it back as the same numeral.
    pub fn resolve(&self, key: &Key) -> ResolvedChord {
        let index = (self.degree as usize + 6) % 7;
        let root = pitch::transpose(key.scale()[index], self.accidental as i32);
        let root_name = key.spell_root_on_degree(index, root);
        ResolvedChord {
            root,
            symbol: format!("{}{}", root_name, self.kind.suffix()),
            root_name,
            kind: self.kind,
        }
    }
}

fn kind_from_suffix(upper: bool, suffix: &str) -> Option<ChordKind> {
    let kind = if upper {
        match suffix {
            "" => ChordKind::Major,
            "7" => ChordKind::Dominant7,
            "maj7" => ChordKind::Major7,
            "+" => ChordKind::Augmented,
            "+7" => ChordKind::Augmented7,
            "+maj7" => ChordKind::AugmentedMajor7,
            _ => return None,
        }
    } else {
        match suffix {
            "" => ChordKind::Minor,
            "7" => ChordKind::Minor7,
            "maj7" => ChordKind::MinorMajor7,
            "°" | "o" => ChordKind::Diminished,
            "°7" | "o7" => ChordKind::Diminished7,
            "ø7" | "ø" => ChordKind::HalfDiminished7,
            _ => return None,
        }
    };
    Some(kind)
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = accidental_prefix(self.accidental).unwrap_or("");
        write!(f, "{}{}", prefix, roman_for(self.degree, self.kind))
    }
}

impl std::str::FromStr for RomanNumeral {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        RomanNumeral::parse(s).ok_or_else(|| HarmonyError::InvalidRoman(s.to_string()))
    }
}
