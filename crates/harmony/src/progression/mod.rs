//! Curated chord progressions and the queries over them.

mod dataset;
mod matcher;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::mode::ModeFamily;

pub use dataset::PROGRESSIONS;
pub use matcher::{
    all_tags, filter_progressions, find_matching_progressions, next_chords_for_key,
    starting_chords, suggest_next_chords, transpose_progression, NextChordSuggestion,
    SequenceMatch, TransposedProgression,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordType {
    Triad,
    Seventh,
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordType::Triad => write!(f, "triad"),
            ChordType::Seventh => write!(f, "seventh"),
        }
    }
}

impl FromStr for ChordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "triad" | "triads" => Ok(ChordType::Triad),
            "seventh" | "sevenths" | "7" => Ok(ChordType::Seventh),
            _ => Err(format!("unknown chord type '{}'", s)),
        }
    }
}

/// A named progression. Roman numerals are relative to the family's home
/// mode; `weight` is a popularity prior in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progression {
    pub id: &'static str,
    pub name: &'static str,
    pub mode_family: ModeFamily,
    pub chord_type: ChordType,
    pub weight: f64,
    pub tags: &'static [&'static str],
    pub roman: &'static [&'static str],
}

impl Progression {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roman::RomanNumeral;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn dataset_ids_are_unique() {
        let ids: HashSet<_> = PROGRESSIONS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PROGRESSIONS.len());
    }

    #[test]
    fn dataset_numerals_parse_and_match_chord_type() {
        for p in PROGRESSIONS {
            assert!(!p.roman.is_empty(), "{}", p.id);
            assert!((0.0..=1.0).contains(&p.weight), "{}", p.id);
            for text in p.roman {
                let numeral = RomanNumeral::parse(text)
                    .unwrap_or_else(|| panic!("{}: bad numeral {}", p.id, text));
                assert_eq!(
                    numeral.kind.has_seventh(),
                    p.chord_type == ChordType::Seventh,
                    "{}: {}",
                    p.id,
                    text
                );
            }
        }
    }

    #[test]
    fn chord_type_from_str() {
        assert_eq!("triad".parse::<ChordType>().unwrap(), ChordType::Triad);
        assert_eq!("Sevenths".parse::<ChordType>().unwrap(), ChordType::Seventh);
        assert!("ninth".parse::<ChordType>().is_err());
    }
}
