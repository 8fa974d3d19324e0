use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, trace};

use super::{ChordType, Progression, PROGRESSIONS};
use crate::error::Result;
use crate::key::Key;
use crate::mode::{ModeFamily, ModeId};
use crate::roman::RomanNumeral;

/// A progression made concrete in one tonic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransposedProgression {
    pub id: String,
    pub name: String,
    pub tonic: String,
    pub roman: Vec<String>,
    pub chords: Vec<String>,
}

/// First place a query occurs inside a progression. `start..=end` indexes
/// into the progression's numerals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceMatch {
    pub progression_id: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextChordSuggestion {
    pub roman: String,
    pub chord: String,
    /// Sum of the weights of the progressions that voted for this numeral
    pub weight: f64,
    /// Number of progressions that voted for this numeral
    pub occurrences: usize,
}

/// Progressions of `family`, narrowed by tag (any tag matches) and chord
/// type, heaviest first.
pub fn filter_progressions(
    family: ModeFamily,
    tags: &[&str],
    chord_type: Option<ChordType>,
) -> Vec<&'static Progression> {
    let mut matches: Vec<&'static Progression> = PROGRESSIONS
        .iter()
        .filter(|p| p.mode_family == family)
        .filter(|p| chord_type.map_or(true, |ct| p.chord_type == ct))
        .filter(|p| tags.is_empty() || tags.iter().any(|t| p.has_tag(t)))
        .collect();
    matches.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    matches
}

/// Resolve every numeral of `progression` in `tonic`, using the family's
/// home mode.
pub fn transpose_progression(
    progression: &Progression,
    tonic: &str,
) -> Result<TransposedProgression> {
    let key = Key::new(tonic, progression.mode_family.home_mode())?;
    let chords = progression
        .roman
        .iter()
        .map(|text| -> Result<String> { Ok(text.parse::<RomanNumeral>()?.resolve(&key).symbol) })
        .collect::<Result<Vec<_>>>()?;

    Ok(TransposedProgression {
        id: progression.id.to_string(),
        name: progression.name.to_string(),
        tonic: key.tonic_name(),
        roman: progression.roman.iter().map(|r| r.to_string()).collect(),
        chords,
    })
}

/// Progressions in `pool` containing `query` as a contiguous run of
/// numerals, compared exactly. Only the first occurrence is reported.
pub fn find_matching_progressions<S: AsRef<str>>(
    query: &[S],
    pool: &[&Progression],
) -> Vec<SequenceMatch> {
    if query.is_empty() {
        return Vec::new();
    }

    pool.iter()
        .filter_map(|p| {
            let start = p.roman.windows(query.len()).position(|window| {
                window.iter().zip(query).all(|(a, b)| *a == b.as_ref())
            })?;
            Some(SequenceMatch {
                progression_id: p.id.to_string(),
                start,
                end: start + query.len() - 1,
            })
        })
        .collect()
}

/// Weighted vote for the chord that follows `sequence` in the dataset.
///
/// `tonic` and `mode` only pick the progression family and the key chords
/// are resolved in.
pub fn suggest_next_chords<S: AsRef<str>>(
    sequence: &[S],
    tonic: &str,
    mode: ModeId,
) -> Result<Vec<NextChordSuggestion>> {
    let key = Key::new(tonic, mode)?;
    Ok(next_chords_for_key(sequence, &key))
}

/// [`suggest_next_chords`] for an already-parsed key.
///
/// Numerals are compared in triad form so triad and seventh progressions
/// pool their evidence. If nothing follows the full sequence the oldest
/// chord is dropped and the vote retried; an empty sequence yields the
/// family's opening chords.
pub fn next_chords_for_key<S: AsRef<str>>(sequence: &[S], key: &Key) -> Vec<NextChordSuggestion> {
    let family = key.mode().family();
    let home = Key::from_parts(key.tonic(), family.home_mode());
    let query: Vec<String> = sequence.iter().map(|s| triad_text(s.as_ref())).collect();

    let pool: Vec<(&Progression, Vec<String>)> = PROGRESSIONS
        .iter()
        .filter(|p| p.mode_family == family)
        .map(|p| (p, p.roman.iter().map(|r| triad_text(r)).collect()))
        .collect();

    let mut suffix = query.as_slice();
    while !suffix.is_empty() {
        let mut votes = Votes::default();
        for (progression, numerals) in &pool {
            let followers: BTreeSet<&str> = numerals
                .windows(suffix.len() + 1)
                .filter(|w| w[..suffix.len()] == *suffix)
                .map(|w| w[suffix.len()].as_str())
                .collect();
            for roman in followers {
                votes.add(roman, progression.weight);
            }
        }

        if !votes.is_empty() {
            debug!(
                context = suffix.len(),
                candidates = votes.len(),
                "next-chord vote"
            );
            return votes.into_suggestions(&home);
        }
        trace!(context = suffix.len(), "no continuation, backing off");
        suffix = &suffix[1..];
    }

    opening_chords(&pool, &home)
}

/// Opening numerals of the `family` progressions, weighted.
pub fn starting_chords(family: ModeFamily, tonic: &str) -> Result<Vec<NextChordSuggestion>> {
    let key = Key::new(tonic, family.home_mode())?;
    let pool: Vec<(&Progression, Vec<String>)> = PROGRESSIONS
        .iter()
        .filter(|p| p.mode_family == family)
        .map(|p| (p, p.roman.iter().map(|r| triad_text(r)).collect()))
        .collect();
    Ok(opening_chords(&pool, &key))
}

/// Every tag used in the dataset, sorted.
pub fn all_tags() -> Vec<&'static str> {
    PROGRESSIONS
        .iter()
        .flat_map(|p| p.tags.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn opening_chords(pool: &[(&Progression, Vec<String>)], key: &Key) -> Vec<NextChordSuggestion> {
    let mut votes = Votes::default();
    for (progression, numerals) in pool {
        if let Some(first) = numerals.first() {
            votes.add(first, progression.weight);
        }
    }
    votes.into_suggestions(key)
}

fn triad_text(text: &str) -> String {
    RomanNumeral::parse(text)
        .map(|n| n.triad_form().to_string())
        .unwrap_or_else(|| text.to_string())
}

#[derive(Default)]
struct Votes(BTreeMap<String, (f64, usize)>);

impl Votes {
    fn add(&mut self, roman: &str, weight: f64) {
        let entry = self.0.entry(roman.to_string()).or_insert((0.0, 0));
        entry.0 += weight;
        entry.1 += 1;
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    /// Heaviest first; ties keep alphabetical order.
    fn into_suggestions(self, key: &Key) -> Vec<NextChordSuggestion> {
        let mut out: Vec<NextChordSuggestion> = self
            .0
            .into_iter()
            .map(|(roman, (weight, occurrences))| {
                let chord = RomanNumeral::parse(&roman)
                    .map(|n| n.resolve(key).symbol)
                    .unwrap_or_default();
                NextChordSuggestion {
                    roman,
                    chord,
                    weight,
                    occurrences,
                }
            })
            .collect();
        out.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        out
    }
}
