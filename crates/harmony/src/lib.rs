pub mod analyze;
pub mod diatonic;
pub mod error;
pub mod key;
pub mod mode;
pub mod pitch;
pub mod progression;
pub mod roman;
pub mod substitution;
pub mod types;

pub use analyze::{
    chord_degree, chord_numeral, get_chord_degree, match_diatonic_chord,
    next_chord_suggestions_from_sequence, parse_chord_symbol, ChordProfile, ChordSymbol,
    Extension, SequenceSuggestion, SuggestionOptions,
};
pub use diatonic::{build_diatonic_chords, diatonic_chords, harmonic_function};
pub use error::{HarmonyError, Result};
pub use key::{parse_key, Key};
pub use mode::{ModeFamily, ModeId};
pub use pitch::{note_name, parse_note_name, prefers_flats, PitchClass};
pub use progression::{
    all_tags, filter_progressions, find_matching_progressions, starting_chords,
    suggest_next_chords, transpose_progression, ChordType, NextChordSuggestion, Progression,
    SequenceMatch, TransposedProgression, PROGRESSIONS,
};
pub use roman::{ResolvedChord, RomanNumeral};
pub use substitution::{
    suggest_substitutions, suggest_substitutions_with, SubstitutionCandidate,
    SubstitutionCategory, SubstitutionContext, SubstitutionWeights,
};
pub use types::{ChordKind, ChordQuality, DiatonicChord, HarmonicFunction};

use tracing::debug;

/// Key-bound front end over the analysis functions.
///
/// Holds one parsed key, its diatonic chords and the configured scoring
/// weights so callers can ask several questions without re-parsing.
#[derive(Debug, Clone)]
pub struct HarmonyEngine {
    key: Key,
    chords: Vec<DiatonicChord>,
    weights: SubstitutionWeights,
}

impl HarmonyEngine {
    /// Engine for free-text `key_text` ("Em", "Bb dorian").
    pub fn new(key_text: &str, include_sevenths: bool) -> Result<Self> {
        let key =
            parse_key(key_text).ok_or_else(|| HarmonyError::InvalidKey(key_text.to_string()))?;
        Ok(Self::for_key(key, include_sevenths))
    }

    pub fn for_key(key: Key, include_sevenths: bool) -> Self {
        let chords = diatonic_chords(&key, include_sevenths);
        debug!(key = %key, sevenths = include_sevenths, "harmony engine ready");
        Self {
            key,
            chords,
            weights: SubstitutionWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: SubstitutionWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn chords(&self) -> &[DiatonicChord] {
        &self.chords
    }

    /// Diatonic chord named by `symbol` or Roman numeral `text`.
    pub fn find_chord(&self, text: &str) -> Option<&DiatonicChord> {
        if let Some(chord) = self
            .chords
            .iter()
            .find(|c| c.roman_numeral == text || c.symbol == text)
        {
            return Some(chord);
        }
        if let Some(numeral) = RomanNumeral::parse(text) {
            return self
                .chords
                .iter()
                .find(|c| numeral.accidental == 0 && c.degree == numeral.degree);
        }
        match_diatonic_chord(text, &self.key, &self.chords)
    }

    /// Ranked substitutes for the diatonic chord `target`, optionally
    /// followed by `next`.
    pub fn substitutions(
        &self,
        target: &str,
        next: Option<&str>,
    ) -> Result<Vec<SubstitutionCandidate>> {
        let chord = self
            .find_chord(target)
            .ok_or_else(|| HarmonyError::NotDiatonic(target.to_string()))?;
        let next_chord = match next {
            Some(text) => Some(
                self.find_chord(text)
                    .ok_or_else(|| HarmonyError::NotDiatonic(text.to_string()))?,
            ),
            None => None,
        };

        let ctx = SubstitutionContext {
            key: &self.key,
            chord,
            all_chords: &self.chords,
            next_chord,
        };
        Ok(suggest_substitutions_with(&ctx, &self.weights))
    }

    pub fn degree_of(&self, symbol: &str) -> Option<String> {
        chord_degree(symbol, &self.key)
    }

    pub fn suggest_after<S: AsRef<str>>(
        &self,
        symbols: &[S],
        options: &SuggestionOptions,
    ) -> Vec<SequenceSuggestion> {
        next_chord_suggestions_from_sequence(symbols, &self.key, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn engine_finds_chords_by_symbol_or_numeral() {
        let engine = HarmonyEngine::new("C", true).unwrap();
        assert_eq!(engine.find_chord("G7").map(|c| c.degree), Some(5));
        assert_eq!(engine.find_chord("V7").map(|c| c.degree), Some(5));
        assert_eq!(engine.find_chord("V").map(|c| c.degree), Some(5));
        assert_eq!(engine.find_chord("Dm").map(|c| c.degree), Some(2));
        assert!(engine.find_chord("bVII").is_none());
    }

    #[test]
    fn engine_substitutions() {
        let engine = HarmonyEngine::new("C", true).unwrap();
        let subs = engine.substitutions("G7", Some("Cmaj7")).unwrap();
        assert!(subs.iter().any(|c| c.substitute_symbol == "Db7"));
        assert_eq!(
            engine.substitutions("F#7", None),
            Err(HarmonyError::NotDiatonic("F#7".to_string()))
        );
    }

    #[test]
    fn engine_rejects_bad_key() {
        assert!(HarmonyEngine::new("nonsense", false).is_err());
    }
}
