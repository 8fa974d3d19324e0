//! Substitution scoring weights.

use serde::{Deserialize, Serialize};

/// Weights for the substitution engine.
///
/// Defaults are the engine's stock constants; change them only to tune
/// ranking, not correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Added per pitch class a substitute shares with its target.
    /// Default: 2.0
    #[serde(default = "ScoringConfig::default_shared_tone_weight")]
    pub shared_tone_weight: f64,

    /// Same-function swaps sharing fewer tones are dropped.
    /// Default: 2
    #[serde(default = "ScoringConfig::default_min_shared_tones")]
    pub min_shared_tones: usize,

    /// Default: 1.0
    #[serde(default = "ScoringConfig::default_diatonic_bonus")]
    pub diatonic_bonus: f64,

    /// Default: 1.5
    #[serde(default = "ScoringConfig::default_secondary_dominant")]
    pub secondary_dominant: f64,

    /// Default: 1.0
    #[serde(default = "ScoringConfig::default_leading_tone")]
    pub leading_tone: f64,

    /// Default: 1.5
    #[serde(default = "ScoringConfig::default_tritone")]
    pub tritone: f64,

    /// Default: 1.0
    #[serde(default = "ScoringConfig::default_backdoor")]
    pub backdoor: f64,

    /// Base weight of chords borrowed from the parallel minor.
    /// Default: -0.5
    #[serde(default = "ScoringConfig::default_borrowed_penalty")]
    pub borrowed_penalty: f64,

    /// Default: 2.0
    #[serde(default = "ScoringConfig::default_harmonic_minor_dominant")]
    pub harmonic_minor_dominant: f64,

    /// Default: 0.0
    #[serde(default = "ScoringConfig::default_chromatic_approach")]
    pub chromatic_approach: f64,
}

impl ScoringConfig {
    fn default_shared_tone_weight() -> f64 {
        2.0
    }

    fn default_min_shared_tones() -> usize {
        2
    }

    fn default_diatonic_bonus() -> f64 {
        1.0
    }

    fn default_secondary_dominant() -> f64 {
        1.5
    }

    fn default_leading_tone() -> f64 {
        1.0
    }

    fn default_tritone() -> f64 {
        1.5
    }

    fn default_backdoor() -> f64 {
        1.0
    }

    fn default_borrowed_penalty() -> f64 {
        -0.5
    }

    fn default_harmonic_minor_dominant() -> f64 {
        2.0
    }

    fn default_chromatic_approach() -> f64 {
        0.0
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            shared_tone_weight: Self::default_shared_tone_weight(),
            min_shared_tones: Self::default_min_shared_tones(),
            diatonic_bonus: Self::default_diatonic_bonus(),
            secondary_dominant: Self::default_secondary_dominant(),
            leading_tone: Self::default_leading_tone(),
            tritone: Self::default_tritone(),
            backdoor: Self::default_backdoor(),
            borrowed_penalty: Self::default_borrowed_penalty(),
            harmonic_minor_dominant: Self::default_harmonic_minor_dominant(),
            chromatic_approach: Self::default_chromatic_approach(),
        }
    }
}
