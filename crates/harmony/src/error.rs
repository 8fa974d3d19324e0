use thiserror::Error;

/// Failures from the contract-style entry points.
///
/// Speculative parsers (keys, chord symbols, Roman numerals) return `Option`
/// instead; these variants are for callers that hand us already-validated
/// input and need to know which piece was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarmonyError {
    #[error("unknown note name '{0}'")]
    UnknownNote(String),

    #[error("invalid tonic '{0}'")]
    InvalidTonic(String),

    #[error("cannot read a key from '{0}'")]
    InvalidKey(String),

    #[error("'{0}' is not a diatonic chord of the key")]
    NotDiatonic(String),

    #[error("invalid Roman numeral '{0}'")]
    InvalidRoman(String),

    #[error("accidental of {semitones} semitones cannot be written on a Roman numeral")]
    UnrepresentableAccidental { semitones: i8 },
}

pub type Result<T> = std::result::Result<T, HarmonyError>;
