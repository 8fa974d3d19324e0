//! The seven diatonic chords of a key.

use tracing::trace;

use crate::error::Result;
use crate::key::Key;
use crate::mode::ModeId;
use crate::pitch::{self, PitchClass};
use crate::types::{ChordKind, DiatonicChord, HarmonicFunction};

pub const ROMAN_NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Degree-by-degree function table shared by every mode (index = degree - 1).
const BASE_FUNCTIONS: [HarmonicFunction; 7] = [
    HarmonicFunction::Tonic,
    HarmonicFunction::Predominant,
    HarmonicFunction::Tonic,
    HarmonicFunction::Predominant,
    HarmonicFunction::Dominant,
    HarmonicFunction::Tonic,
    HarmonicFunction::Dominant,
];

/// Per-mode exceptions to `BASE_FUNCTIONS`.
const FUNCTION_OVERRIDES: &[(ModeId, u8, HarmonicFunction)] = &[
    (ModeId::Dorian, 4, HarmonicFunction::Subdominant),
    (ModeId::Dorian, 6, HarmonicFunction::Variable),
    (ModeId::Dorian, 7, HarmonicFunction::Subdominant),
    (ModeId::Phrygian, 2, HarmonicFunction::Dominant),
    (ModeId::Phrygian, 7, HarmonicFunction::Subdominant),
    (ModeId::Lydian, 2, HarmonicFunction::Variable),
    (ModeId::Lydian, 4, HarmonicFunction::Variable),
    (ModeId::Mixolydian, 3, HarmonicFunction::Dominant),
    (ModeId::Mixolydian, 7, HarmonicFunction::Subdominant),
    (ModeId::Aeolian, 7, HarmonicFunction::Subdominant),
    (ModeId::Locrian, 1, HarmonicFunction::Variable),
    (ModeId::Locrian, 5, HarmonicFunction::Variable),
    (ModeId::HarmonicMinor, 3, HarmonicFunction::Variable),
];

/// Harmonic function of `degree` (1-7) in `mode`.
pub fn harmonic_function(mode: ModeId, degree: u8) -> HarmonicFunction {
    FUNCTION_OVERRIDES
        .iter()
        .find(|(m, d, _)| *m == mode && *d == degree)
        .map(|(_, _, f)| *f)
        .unwrap_or_else(|| BASE_FUNCTIONS[(degree as usize + 6) % 7])
}

/// Roman numeral for a chord of `kind` on `degree` (1-7), without accidental.
pub fn roman_for(degree: u8, kind: ChordKind) -> String {
    let numeral = ROMAN_NUMERALS[(degree as usize + 6) % 7];
    let numeral = if kind.quality().is_upper() {
        numeral.to_string()
    } else {
        numeral.to_lowercase()
    };
    format!("{}{}", numeral, kind.roman_suffix())
}

/// Build the diatonic chords of `tonic` in `mode`.
///
/// The tonic must be a bare note name ("F#", "Bb", "E flat").
pub fn build_diatonic_chords(
    tonic: &str,
    mode: ModeId,
    include_sevenths: bool,
) -> Result<Vec<DiatonicChord>> {
    let key = Key::new(tonic, mode)?;
    Ok(diatonic_chords(&key, include_sevenths))
}

/// The seven stacked-third chords on each degree of `key`.
pub fn diatonic_chords(key: &Key, include_sevenths: bool) -> Vec<DiatonicChord> {
    let scale = key.scale();
    let spelling = key.scale_spelling();

    let chords: Vec<DiatonicChord> = (0..7)
        .map(|i| {
            let root = scale[i];
            let third = interval_above(root, scale[(i + 2) % 7]);
            let fifth = interval_above(root, scale[(i + 4) % 7]);
            let seventh = include_sevenths.then(|| interval_above(root, scale[(i + 6) % 7]));

            let kind = ChordKind::from_intervals(third, fifth, seventh);
            let degree = (i + 1) as u8;
            let root_name = spelling[i].clone();

            DiatonicChord {
                degree,
                roman_numeral: roman_for(degree, kind),
                symbol: format!("{}{}", root_name, kind.suffix()),
                root_name,
                kind,
                quality: kind.quality(),
                harmonic_function: harmonic_function(key.mode(), degree),
                tones: kind.tones(root),
            }
        })
        .collect();

    trace!(key = %key, sevenths = include_sevenths, "built diatonic chords");
    chords
}

fn interval_above(root: PitchClass, note: PitchClass) -> u8 {
    pitch::transpose(note, -(root as i32))
}
