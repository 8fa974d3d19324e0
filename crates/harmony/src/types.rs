use serde::{Deserialize, Serialize};

use crate::pitch::{self, PitchClass};

/// Triad-level quality of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    HalfDiminished,
}

impl ChordQuality {
    /// Quality from the third and fifth above the root, in semitones.
    pub fn from_intervals(third: u8, fifth: u8) -> Self {
        match (third, fifth) {
            (4, 7) => ChordQuality::Major,
            (3, 7) => ChordQuality::Minor,
            (3, 6) => ChordQuality::Diminished,
            _ => ChordQuality::Augmented,
        }
    }

    /// Uppercase Roman numerals are used for major and augmented chords.
    pub fn is_upper(&self) -> bool {
        matches!(self, ChordQuality::Major | ChordQuality::Augmented)
    }
}

impl std::fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChordQuality::Major => write!(f, "major"),
            ChordQuality::Minor => write!(f, "minor"),
            ChordQuality::Diminished => write!(f, "diminished"),
            ChordQuality::Augmented => write!(f, "augmented"),
            ChordQuality::HalfDiminished => write!(f, "half-diminished"),
        }
    }
}

/// Full chord kind: triad quality plus optional seventh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordKind {
    Major,
    Minor,
    Diminished,
    Augmented,
    Dominant7,
    Major7,
    Minor7,
    /// Written "m(maj7)" rather than a bare "maj7", which would read back
    /// as a major chord.
    MinorMajor7,
    Diminished7,
    HalfDiminished7,
    AugmentedMajor7,
    Augmented7,
}

impl ChordKind {
    /// Build from the third, fifth and (optional) seventh above the root.
    pub fn from_intervals(third: u8, fifth: u8, seventh: Option<u8>) -> Self {
        let triad = ChordQuality::from_intervals(third, fifth);
        match (triad, seventh) {
            (ChordQuality::Major, None) => ChordKind::Major,
            (ChordQuality::Major, Some(11)) => ChordKind::Major7,
            (ChordQuality::Major, Some(_)) => ChordKind::Dominant7,
            (ChordQuality::Minor, None) => ChordKind::Minor,
            (ChordQuality::Minor, Some(11)) => ChordKind::MinorMajor7,
            (ChordQuality::Minor, Some(_)) => ChordKind::Minor7,
            (ChordQuality::Diminished, None) => ChordKind::Diminished,
            (ChordQuality::Diminished, Some(9)) => ChordKind::Diminished7,
            (ChordQuality::Diminished, Some(_)) => ChordKind::HalfDiminished7,
            (ChordQuality::Augmented, None) => ChordKind::Augmented,
            (ChordQuality::Augmented, Some(11)) => ChordKind::AugmentedMajor7,
            (ChordQuality::Augmented, Some(_)) => ChordKind::Augmented7,
            (ChordQuality::HalfDiminished, _) => ChordKind::HalfDiminished7,
        }
    }

    /// Suffix for chord symbol display
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordKind::Major => "",
            ChordKind::Minor => "m",
            ChordKind::Diminished => "dim",
            ChordKind::Augmented => "aug",
            ChordKind::Dominant7 => "7",
            ChordKind::Major7 => "maj7",
            ChordKind::Minor7 => "m7",
            ChordKind::MinorMajor7 => "m(maj7)",
            ChordKind::Diminished7 => "dim7",
            ChordKind::HalfDiminished7 => "m7b5",
            ChordKind::AugmentedMajor7 => "maj7#5",
            ChordKind::Augmented7 => "7#5",
        }
    }

    /// Suffix layered onto the Roman numeral.
    pub fn roman_suffix(&self) -> &'static str {
        match self {
            ChordKind::Major | ChordKind::Minor => "",
            ChordKind::Diminished => "°",
            ChordKind::Augmented => "+",
            ChordKind::Dominant7 | ChordKind::Minor7 => "7",
            ChordKind::Major7 | ChordKind::MinorMajor7 => "maj7",
            ChordKind::Diminished7 => "°7",
            ChordKind::HalfDiminished7 => "ø7",
            ChordKind::AugmentedMajor7 => "+maj7",
            ChordKind::Augmented7 => "+7",
        }
    }

    /// Semitone offsets of the chord tones from the root.
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ChordKind::Major => &[0, 4, 7],
            ChordKind::Minor => &[0, 3, 7],
            ChordKind::Diminished => &[0, 3, 6],
            ChordKind::Augmented => &[0, 4, 8],
            ChordKind::Dominant7 => &[0, 4, 7, 10],
            ChordKind::Major7 => &[0, 4, 7, 11],
            ChordKind::Minor7 => &[0, 3, 7, 10],
            ChordKind::MinorMajor7 => &[0, 3, 7, 11],
            ChordKind::Diminished7 => &[0, 3, 6, 9],
            ChordKind::HalfDiminished7 => &[0, 3, 6, 10],
            ChordKind::AugmentedMajor7 => &[0, 4, 8, 11],
            ChordKind::Augmented7 => &[0, 4, 8, 10],
        }
    }

    pub fn quality(&self) -> ChordQuality {
        match self {
            ChordKind::Major | ChordKind::Dominant7 | ChordKind::Major7 => ChordQuality::Major,
            ChordKind::Minor | ChordKind::Minor7 | ChordKind::MinorMajor7 => ChordQuality::Minor,
            ChordKind::Diminished | ChordKind::Diminished7 => ChordQuality::Diminished,
            ChordKind::HalfDiminished7 => ChordQuality::HalfDiminished,
            ChordKind::Augmented | ChordKind::AugmentedMajor7 | ChordKind::Augmented7 => {
                ChordQuality::Augmented
            }
        }
    }

    /// The same chord with its seventh dropped.
    pub fn triad(&self) -> ChordKind {
        match self.quality() {
            ChordQuality::Major => ChordKind::Major,
            ChordQuality::Minor => ChordKind::Minor,
            ChordQuality::Diminished | ChordQuality::HalfDiminished => ChordKind::Diminished,
            ChordQuality::Augmented => ChordKind::Augmented,
        }
    }

    pub fn has_seventh(&self) -> bool {
        self.intervals().len() == 4
    }

    /// Pitch classes of the chord built on `root`, root first.
    pub fn tones(&self, root: PitchClass) -> Vec<PitchClass> {
        self.intervals()
            .iter()
            .map(|&i| pitch::transpose(root, i as i32))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicFunction {
    Tonic,
    Predominant,
    Dominant,
    Subdominant,
    Variable,
}

impl std::fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarmonicFunction::Tonic => write!(f, "tonic"),
            HarmonicFunction::Predominant => write!(f, "predominant"),
            HarmonicFunction::Dominant => write!(f, "dominant"),
            HarmonicFunction::Subdominant => write!(f, "subdominant"),
            HarmonicFunction::Variable => write!(f, "variable"),
        }
    }
}

/// One of the seven chords built on a key's scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiatonicChord {
    /// Scale degree, 1-7
    pub degree: u8,
    /// "ii7", "vii°", "bVII"
    pub roman_numeral: String,
    /// Full chord symbol: "Dm7", "F#dim", "Bb"
    pub symbol: String,
    /// Spelled root: "F#", "Bb"
    pub root_name: String,
    pub kind: ChordKind,
    pub quality: ChordQuality,
    pub harmonic_function: HarmonicFunction,
    /// Chord tones as pitch classes, root first
    pub tones: Vec<PitchClass>,
}

impl DiatonicChord {
    pub fn root(&self) -> PitchClass {
        self.tones[0]
    }
}

/// Count pitch classes two chords have in common.
pub fn shared_tone_count(a: &[PitchClass], b: &[PitchClass]) -> usize {
    let mask = |tones: &[PitchClass]| {
        tones
            .iter()
            .fold(0u16, |acc, &pc| acc | 1 << (pc % 12))
    };
    (mask(a) & mask(b)).count_ones() as usize
}
