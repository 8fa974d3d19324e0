//! The mode table: seven church modes plus harmonic minor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeId {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    HarmonicMinor,
}

/// Static description of one mode.
#[derive(Debug)]
pub struct ModeDef {
    pub id: ModeId,
    /// Semitone offsets of degrees 1-7 from the tonic, strictly increasing.
    pub intervals: [u8; 7],
    /// Degree names relative to the major scale ("b3", "#4", ...).
    pub degree_labels: [&'static str; 7],
    /// Semitones from the relative major's tonic up to this mode's tonic.
    pub relative_major_offset: u8,
}

pub static MODES: [ModeDef; 8] = [
    ModeDef {
        id: ModeId::Ionian,
        intervals: [0, 2, 4, 5, 7, 9, 11],
        degree_labels: ["1", "2", "3", "4", "5", "6", "7"],
        relative_major_offset: 0,
    },
    ModeDef {
        id: ModeId::Dorian,
        intervals: [0, 2, 3, 5, 7, 9, 10],
        degree_labels: ["1", "2", "b3", "4", "5", "6", "b7"],
        relative_major_offset: 2,
    },
    ModeDef {
        id: ModeId::Phrygian,
        intervals: [0, 1, 3, 5, 7, 8, 10],
        degree_labels: ["1", "b2", "b3", "4", "5", "b6", "b7"],
        relative_major_offset: 4,
    },
    ModeDef {
        id: ModeId::Lydian,
        intervals: [0, 2, 4, 6, 7, 9, 11],
        degree_labels: ["1", "2", "3", "#4", "5", "6", "7"],
        relative_major_offset: 5,
    },
    ModeDef {
        id: ModeId::Mixolydian,
        intervals: [0, 2, 4, 5, 7, 9, 10],
        degree_labels: ["1", "2", "3", "4", "5", "6", "b7"],
        relative_major_offset: 7,
    },
    ModeDef {
        id: ModeId::Aeolian,
        intervals: [0, 2, 3, 5, 7, 8, 10],
        degree_labels: ["1", "2", "b3", "4", "5", "b6", "b7"],
        relative_major_offset: 9,
    },
    ModeDef {
        id: ModeId::Locrian,
        intervals: [0, 1, 3, 5, 6, 8, 10],
        degree_labels: ["1", "b2", "b3", "4", "b5", "b6", "b7"],
        relative_major_offset: 11,
    },
    // Key signature of the natural minor; only the leading tone is raised.
    ModeDef {
        id: ModeId::HarmonicMinor,
        intervals: [0, 2, 3, 5, 7, 8, 11],
        degree_labels: ["1", "2", "b3", "4", "5", "b6", "7"],
        relative_major_offset: 9,
    },
];

impl ModeId {
    pub const ALL: [ModeId; 8] = [
        ModeId::Ionian,
        ModeId::Dorian,
        ModeId::Phrygian,
        ModeId::Lydian,
        ModeId::Mixolydian,
        ModeId::Aeolian,
        ModeId::Locrian,
        ModeId::HarmonicMinor,
    ];

    pub fn def(self) -> &'static ModeDef {
        &MODES[self as usize]
    }

    pub fn intervals(self) -> [u8; 7] {
        self.def().intervals
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModeId::Ionian => "ionian",
            ModeId::Dorian => "dorian",
            ModeId::Phrygian => "phrygian",
            ModeId::Lydian => "lydian",
            ModeId::Mixolydian => "mixolydian",
            ModeId::Aeolian => "aeolian",
            ModeId::Locrian => "locrian",
            ModeId::HarmonicMinor => "harmonic_minor",
        }
    }

    /// Major-third modes belong to the major family, the rest to minor.
    pub fn family(self) -> ModeFamily {
        match self {
            ModeId::Ionian | ModeId::Lydian | ModeId::Mixolydian => ModeFamily::Major,
            _ => ModeFamily::Minor,
        }
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "ionian" | "major" => Ok(ModeId::Ionian),
            "dorian" => Ok(ModeId::Dorian),
            "phrygian" => Ok(ModeId::Phrygian),
            "lydian" => Ok(ModeId::Lydian),
            "mixolydian" => Ok(ModeId::Mixolydian),
            "aeolian" | "minor" => Ok(ModeId::Aeolian),
            "locrian" => Ok(ModeId::Locrian),
            "harmonic_minor" | "harmonicminor" => Ok(ModeId::HarmonicMinor),
            _ => Err(format!("unknown mode '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeFamily {
    Major,
    Minor,
}

impl ModeFamily {
    /// The mode Roman numerals of this family are written against.
    pub fn home_mode(self) -> ModeId {
        match self {
            ModeFamily::Major => ModeId::Ionian,
            ModeFamily::Minor => ModeId::Aeolian,
        }
    }
}

impl fmt::Display for ModeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeFamily::Major => write!(f, "major"),
            ModeFamily::Minor => write!(f, "minor"),
        }
    }
}

impl FromStr for ModeFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(ModeFamily::Major),
            "minor" => Ok(ModeFamily::Minor),
            _ => Err(format!("unknown mode family '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_order_matches_ids() {
        for id in ModeId::ALL {
            assert_eq!(id.def().id, id);
        }
    }

    #[test]
    fn intervals_strictly_increasing_and_unique() {
        for def in &MODES {
            assert_eq!(def.intervals[0], 0, "{} must start on the tonic", def.id);
            for pair in def.intervals.windows(2) {
                assert!(pair[0] < pair[1], "{} intervals not increasing", def.id);
            }
            assert!(def.intervals[6] < 12);
        }
    }

    #[test]
    fn labels_agree_with_intervals() {
        let major = ModeId::Ionian.intervals();
        for def in &MODES {
            for (i, label) in def.degree_labels.iter().enumerate() {
                let shift = if label.starts_with('b') {
                    -1
                } else if label.starts_with('#') {
                    1
                } else {
                    0
                };
                assert_eq!(
                    def.intervals[i] as i32,
                    major[i] as i32 + shift,
                    "{} degree {}",
                    def.id,
                    i + 1
                );
            }
        }
    }

    #[test]
    fn relative_major_offsets_rotate_ionian() {
        let major = ModeId::Ionian.intervals();
        for def in MODES.iter().filter(|d| d.id != ModeId::HarmonicMinor) {
            let start = major
                .iter()
                .position(|&i| i == def.relative_major_offset)
                .unwrap();
            for (degree, &interval) in def.intervals.iter().enumerate() {
                let expected =
                    (major[(start + degree) % 7] + 12 - def.relative_major_offset) % 12;
                assert_eq!(interval, expected, "{} degree {}", def.id, degree + 1);
            }
        }
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("major".parse::<ModeId>().unwrap(), ModeId::Ionian);
        assert_eq!("Minor".parse::<ModeId>().unwrap(), ModeId::Aeolian);
        assert_eq!(
            "harmonic minor".parse::<ModeId>().unwrap(),
            ModeId::HarmonicMinor
        );
        assert_eq!(
            "harmonic-minor".parse::<ModeId>().unwrap(),
            ModeId::HarmonicMinor
        );
        assert!("bebop".parse::<ModeId>().is_err());
    }

    #[test]
    fn families() {
        assert_eq!(ModeId::Mixolydian.family(), ModeFamily::Major);
        assert_eq!(ModeId::Dorian.family(), ModeFamily::Minor);
        assert_eq!(ModeId::HarmonicMinor.family(), ModeFamily::Minor);
        assert_eq!(ModeFamily::Minor.home_mode(), ModeId::Aeolian);
    }
}
