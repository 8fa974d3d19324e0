//! Chord-symbol analysis: symbol to scale degree, and "what comes next"
//! for a sequence of symbols.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::diatonic::diatonic_chords;
use crate::key::{parse_key, Key};
use crate::pitch::{self, Letter, PitchClass};
use crate::progression::next_chords_for_key;
use crate::roman::{accidental_prefix, RomanNumeral};
use crate::types::{ChordKind, ChordQuality, DiatonicChord};

/// Extension read off a chord symbol's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extension {
    None,
    Seventh,
    MajorSeventh,
}

/// Root and quality recognized in a chord symbol such as "F#m7b5/C".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordSymbol {
    pub root_letter: Letter,
    /// Written accidental on the root (-1, 0, 1)
    pub accidental: i8,
    pub root_pitch_class: PitchClass,
    pub quality: ChordQuality,
    pub extension: Extension,
    /// Text after the slash, if any
    pub bass: Option<String>,
}

impl ChordSymbol {
    pub fn kind(&self) -> ChordKind {
        match (self.quality, self.extension) {
            (ChordQuality::Major, Extension::None) => ChordKind::Major,
            (ChordQuality::Major, Extension::Seventh) => ChordKind::Dominant7,
            (ChordQuality::Major, Extension::MajorSeventh) => ChordKind::Major7,
            (ChordQuality::Minor, Extension::None) => ChordKind::Minor,
            (ChordQuality::Minor, Extension::Seventh) => ChordKind::Minor7,
            (ChordQuality::Minor, Extension::MajorSeventh) => ChordKind::MinorMajor7,
            (ChordQuality::Diminished, Extension::None) => ChordKind::Diminished,
            (ChordQuality::Diminished, _) => ChordKind::Diminished7,
            (ChordQuality::HalfDiminished, _) => ChordKind::HalfDiminished7,
            (ChordQuality::Augmented, Extension::None) => ChordKind::Augmented,
            (ChordQuality::Augmented, Extension::Seventh) => ChordKind::Augmented7,
            (ChordQuality::Augmented, Extension::MajorSeventh) => ChordKind::AugmentedMajor7,
        }
    }
}

/// Parse a chord symbol's root and quality. Unknown suffix text is ignored
/// ("Csus4" reads as C major); `None` only when no root letter leads.
pub fn parse_chord_symbol(symbol: &str) -> Option<ChordSymbol> {
    let (head, bass) = match symbol.trim().split_once('/') {
        Some((head, bass)) => (head, Some(bass.trim().to_string())),
        None => (symbol.trim(), None),
    };

    let (root, suffix) = pitch::parse_chord_root(head)?;
    let suffix = suffix.trim();
    let (quality, extension) = read_suffix(suffix);

    Some(ChordSymbol {
        root_letter: root.letter,
        accidental: root.accidental,
        root_pitch_class: root.pitch_class(),
        quality,
        extension,
        bass,
    })
}

fn read_suffix(suffix: &str) -> (ChordQuality, Extension) {
    let lower = suffix.to_lowercase();

    if lower.contains("m7b5") || suffix.contains('ø') {
        return (ChordQuality::HalfDiminished, Extension::Seventh);
    }
    if lower.contains("dim") || suffix.contains('°') {
        let extension = if suffix.contains('7') {
            Extension::Seventh
        } else {
            Extension::None
        };
        return (ChordQuality::Diminished, extension);
    }

    let major_seventh = ["maj7", "maj9", "maj11", "maj13"]
        .iter()
        .any(|t| lower.contains(t))
        || suffix.starts_with("M7");

    let quality = if lower.contains("aug") || suffix.contains('+') || suffix.contains("#5") {
        ChordQuality::Augmented
    } else if lower.starts_with("maj") || suffix.starts_with('M') {
        ChordQuality::Major
    } else if suffix.starts_with('m') {
        ChordQuality::Minor
    } else {
        ChordQuality::Major
    };

    let extension = if major_seventh {
        Extension::MajorSeventh
    } else if has_extension_number(&lower) {
        Extension::Seventh
    } else {
        Extension::None
    };

    (quality, extension)
}

/// 7, 9, 11 or 13 outside an "add" token.
fn has_extension_number(lower: &str) -> bool {
    let mut rest = lower;
    let mut cleaned = String::with_capacity(lower.len());
    while let Some(idx) = rest.find("add") {
        cleaned.push_str(&rest[..idx]);
        rest = rest[idx + 3..].trim_start_matches(|c: char| c.is_ascii_digit());
    }
    cleaned.push_str(rest);
    ["7", "9", "11", "13"].iter().any(|n| cleaned.contains(n))
}

/// The chord as a Roman numeral in `key`. `None` if the symbol has no
/// root or the root sits more than a whole step off its scale degree.
pub fn chord_numeral(symbol: &str, key: &Key) -> Option<RomanNumeral> {
    let chord = parse_chord_symbol(symbol)?;
    let index = key.tonic().letter.distance_to(chord.root_letter);
    let expected = key.scale()[index];
    let accidental = pitch::signed_interval(expected, chord.root_pitch_class);

    if accidental_prefix(accidental).is_none() {
        debug!(symbol, key = %key, accidental, "chord root too far from its degree");
        return None;
    }

    Some(RomanNumeral {
        accidental,
        degree: index as u8 + 1,
        kind: chord.kind(),
    })
}

/// Roman numeral text for `symbol` in `key`, e.g. "Am" in C is "vi".
pub fn chord_degree(symbol: &str, key: &Key) -> Option<String> {
    chord_numeral(symbol, key).map(|n| n.to_string())
}

/// [`chord_degree`] with free-text key parsing.
pub fn get_chord_degree(symbol: &str, key_text: &str) -> Option<String> {
    let key = parse_key(key_text)?;
    chord_degree(symbol, &key)
}

/// The diatonic chord `symbol` names, if it is one. Sevenths in the symbol
/// are ignored; root and triad quality must agree.
pub fn match_diatonic_chord<'a>(
    symbol: &str,
    key: &Key,
    chords: &'a [DiatonicChord],
) -> Option<&'a DiatonicChord> {
    let numeral = chord_numeral(symbol, key)?;
    if numeral.accidental != 0 {
        return None;
    }
    chords
        .iter()
        .find(|c| c.degree == numeral.degree && c.kind.triad() == numeral.kind.triad())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordProfile {
    #[default]
    Triad,
    Seventh,
    Jazz,
}

impl std::str::FromStr for ChordProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "triad" | "triads" => Ok(ChordProfile::Triad),
            "seventh" | "sevenths" => Ok(ChordProfile::Seventh),
            "jazz" => Ok(ChordProfile::Jazz),
            _ => Err(format!("unknown chord profile '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionOptions {
    pub profile: ChordProfile,
    /// Jazz profile only: add altered dominants
    pub use_spice: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceSuggestion {
    pub roman: String,
    pub symbol: String,
    pub alternatives: Vec<String>,
    pub weight: f64,
}

const JAZZ_EXTENSIONS: [&str; 3] = ["9", "11", "13"];
const SPICE: [&str; 4] = ["7b9", "7#9", "7#11", "7alt"];

/// Suggest the next chord after `symbols` (chord symbols in `key`).
///
/// Symbols are read as numerals against the key family's home mode, so a
/// D dorian sequence votes with the minor progressions. Symbols that do not
/// parse are skipped.
pub fn next_chord_suggestions_from_sequence<S: AsRef<str>>(
    symbols: &[S],
    key: &Key,
    options: &SuggestionOptions,
) -> Vec<SequenceSuggestion> {
    let home = Key::from_parts(key.tonic(), key.mode().family().home_mode());

    let romans: Vec<String> = symbols
        .iter()
        .filter_map(|s| {
            let numeral = chord_numeral(s.as_ref(), &home);
            if numeral.is_none() {
                trace!(symbol = s.as_ref(), "skipping unreadable chord");
            }
            numeral
        })
        .map(|n| n.triad_form().to_string())
        .collect();

    let diatonic = diatonic_chords(&home, true);
    let limit = options.limit.unwrap_or(usize::MAX);

    next_chords_for_key(&romans, &home)
        .into_iter()
        .filter_map(|s| {
            let numeral = RomanNumeral::parse(&s.roman)?;
            Some(render(numeral, s.weight, &home, &diatonic, options))
        })
        .take(limit)
        .collect()
}

fn render(
    numeral: RomanNumeral,
    weight: f64,
    key: &Key,
    diatonic: &[DiatonicChord],
    options: &SuggestionOptions,
) -> SequenceSuggestion {
    let numeral = match options.profile {
        ChordProfile::Triad => numeral.triad_form(),
        ChordProfile::Seventh | ChordProfile::Jazz => RomanNumeral {
            kind: seventh_kind(numeral, diatonic),
            ..numeral
        },
    };

    let resolved = numeral.resolve(key);
    let mut alternatives = Vec::new();
    if options.profile == ChordProfile::Jazz {
        let root = &resolved.root_name;
        match numeral.kind {
            ChordKind::Minor7 => {
                alternatives.extend(JAZZ_EXTENSIONS.iter().map(|n| format!("{}m{}", root, n)));
            }
            ChordKind::Dominant7 => {
                alternatives.extend(JAZZ_EXTENSIONS.iter().map(|n| format!("{}{}", root, n)));
                if options.use_spice {
                    alternatives.extend(SPICE.iter().map(|s| format!("{}{}", root, s)));
                }
            }
            _ => {}
        }
    }

    SequenceSuggestion {
        roman: numeral.to_string(),
        symbol: resolved.symbol,
        alternatives,
        weight,
    }
}

/// The diatonic seventh on this degree when the triad agrees with it,
/// otherwise the usual seventh for the triad quality.
fn seventh_kind(numeral: RomanNumeral, diatonic: &[DiatonicChord]) -> ChordKind {
    let triad = numeral.kind.triad();
    if numeral.accidental == 0 {
        if let Some(chord) = diatonic
            .iter()
            .find(|c| c.degree == numeral.degree && c.kind.triad() == triad)
        {
            return chord.kind;
        }
    }
    match triad {
        ChordKind::Minor => ChordKind::Minor7,
        ChordKind::Diminished => ChordKind::Diminished7,
        ChordKind::Augmented => ChordKind::Augmented7,
        _ => ChordKind::Dominant7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ModeId;
    use pretty_assertions::assert_eq;

    fn key(text: &str) -> Key {
        parse_key(text).unwrap()
    }

    #[test]
    fn parse_symbol_parts() {
        let chord = parse_chord_symbol("F#m7b5/C").unwrap();
        assert_eq!(chord.root_letter, Letter::F);
        assert_eq!(chord.accidental, 1);
        assert_eq!(chord.root_pitch_class, 6);
        assert_eq!(chord.quality, ChordQuality::HalfDiminished);
        assert_eq!(chord.bass.as_deref(), Some("C"));
        assert_eq!(chord.kind(), ChordKind::HalfDiminished7);
    }

    #[test]
    fn suffix_qualities() {
        let kind = |s: &str| parse_chord_symbol(s).unwrap().kind();
        assert_eq!(kind("C"), ChordKind::Major);
        assert_eq!(kind("Cm"), ChordKind::Minor);
        assert_eq!(kind("Cmin7"), ChordKind::Minor7);
        assert_eq!(kind("Cmaj7"), ChordKind::Major7);
        assert_eq!(kind("CM7"), ChordKind::Major7);
        assert_eq!(kind("C7"), ChordKind::Dominant7);
        assert_eq!(kind("C9"), ChordKind::Dominant7);
        assert_eq!(kind("Cm11"), ChordKind::Minor7);
        assert_eq!(kind("Cdim"), ChordKind::Diminished);
        assert_eq!(kind("C°7"), ChordKind::Diminished7);
        assert_eq!(kind("Cø"), ChordKind::HalfDiminished7);
        assert_eq!(kind("Caug"), ChordKind::Augmented);
        assert_eq!(kind("C+"), ChordKind::Augmented);
        assert_eq!(kind("C7#5"), ChordKind::Augmented7);
        assert_eq!(kind("Cm(maj7)"), ChordKind::MinorMajor7);
        assert_eq!(kind("Cadd9"), ChordKind::Major);
        assert_eq!(kind("Cmadd11"), ChordKind::Minor);
        assert_eq!(kind("Csus4"), ChordKind::Major);
    }

    #[test]
    fn no_root_no_parse() {
        assert_eq!(parse_chord_symbol(""), None);
        assert_eq!(parse_chord_symbol("N.C."), None);
        assert_eq!(parse_chord_symbol("H7"), None);
    }

    #[test]
    fn degrees_in_major() {
        assert_eq!(get_chord_degree("Am", "C").as_deref(), Some("vi"));
        assert_eq!(get_chord_degree("G7", "C").as_deref(), Some("V7"));
        assert_eq!(get_chord_degree("Cmaj7", "C").as_deref(), Some("Imaj7"));
        assert_eq!(get_chord_degree("Bb", "C").as_deref(), Some("bVII"));
        assert_eq!(get_chord_degree("F#dim", "C").as_deref(), Some("#iv°"));
        assert_eq!(get_chord_degree("C/E", "C").as_deref(), Some("I"));
    }

    #[test]
    fn degrees_in_minor() {
        assert_eq!(get_chord_degree("Ab", "Gm").as_deref(), Some("bII"));
        assert_eq!(get_chord_degree("F#m7b5", "Em").as_deref(), Some("iiø7"));
        assert_eq!(get_chord_degree("E", "A minor").as_deref(), Some("V"));
        assert_eq!(get_chord_degree("G", "A minor").as_deref(), Some("VII"));
    }

    #[test]
    fn degree_failures() {
        assert_eq!(get_chord_degree("Am", "nonsense"), None);
        assert_eq!(get_chord_degree("xyz", "C"), None);
    }

    #[test]
    fn degree_round_trips_through_diatonic_chords() {
        for mode in ModeId::ALL {
            for tonic in ["C", "D", "F#", "G", "Bb", "E"] {
                let key = Key::new(tonic, mode).unwrap();
                for chord in diatonic_chords(&key, true) {
                    assert_eq!(
                        chord_degree(&chord.symbol, &key).as_deref(),
                        Some(chord.roman_numeral.as_str()),
                        "{} in {}",
                        chord.symbol,
                        key
                    );
                }
            }
        }
    }

    #[test]
    fn match_diatonic() {
        let key = key("C");
        let chords = diatonic_chords(&key, false);
        assert_eq!(
            match_diatonic_chord("Dm7", &key, &chords).map(|c| c.degree),
            Some(2)
        );
        assert!(match_diatonic_chord("D", &key, &chords).is_none());
        assert!(match_diatonic_chord("Bb", &key, &chords).is_none());
    }

    #[test]
    fn triad_suggestions_after_two_five() {
        let out = next_chord_suggestions_from_sequence(
            &["Dm", "G"],
            &key("C"),
            &SuggestionOptions::default(),
        );
        assert_eq!(out[0].roman, "I");
        assert_eq!(out[0].symbol, "C");
        assert!(out[0].alternatives.is_empty());
    }

    #[test]
    fn seventh_profile_uses_diatonic_sevenths() {
        let options = SuggestionOptions {
            profile: ChordProfile::Seventh,
            ..Default::default()
        };
        let out = next_chord_suggestions_from_sequence(&["Dm7", "G7"], &key("C"), &options);
        assert_eq!(out[0].roman, "Imaj7");
        assert_eq!(out[0].symbol, "Cmaj7");
    }

    #[test]
    fn seventh_profile_chromatic_fallbacks() {
        let diatonic = diatonic_chords(&key("C"), true);
        let bvii = RomanNumeral::parse("bVII").unwrap();
        assert_eq!(seventh_kind(bvii, &diatonic), ChordKind::Dominant7);
        let iv = RomanNumeral::parse("iv").unwrap();
        assert_eq!(seventh_kind(iv, &diatonic), ChordKind::Minor7);
    }

    #[test]
    fn jazz_profile_adds_extensions() {
        let options = SuggestionOptions {
            profile: ChordProfile::Jazz,
            use_spice: true,
            limit: None,
        };
        let out = next_chord_suggestions_from_sequence(&["C", "Am", "Dm"], &key("C"), &options);
        let five = out.iter().find(|s| s.roman == "V7").unwrap();
        assert_eq!(five.symbol, "G7");
        assert_eq!(
            five.alternatives,
            vec!["G9", "G11", "G13", "G7b9", "G7#9", "G7#11", "G7alt"]
        );
    }

    #[test]
    fn limit_caps_output() {
        let options = SuggestionOptions {
            limit: Some(2),
            ..Default::default()
        };
        let out = next_chord_suggestions_from_sequence(&["C"], &key("G"), &options);
        assert!(out.len() <= 2);
    }

    #[test]
    fn dorian_sequence_votes_with_minor_family() {
        let out = next_chord_suggestions_from_sequence(
            &["Dm"],
            &key("D dorian"),
            &SuggestionOptions::default(),
        );
        assert!(!out.is_empty());
        assert!(out.iter().all(|s| !s.roman.is_empty()));
    }

    #[test]
    fn profile_from_str() {
        assert_eq!("Jazz".parse::<ChordProfile>().unwrap(), ChordProfile::Jazz);
        assert!("bebop".parse::<ChordProfile>().is_err());
    }
}
