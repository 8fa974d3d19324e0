//! Whole-crate behavior: the examples people actually type, and the
//! properties that must hold across every key and mode.

use std::fs;
use std::path::Path;

use harmony::{
    build_diatonic_chords, diatonic_chords, filter_progressions, find_matching_progressions,
    get_chord_degree, parse_key, suggest_substitutions, transpose_progression, ChordKind,
    ChordType, ModeFamily, ModeId, Progression, SubstitutionContext, PROGRESSIONS,
};
use pretty_assertions::assert_eq;

fn fixture_lines(name: &str) -> Vec<Vec<String>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e));

    text.lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|line| line.split('|').map(|f| f.trim().to_string()).collect())
        .collect()
}

#[test]
fn chord_degree_fixture() {
    let rows = fixture_lines("degrees.txt");
    assert!(rows.len() > 20);
    for row in rows {
        let (key, symbol, expected) = (&row[0], &row[1], &row[2]);
        let expected = (expected != "-").then(|| expected.clone());
        assert_eq!(
            get_chord_degree(symbol, key),
            expected,
            "{} in {}",
            symbol,
            key
        );
    }
}

#[test]
fn diatonic_examples() {
    let symbols = |tonic: &str, mode: ModeId| -> Vec<String> {
        build_diatonic_chords(tonic, mode, false)
            .unwrap()
            .into_iter()
            .map(|c| c.symbol)
            .collect()
    };
    assert_eq!(
        symbols("E", ModeId::Aeolian),
        vec!["Em", "F#dim", "G", "Am", "Bm", "C", "D"]
    );
    assert_eq!(
        symbols("F", ModeId::Ionian),
        vec!["F", "Gm", "Am", "Bb", "C", "Dm", "Edim"]
    );
}

#[test]
fn every_mode_builds_seven_ascending_chords() {
    for mode in ModeId::ALL {
        for tonic in ["C", "Eb", "F#", "A"] {
            let key = harmony::Key::new(tonic, mode).unwrap();
            let chords = diatonic_chords(&key, false);
            assert_eq!(chords.len(), 7);

            let scale = key.scale();
            let steps: Vec<u8> = scale
                .iter()
                .map(|&pc| (pc + 12 - key.tonic_pc()) % 12)
                .collect();
            for pair in steps.windows(2) {
                assert!(pair[0] < pair[1], "{} {}", tonic, mode);
            }
            for (chord, &pc) in chords.iter().zip(scale.iter()) {
                assert_eq!(chord.root(), pc);
            }
        }
    }
}

#[test]
fn parsing_and_building_are_idempotent() {
    for text in ["Em", "Bb major", "F# dorian", "G mixolydian", "c minor"] {
        assert_eq!(parse_key(text), parse_key(text));
    }
    for mode in ModeId::ALL {
        assert_eq!(
            build_diatonic_chords("Ab", mode, true),
            build_diatonic_chords("Ab", mode, true)
        );
    }
}

/// Every tonic, with both spellings of each black key.
const TONICS: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb",
    "B",
];

#[test]
fn dominant_sevenths_get_tritone_and_backdoor_in_every_mode() {
    let root_of = |symbol: &str| {
        harmony::parse_chord_symbol(symbol)
            .unwrap_or_else(|| panic!("unreadable substitute {}", symbol))
            .root_pitch_class
    };

    let mut checked = 0;
    for mode in ModeId::ALL {
        for tonic in TONICS {
            let key = harmony::Key::new(tonic, mode).unwrap();
            let chords = diatonic_chords(&key, true);
            let tonic_chord = &chords[0];

            for chord in chords.iter().filter(|c| c.kind == ChordKind::Dominant7) {
                let ctx = SubstitutionContext {
                    key: &key,
                    chord,
                    all_chords: &chords,
                    next_chord: Some(tonic_chord),
                };
                let roots: Vec<u8> = suggest_substitutions(&ctx)
                    .iter()
                    .map(|c| root_of(&c.substitute_symbol))
                    .collect();

                let tritone_root = (chord.root() + 6) % 12;
                assert!(
                    roots.contains(&tritone_root),
                    "tritone missing for {} in {}",
                    chord.symbol,
                    key
                );

                // aeolian VII7 already is the backdoor dominant
                let backdoor_root = (tonic_chord.root() + 10) % 12;
                if chord.root() != backdoor_root {
                    assert!(
                        roots.contains(&backdoor_root),
                        "backdoor missing for {} in {}",
                        chord.symbol,
                        key
                    );
                }
                checked += 1;
            }
        }
    }
    assert!(checked >= ModeId::ALL.len() * TONICS.len());
}

#[test]
fn substitutes_are_never_duplicated() {
    for mode in ModeId::ALL {
        for sevenths in [false, true] {
            let key = harmony::Key::new("D", mode).unwrap();
            let chords = diatonic_chords(&key, sevenths);
            for chord in &chords {
                for next in chords.iter().map(Some).chain([None]) {
                    let ctx = SubstitutionContext {
                        key: &key,
                        chord,
                        all_chords: &chords,
                        next_chord: next,
                    };
                    let out = suggest_substitutions(&ctx);
                    let mut symbols: Vec<_> =
                        out.iter().map(|c| c.substitute_symbol.clone()).collect();
                    let total = symbols.len();
                    symbols.sort();
                    symbols.dedup();
                    assert_eq!(symbols.len(), total, "{} in {}", chord.symbol, key);
                }
            }
        }
    }
}

const PROBE: Progression = Progression {
    id: "probe",
    name: "Probe",
    mode_family: ModeFamily::Major,
    chord_type: ChordType::Triad,
    weight: 0.5,
    tags: &[],
    roman: &["vi", "I", "V", "I"],
};

const TAIL: Progression = Progression {
    id: "tail",
    name: "Tail",
    mode_family: ModeFamily::Major,
    chord_type: ChordType::Triad,
    weight: 0.5,
    tags: &[],
    roman: &["ii", "V", "VII"],
};

#[test]
fn matcher_reports_inclusive_range() {
    let matches = find_matching_progressions(&["I", "V"], &[&PROBE]);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].progression_id, "probe");
    assert_eq!((matches[0].start, matches[0].end), (1, 2));
}

#[test]
fn matcher_has_no_partial_superset_match() {
    assert_eq!(find_matching_progressions(&["V", "VII"], &[&TAIL]).len(), 1);
    assert!(find_matching_progressions(&["I", "V", "VII"], &[&TAIL]).is_empty());
    assert!(find_matching_progressions(&["V", "VII", "I"], &[&TAIL]).is_empty());
}

#[test]
fn transposed_progressions_round_trip_through_degrees() {
    for family in [ModeFamily::Major, ModeFamily::Minor] {
        for progression in filter_progressions(family, &[], None) {
            for tonic in TONICS {
                let transposed = transpose_progression(progression, tonic).unwrap();
                let key_text = format!("{} {}", tonic, family);
                let derived: Vec<String> = transposed
                    .chords
                    .iter()
                    .map(|chord| get_chord_degree(chord, &key_text).unwrap())
                    .collect();
                assert_eq!(
                    derived,
                    transposed.roman,
                    "{} in {}",
                    progression.id,
                    key_text
                );
            }
        }
    }
}

#[test]
fn dataset_covers_both_families() {
    assert!(PROGRESSIONS
        .iter()
        .any(|p| p.mode_family == ModeFamily::Major));
    assert!(PROGRESSIONS
        .iter()
        .any(|p| p.mode_family == ModeFamily::Minor));
    assert!(!filter_progressions(ModeFamily::Minor, &["jazz"], Some(ChordType::Seventh)).is_empty());
}

#[test]
fn candidates_serialize_to_json() {
    let key = parse_key("C").unwrap();
    let chords = diatonic_chords(&key, true);
    let ctx = SubstitutionContext {
        key: &key,
        chord: &chords[4],
        all_chords: &chords,
        next_chord: Some(&chords[0]),
    };
    let json = serde_json::to_value(suggest_substitutions(&ctx)).unwrap();
    let first = &json[0];
    assert_eq!(first["target_symbol"], "G7");
    assert!(first["category"].is_string());
    assert!(first["score"].is_number());
}
