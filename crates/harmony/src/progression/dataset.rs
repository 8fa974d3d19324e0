//! Curated progressions, written as Roman numerals against the family's
//! home mode (ionian for major, aeolian for minor).

use super::{ChordType, Progression};
use crate::mode::ModeFamily::{Major, Minor};

use ChordType::{Seventh, Triad};

macro_rules! progression {
    ($id:literal, $name:literal, $family:expr, $chord_type:expr, $weight:literal,
     [$($tag:literal),*], [$($roman:literal),+]) => {
        Progression {
            id: $id,
            name: $name,
            mode_family: $family,
            chord_type: $chord_type,
            weight: $weight,
            tags: &[$($tag),*],
            roman: &[$($roman),+],
        }
    };
}

pub static PROGRESSIONS: &[Progression] = &[
    // Major, triads
    progression!("pop-axis", "Axis", Major, Triad, 1.0,
        ["pop", "rock"], ["I", "V", "vi", "IV"]),
    progression!("three-chord", "Three chord", Major, Triad, 0.9,
        ["rock", "folk", "blues"], ["I", "IV", "V"]),
    progression!("doo-wop", "Fifties", Major, Triad, 0.85,
        ["pop", "doo-wop", "classic"], ["I", "vi", "IV", "V"]),
    progression!("sensitive", "Sensitive female", Major, Triad, 0.85,
        ["pop", "emotional"], ["vi", "IV", "I", "V"]),
    progression!("ii-v-i", "Two-five-one", Major, Triad, 0.8,
        ["jazz", "cadence"], ["ii", "V", "I"]),
    progression!("turnaround", "Turnaround", Major, Triad, 0.75,
        ["jazz", "doo-wop", "turnaround"], ["I", "vi", "ii", "V"]),
    progression!("canon", "Pachelbel", Major, Triad, 0.7,
        ["classical", "pop"], ["I", "V", "vi", "iii", "IV", "I", "IV", "V"]),
    progression!("folk-shuffle", "Folk shuffle", Major, Triad, 0.7,
        ["folk", "country"], ["I", "IV", "I", "V"]),
    progression!("twelve-bar", "Twelve-bar blues", Major, Triad, 0.7,
        ["blues", "rock"],
        ["I", "I", "I", "I", "IV", "IV", "I", "I", "V", "IV", "I", "V"]),
    progression!("authentic-cadence", "Authentic cadence", Major, Triad, 0.6,
        ["cadence", "classical"], ["IV", "V", "I"]),
    progression!("royal-road", "Royal road", Major, Triad, 0.6,
        ["pop", "j-pop"], ["IV", "V", "iii", "vi"]),
    progression!("mixolydian-vamp", "Mixolydian vamp", Major, Triad, 0.6,
        ["rock", "modal"], ["I", "bVII", "IV", "I"]),
    progression!("pop-lift", "Pop lift", Major, Triad, 0.6,
        ["pop"], ["I", "IV", "vi", "V"]),
    progression!("country-return", "Country return", Major, Triad, 0.55,
        ["rock", "country"], ["I", "V", "IV", "I"]),
    progression!("subdominant-start", "Subdominant start", Major, Triad, 0.55,
        ["pop"], ["IV", "I", "V", "vi"]),
    progression!("ballad-climb", "Ballad climb", Major, Triad, 0.5,
        ["pop", "ballad"], ["I", "iii", "IV", "V"]),
    progression!("plagal", "Plagal amen", Major, Triad, 0.5,
        ["cadence", "gospel"], ["I", "IV", "I"]),
    progression!("minor-start-rock", "Relative minor rock", Major, Triad, 0.5,
        ["pop", "rock"], ["vi", "V", "IV", "V"]),
    progression!("borrowed-iv", "Minor plagal", Major, Triad, 0.45,
        ["pop", "ballad", "borrowed"], ["I", "IV", "iv", "I"]),
    progression!("aeolian-cadence", "Aeolian cadence", Major, Triad, 0.45,
        ["rock", "epic", "borrowed"], ["I", "bVI", "bVII", "I"]),
    progression!("flat-side-rock", "Flat-side rock", Major, Triad, 0.4,
        ["rock", "modal"], ["I", "bVII", "bVI", "bVII"]),
    // Major, sevenths
    progression!("jazz-ii-v-i", "Two-five-one", Major, Seventh, 0.9,
        ["jazz", "cadence"], ["ii7", "V7", "Imaj7"]),
    progression!("rhythm-changes", "Rhythm turnaround", Major, Seventh, 0.8,
        ["jazz", "turnaround"], ["Imaj7", "vi7", "ii7", "V7"]),
    progression!("seventh-blues", "Dominant blues", Major, Seventh, 0.65,
        ["blues", "jazz"],
        ["I7", "IV7", "I7", "I7", "IV7", "IV7", "I7", "I7", "V7", "IV7", "I7", "V7"]),
    progression!("circle-of-fifths", "Circle of fifths", Major, Seventh, 0.6,
        ["jazz", "circle"], ["iii7", "vi7", "ii7", "V7"]),
    progression!("neo-soul-drift", "Neo-soul drift", Major, Seventh, 0.5,
        ["jazz", "neo-soul"], ["Imaj7", "IVmaj7"]),
    progression!("ii-v-iii-vi", "Deceptive two-five", Major, Seventh, 0.45,
        ["jazz"], ["ii7", "V7", "iii7", "vi7"]),
    progression!("tritone-cadence", "Tritone cadence", Major, Seventh, 0.4,
        ["jazz", "tritone"], ["ii7", "bII7", "Imaj7"]),
    progression!("descending-soul", "Descending soul", Major, Seventh, 0.4,
        ["neo-soul", "jazz"], ["IVmaj7", "iii7", "ii7", "Imaj7"]),
    progression!("backdoor", "Backdoor", Major, Seventh, 0.35,
        ["jazz", "backdoor"], ["iv7", "bVII7", "Imaj7"]),
    // Minor, triads
    progression!("epic-minor", "Epic minor", Minor, Triad, 0.85,
        ["pop", "epic"], ["i", "VI", "III", "VII"]),
    progression!("andalusian", "Andalusian cadence", Minor, Triad, 0.8,
        ["flamenco", "classical"], ["i", "VII", "VI", "V"]),
    progression!("harmonic-cadence", "Harmonic cadence", Minor, Triad, 0.75,
        ["classical", "cadence"], ["i", "iv", "V", "i"]),
    progression!("minor-folk", "Minor folk", Minor, Triad, 0.7,
        ["classical", "folk"], ["i", "iv", "v", "i"]),
    progression!("minor-ii-v-i", "Minor two-five-one", Minor, Triad, 0.7,
        ["cadence", "classical"], ["ii°", "V", "i"]),
    progression!("aeolian-rock", "Aeolian rock", Minor, Triad, 0.7,
        ["rock", "epic"], ["i", "VI", "VII", "i"]),
    progression!("minor-circle", "Minor circle", Minor, Triad, 0.6,
        ["pop", "circle"], ["i", "iv", "VII", "III"]),
    progression!("rising-aeolian", "Rising aeolian", Minor, Triad, 0.6,
        ["rock", "epic"], ["VI", "VII", "i"]),
    progression!("minor-rock-vamp", "Minor rock vamp", Minor, Triad, 0.55,
        ["rock"], ["i", "VII", "VI", "VII"]),
    progression!("minor-ballad", "Minor ballad", Minor, Triad, 0.5,
        ["rock", "ballad"], ["i", "III", "VII", "VI"]),
    progression!("natural-minor-folk", "Natural minor folk", Minor, Triad, 0.4,
        ["folk", "modal"], ["i", "v", "iv", "i"]),
    // Minor, sevenths
    progression!("jazz-minor-ii-v-i", "Minor two-five-one", Minor, Seventh, 0.85,
        ["jazz", "cadence"], ["iiø7", "V7", "i7"]),
    progression!("minor-circle-sevenths", "Minor circle", Minor, Seventh, 0.6,
        ["jazz", "circle"], ["i7", "iv7", "VII7", "IIImaj7"]),
    progression!("minor-turnaround", "Minor turnaround", Minor, Seventh, 0.55,
        ["jazz", "turnaround"], ["i7", "VImaj7", "iiø7", "V7"]),
    progression!("soul-minor", "Soul minor", Minor, Seventh, 0.5,
        ["soul", "funk"], ["i7", "iv7", "v7", "i7"]),
    progression!("dorian-vamp", "Dorian vamp", Minor, Seventh, 0.5,
        ["funk", "modal"], ["i7", "IV7"]),
];
