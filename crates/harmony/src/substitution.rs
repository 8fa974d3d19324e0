//! Rule-driven chord substitution.
//!
//! Every rule is a row in [`RULES`]: a predicate over the target chord and
//! its context, a generator producing candidate chords, a base weight and
//! an explanation template. Scores are base weight plus a bonus per tone
//! shared with the target; duplicates collapse to their best score.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::key::Key;
use crate::mode::ModeId;
use crate::pitch::{self, note_name, parse_root, PitchClass, SpelledNote};
use crate::types::{shared_tone_count, ChordKind, ChordQuality, DiatonicChord, HarmonicFunction};

/// Tunable scoring knobs. `Default` holds the stock weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionWeights {
    /// Added per pitch class shared with the target
    pub shared_tone_weight: f64,
    /// Same-function swaps sharing fewer tones are dropped
    pub min_shared_tones: usize,
    pub diatonic_bonus: f64,
    pub secondary_dominant: f64,
    pub leading_tone: f64,
    pub tritone: f64,
    pub backdoor: f64,
    pub borrowed_penalty: f64,
    pub harmonic_minor_dominant: f64,
    pub chromatic_approach: f64,
}

impl Default for SubstitutionWeights {
    fn default() -> Self {
        Self {
            shared_tone_weight: 2.0,
            min_shared_tones: 2,
            diatonic_bonus: 1.0,
            secondary_dominant: 1.5,
            leading_tone: 1.0,
            tritone: 1.5,
            backdoor: 1.0,
            borrowed_penalty: -0.5,
            harmonic_minor_dominant: 2.0,
            chromatic_approach: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionCategory {
    Diatonic,
    SecondaryDominant,
    LeadingTone,
    Tritone,
    Backdoor,
    ModalInterchange,
    HarmonicMinor,
    ChromaticApproach,
}

impl fmt::Display for SubstitutionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubstitutionCategory::Diatonic => "diatonic",
            SubstitutionCategory::SecondaryDominant => "secondary dominant",
            SubstitutionCategory::LeadingTone => "leading tone",
            SubstitutionCategory::Tritone => "tritone",
            SubstitutionCategory::Backdoor => "backdoor",
            SubstitutionCategory::ModalInterchange => "modal interchange",
            SubstitutionCategory::HarmonicMinor => "harmonic minor",
            SubstitutionCategory::ChromaticApproach => "chromatic approach",
        };
        f.write_str(s)
    }
}

/// The chord to replace and what surrounds it.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionContext<'a> {
    pub key: &'a Key,
    pub chord: &'a DiatonicChord,
    /// The key's diatonic chords, built with the same seventh setting as `chord`
    pub all_chords: &'a [DiatonicChord],
    pub next_chord: Option<&'a DiatonicChord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstitutionCandidate {
    pub target_symbol: String,
    pub substitute_symbol: String,
    pub category: SubstitutionCategory,
    pub shared_tone_count: usize,
    pub score: f64,
    pub explanation: String,
    pub rule_id: &'static str,
}

/// Conditions a target must meet for a rule to fire. Empty lists mean any.
#[derive(Debug)]
pub struct RulePredicate {
    pub modes: &'static [ModeId],
    pub degree: Option<u8>,
    pub qualities: &'static [ChordQuality],
    pub functions: &'static [HarmonicFunction],
    pub requires_next: bool,
    pub next_degree: Option<u8>,
}

impl RulePredicate {
    const ANY: RulePredicate = RulePredicate {
        modes: &[],
        degree: None,
        qualities: &[],
        functions: &[],
        requires_next: false,
        next_degree: None,
    };

    pub fn accepts(&self, ctx: &SubstitutionContext<'_>) -> bool {
        let chord = ctx.chord;
        (self.modes.is_empty() || self.modes.contains(&ctx.key.mode()))
            && self.degree.map_or(true, |d| d == chord.degree)
            && (self.qualities.is_empty() || self.qualities.contains(&chord.quality))
            && (self.functions.is_empty() || self.functions.contains(&chord.harmonic_function))
            && (!self.requires_next || ctx.next_chord.is_some())
            && self
                .next_degree
                .map_or(true, |d| ctx.next_chord.is_some_and(|n| n.degree == d))
    }
}

/// How a rule turns its target into candidate chords.
#[derive(Debug, Clone, Copy)]
pub enum Generator {
    /// Other diatonic chords in the target's function group
    SameFunctionSwap,
    /// Dominant seventh on the target's root, when it sits a fifth above the next chord
    SecondaryDominant,
    /// Diminished seventh a half step below the next chord
    LeadingToneDiminished,
    /// Dominant seventh a tritone away from a dominant target
    TritoneSubstitution,
    /// bVII7 of the tonic, ahead of the tonic or at a phrase end
    BackdoorDominant,
    /// Fixed chord from the parallel aeolian on `degree`
    ModalInterchange { degree: u8, kind: ChordKind },
    /// Major-third dominant seventh on the target's root
    HarmonicMinorDominant,
    /// Diminished seventh a half step below the next chord, unweighted
    ChromaticApproach,
}

impl Generator {
    fn base_weight(&self, weights: &SubstitutionWeights) -> f64 {
        match self {
            Generator::SameFunctionSwap => weights.diatonic_bonus,
            Generator::SecondaryDominant => weights.secondary_dominant,
            Generator::LeadingToneDiminished => weights.leading_tone,
            Generator::TritoneSubstitution => weights.tritone,
            Generator::BackdoorDominant => weights.backdoor,
            Generator::ModalInterchange { .. } => weights.borrowed_penalty,
            Generator::HarmonicMinorDominant => weights.harmonic_minor_dominant,
            Generator::ChromaticApproach => weights.chromatic_approach,
        }
    }

    /// Candidate (symbol, tones) pairs for the target.
    fn generate(
        &self,
        ctx: &SubstitutionContext<'_>,
        weights: &SubstitutionWeights,
    ) -> Vec<(String, Vec<PitchClass>)> {
        let chord = ctx.chord;
        let key = ctx.key;

        let built = |name: String, root: PitchClass, kind: ChordKind| {
            (format!("{}{}", name, kind.suffix()), kind.tones(root))
        };

        match *self {
            Generator::SameFunctionSwap => function_group(key.mode(), chord.degree)
                .iter()
                .filter(|&&d| d != chord.degree)
                .filter_map(|&d| ctx.all_chords.iter().find(|c| c.degree == d))
                .filter(|c| shared_tone_count(&c.tones, &chord.tones) >= weights.min_shared_tones)
                .map(|c| (c.symbol.clone(), c.tones.clone()))
                .collect(),

            Generator::SecondaryDominant => {
                let Some(next) = ctx.next_chord else {
                    return Vec::new();
                };
                if pitch::transpose(chord.root(), -(next.root() as i32)) != 7 {
                    return Vec::new();
                }
                vec![built(
                    chord.root_name.clone(),
                    chord.root(),
                    ChordKind::Dominant7,
                )]
            }

            Generator::LeadingToneDiminished | Generator::ChromaticApproach => {
                let Some(next) = ctx.next_chord else {
                    return Vec::new();
                };
                let root = pitch::transpose(next.root(), -1);
                vec![built(
                    spell_below(next, root, key.use_flats()),
                    root,
                    ChordKind::Diminished7,
                )]
            }

            Generator::TritoneSubstitution => {
                let dominant = chord.kind == ChordKind::Dominant7
                    || (chord.harmonic_function == HarmonicFunction::Dominant
                        && chord.quality == ChordQuality::Major);
                if !dominant {
                    return Vec::new();
                }
                let root = pitch::transpose(chord.root(), 6);
                vec![built(
                    note_name(root as i32, true).to_string(),
                    root,
                    ChordKind::Dominant7,
                )]
            }

            Generator::BackdoorDominant => {
                let eligible = chord.kind == ChordKind::Dominant7
                    || matches!(
                        chord.harmonic_function,
                        HarmonicFunction::Dominant | HarmonicFunction::Predominant
                    );
                if !eligible {
                    return Vec::new();
                }
                let resolves_home = match ctx.next_chord {
                    Some(next) => next.degree == 1,
                    None => true,
                };
                if !resolves_home {
                    return Vec::new();
                }
                let root = pitch::transpose(key.tonic_pc(), 10);
                vec![built(key.spell_on_degree(6, root), root, ChordKind::Dominant7)]
            }

            Generator::ModalInterchange { degree, kind } => {
                let index = (degree as usize + 6) % 7;
                let offset = ModeId::Aeolian.intervals()[index];
                let root = pitch::transpose(key.tonic_pc(), offset as i32);
                vec![built(key.spell_on_degree(index, root), root, kind)]
            }

            Generator::HarmonicMinorDominant => vec![built(
                chord.root_name.clone(),
                chord.root(),
                ChordKind::Dominant7,
            )],
        }
    }
}

#[derive(Debug)]
pub struct SubstitutionRule {
    pub id: &'static str,
    pub category: SubstitutionCategory,
    pub predicate: RulePredicate,
    pub generator: Generator,
    /// Placeholders: {substitute}, {target}, {roman}, {shared}
    pub explanation: &'static str,
}

pub static RULES: [SubstitutionRule; 9] = [
    SubstitutionRule {
        id: "diatonic-same-function",
        category: SubstitutionCategory::Diatonic,
        predicate: RulePredicate::ANY,
        generator: Generator::SameFunctionSwap,
        explanation: "{substitute} shares the function of {roman} and {shared} of its tones",
    },
    SubstitutionRule {
        id: "secondary-dominant",
        category: SubstitutionCategory::SecondaryDominant,
        predicate: RulePredicate {
            qualities: &[ChordQuality::Major, ChordQuality::Minor],
            requires_next: true,
            ..RulePredicate::ANY
        },
        generator: Generator::SecondaryDominant,
        explanation: "{substitute} turns {target} into the dominant of the next chord",
    },
    SubstitutionRule {
        id: "leading-tone-diminished",
        category: SubstitutionCategory::LeadingTone,
        predicate: RulePredicate {
            requires_next: true,
            ..RulePredicate::ANY
        },
        generator: Generator::LeadingToneDiminished,
        explanation: "{substitute} leads a half step up into the next chord, {shared} tones shared with {target}",
    },
    SubstitutionRule {
        id: "tritone-substitution",
        category: SubstitutionCategory::Tritone,
        predicate: RulePredicate::ANY,
        generator: Generator::TritoneSubstitution,
        explanation: "{substitute} is a tritone from {target} and keeps {shared} of its tones",
    },
    SubstitutionRule {
        id: "backdoor-dominant",
        category: SubstitutionCategory::Backdoor,
        predicate: RulePredicate::ANY,
        generator: Generator::BackdoorDominant,
        explanation: "{substitute} is the backdoor dominant, resolving to the tonic from a whole step below",
    },
    SubstitutionRule {
        id: "borrowed-minor-iv",
        category: SubstitutionCategory::ModalInterchange,
        predicate: RulePredicate {
            modes: &[ModeId::Ionian],
            functions: &[HarmonicFunction::Predominant],
            ..RulePredicate::ANY
        },
        generator: Generator::ModalInterchange {
            degree: 4,
            kind: ChordKind::Minor7,
        },
        explanation: "{substitute} borrows iv from the parallel minor in place of {roman}",
    },
    SubstitutionRule {
        id: "borrowed-flat-vi",
        category: SubstitutionCategory::ModalInterchange,
        predicate: RulePredicate {
            modes: &[ModeId::Ionian],
            functions: &[HarmonicFunction::Tonic, HarmonicFunction::Predominant],
            ..RulePredicate::ANY
        },
        generator: Generator::ModalInterchange {
            degree: 6,
            kind: ChordKind::Major7,
        },
        explanation: "{substitute} borrows bVI from the parallel minor in place of {roman}",
    },
    SubstitutionRule {
        id: "harmonic-minor-dominant",
        category: SubstitutionCategory::HarmonicMinor,
        predicate: RulePredicate {
            modes: &[ModeId::Aeolian],
            degree: Some(5),
            ..RulePredicate::ANY
        },
        generator: Generator::HarmonicMinorDominant,
        explanation: "{substitute} raises the leading tone for a stronger pull back to the tonic",
    },
    SubstitutionRule {
        id: "chromatic-approach",
        category: SubstitutionCategory::ChromaticApproach,
        predicate: RulePredicate {
            requires_next: true,
            ..RulePredicate::ANY
        },
        generator: Generator::ChromaticApproach,
        explanation: "{substitute} approaches the next chord chromatically from below",
    },
];

/// Degree groups a same-function swap may move within, per mode.
fn function_group(mode: ModeId, degree: u8) -> &'static [u8] {
    const TONIC_PREDOMINANT_DOMINANT: &[&[u8]] = &[&[1, 3, 6], &[2, 4], &[5, 7]];
    let groups: &[&[u8]] = match mode {
        ModeId::Ionian | ModeId::Lydian | ModeId::Aeolian | ModeId::Locrian => {
            TONIC_PREDOMINANT_DOMINANT
        }
        ModeId::Dorian => &[&[1, 3], &[2, 4], &[5, 7]],
        ModeId::Phrygian => &[&[1, 3, 6], &[4, 7], &[2, 5]],
        ModeId::Mixolydian => &[&[1, 6], &[2, 4, 7], &[3, 5]],
        ModeId::HarmonicMinor => &[&[1, 6], &[2, 4], &[5, 7]],
    };
    groups
        .iter()
        .find(|g| g.contains(&degree))
        .copied()
        .unwrap_or(&[])
}

/// Spell `pc` on the letter just below the next chord's root ("F#" before G).
fn spell_below(next: &DiatonicChord, pc: PitchClass, use_flats: bool) -> String {
    parse_root(&next.root_name)
        .and_then(|(root, _)| SpelledNote::on_letter(root.letter.step(6), pc))
        .map(|note| note.to_string())
        .unwrap_or_else(|| note_name(pc as i32, use_flats).to_string())
}

fn render_explanation(
    template: &str,
    substitute: &str,
    chord: &DiatonicChord,
    shared: usize,
) -> String {
    template
        .replace("{substitute}", substitute)
        .replace("{target}", &chord.symbol)
        .replace("{roman}", &chord.roman_numeral)
        .replace("{shared}", &shared.to_string())
}

/// Ranked substitutes for `ctx.chord` using the stock weights.
pub fn suggest_substitutions(ctx: &SubstitutionContext<'_>) -> Vec<SubstitutionCandidate> {
    suggest_substitutions_with(ctx, &SubstitutionWeights::default())
}

/// Ranked substitutes for `ctx.chord`, best first. Each substitute symbol
/// appears once, never equal to the target.
pub fn suggest_substitutions_with(
    ctx: &SubstitutionContext<'_>,
    weights: &SubstitutionWeights,
) -> Vec<SubstitutionCandidate> {
    let target = ctx.chord;
    let mut candidates: Vec<SubstitutionCandidate> = Vec::new();

    for rule in &RULES {
        if !rule.predicate.accepts(ctx) {
            trace!(rule = rule.id, target = %target.symbol, "predicate rejected");
            continue;
        }

        let base = rule.generator.base_weight(weights);
        for (symbol, tones) in rule.generator.generate(ctx, weights) {
            if symbol == target.symbol {
                continue;
            }
            let shared = shared_tone_count(&tones, &target.tones);
            let candidate = SubstitutionCandidate {
                target_symbol: target.symbol.clone(),
                explanation: render_explanation(rule.explanation, &symbol, target, shared),
                substitute_symbol: symbol,
                category: rule.category,
                shared_tone_count: shared,
                score: base + weights.shared_tone_weight * shared as f64,
                rule_id: rule.id,
            };

            match candidates
                .iter_mut()
                .find(|c| c.substitute_symbol == candidate.substitute_symbol)
            {
                Some(existing) if candidate.score > existing.score => *existing = candidate,
                Some(_) => {}
                None => candidates.push(candidate),
            }
        }
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    debug!(
        target = %target.symbol,
        key = %ctx.key,
        count = candidates.len(),
        "substitution candidates"
    );
    candidates
}
