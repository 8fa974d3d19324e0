//! CLI command implementations

use anyhow::{anyhow, bail, Context, Result};
use harmony::{
    all_tags, filter_progressions, find_matching_progressions, note_name, parse_key,
    starting_chords, suggest_next_chords, transpose_progression, ChordProfile, ChordType,
    HarmonyEngine, ModeFamily, ModeId, NextChordSuggestion, SubstitutionWeights,
    SuggestionOptions,
};
use harmonyconf::{ConfigSources, HarmonyConfig, ScoringConfig, SuggestionsConfig};
use serde::Serialize;
use tracing::debug;

use crate::formatter::{pad, Formatter};

/// Scoring section of the config as engine weights.
pub fn weights_from(scoring: &ScoringConfig) -> SubstitutionWeights {
    SubstitutionWeights {
        shared_tone_weight: scoring.shared_tone_weight,
        min_shared_tones: scoring.min_shared_tones,
        diatonic_bonus: scoring.diatonic_bonus,
        secondary_dominant: scoring.secondary_dominant,
        leading_tone: scoring.leading_tone,
        tritone: scoring.tritone,
        backdoor: scoring.backdoor,
        borrowed_penalty: scoring.borrowed_penalty,
        harmonic_minor_dominant: scoring.harmonic_minor_dominant,
        chromatic_approach: scoring.chromatic_approach,
    }
}

/// Suggestion options from config, with command-line flags taking precedence.
pub fn suggestion_options(
    config: &SuggestionsConfig,
    profile: Option<ChordProfile>,
    spice: bool,
    limit: Option<usize>,
) -> Result<SuggestionOptions> {
    let profile = match profile {
        Some(profile) => profile,
        None => config
            .profile
            .parse()
            .map_err(|e: String| anyhow!(e))
            .context("Invalid [suggestions] profile in config")?,
    };
    Ok(SuggestionOptions {
        profile,
        use_spice: spice || config.use_spice,
        limit: Some(limit.unwrap_or(config.limit)),
    })
}

fn require_key(text: &str) -> Result<harmony::Key> {
    parse_key(text).ok_or_else(|| {
        anyhow!(
            "Cannot read a key from '{}'\n\n\
             Keys start with a note letter, optionally followed by a mode:\n  \
             C\n  Em\n  Bb major\n  F# dorian",
            text
        )
    })
}

#[derive(Serialize)]
struct KeyReport {
    key: String,
    tonic: String,
    mode: ModeId,
    family: ModeFamily,
    scale: Vec<String>,
    relative_major: String,
    use_flats: bool,
}

pub fn key(fmt: &Formatter, text: &str) -> Result<()> {
    let key = require_key(text)?;
    let report = KeyReport {
        key: key.to_string(),
        tonic: key.tonic_name(),
        mode: key.mode(),
        family: key.mode().family(),
        scale: key.scale_spelling().to_vec(),
        relative_major: note_name(key.relative_major() as i32, key.use_flats()).to_string(),
        use_flats: key.use_flats(),
    };

    fmt.emit(&report, |f| {
        let mut out = format!("{}\n", f.heading(&report.key));
        out.push_str(&format!("  {} {}\n", pad("family:", 16), report.family));
        out.push_str(&format!("  {} {}\n", pad("scale:", 16), report.scale.join(" ")));
        out.push_str(&format!(
            "  {} {}\n",
            pad("relative major:", 16),
            report.relative_major
        ));
        out
    })
}

pub fn chords(fmt: &Formatter, tonic: &str, mode: ModeId, sevenths: bool) -> Result<()> {
    let key = harmony::Key::new(tonic, mode)?;
    let engine = HarmonyEngine::for_key(key, sevenths);
    let chords = engine.chords();

    fmt.emit(chords, |f| {
        let mut out = format!("{}\n", f.heading(&engine.key().to_string()));
        for chord in chords {
            out.push_str(&format!(
                "  {} {} {}\n",
                f.numeral(&pad(&chord.roman_numeral, 6)),
                f.chord(&pad(&chord.symbol, 8)),
                f.dim(&chord.harmonic_function.to_string())
            ));
        }
        out
    })
}

#[derive(Serialize)]
struct DegreeReport {
    symbol: String,
    key: String,
    degree: String,
}

pub fn degree(fmt: &Formatter, symbol: &str, key_text: &str) -> Result<()> {
    let key = require_key(key_text)?;
    let engine = HarmonyEngine::for_key(key, false);
    let Some(degree) = engine.degree_of(symbol) else {
        bail!("'{}' has no Roman numeral in {}", symbol, engine.key());
    };
    let report = DegreeReport {
        symbol: symbol.to_string(),
        key: engine.key().to_string(),
        degree,
    };
    fmt.emit(&report, |f| f.numeral(&report.degree))
}

pub fn subs(
    fmt: &Formatter,
    config: &HarmonyConfig,
    symbol: &str,
    key_text: &str,
    next: Option<&str>,
    sevenths: bool,
) -> Result<()> {
    let key = require_key(key_text)?;
    let engine = HarmonyEngine::for_key(key, sevenths).with_weights(weights_from(&config.scoring));
    let candidates = engine.substitutions(symbol, next)?;
    debug!(count = candidates.len(), "substitutions ranked");

    fmt.emit(&candidates, |f| {
        let mut out = format!(
            "{}\n",
            f.heading(&format!("Substitutes for {} in {}", symbol, engine.key()))
        );
        if candidates.is_empty() {
            out.push_str(&format!("  {}\n", f.dim("(none)")));
        }
        for candidate in &candidates {
            out.push_str(&format!(
                "  {} {} {:>5.2}  {}\n",
                f.chord(&pad(&candidate.substitute_symbol, 8)),
                pad(&candidate.category.to_string(), 20),
                candidate.score,
                f.dim(&candidate.explanation)
            ));
        }
        out
    })
}

pub fn suggest(
    fmt: &Formatter,
    key_text: &str,
    symbols: &[String],
    options: &SuggestionOptions,
) -> Result<()> {
    let key = require_key(key_text)?;
    let engine = HarmonyEngine::for_key(key, false);
    let suggestions = engine.suggest_after(symbols, options);

    fmt.emit(&suggestions, |f| {
        let mut out = String::new();
        for s in &suggestions {
            let mut line = format!(
                "{} {} {:>5.2}",
                f.numeral(&pad(&s.roman, 8)),
                f.chord(&pad(&s.symbol, 8)),
                s.weight
            );
            if !s.alternatives.is_empty() {
                line.push_str(&format!("  {}", f.dim(&s.alternatives.join(" "))));
            }
            out.push_str(&line);
            out.push('\n');
        }
        out
    })
}

pub fn progressions(
    fmt: &Formatter,
    family: ModeFamily,
    tags: &[String],
    chord_type: Option<ChordType>,
    tonic: Option<&str>,
) -> Result<()> {
    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
    let found = filter_progressions(family, &tags, chord_type);

    if let Some(tonic) = tonic {
        let transposed = found
            .iter()
            .map(|p| transpose_progression(p, tonic))
            .collect::<harmony::Result<Vec<_>>>()?;
        return fmt.emit(&transposed, |f| {
            let mut out = String::new();
            for t in &transposed {
                out.push_str(&format!(
                    "{} {}\n  {}\n",
                    f.heading(&pad(&t.id, 22)),
                    f.dim(&t.name),
                    f.chord(&t.chords.join(" "))
                ));
            }
            out
        });
    }

    fmt.emit(&found, |f| {
        let mut out = String::new();
        for p in &found {
            out.push_str(&format!(
                "{} {} {:.2}  {}\n",
                f.heading(&pad(p.id, 22)),
                f.numeral(&pad(&p.roman.join(" "), 28)),
                p.weight,
                f.dim(&p.tags.join(", "))
            ));
        }
        out
    })
}

pub fn find_matches(fmt: &Formatter, family: ModeFamily, romans: &[String]) -> Result<()> {
    let pool = filter_progressions(family, &[], None);
    let matches = find_matching_progressions(romans, &pool);

    fmt.emit(&matches, |f| {
        let mut out = String::new();
        for m in &matches {
            let roman = pool
                .iter()
                .find(|p| p.id == m.progression_id)
                .map(|p| p.roman.join(" "))
                .unwrap_or_default();
            out.push_str(&format!(
                "{} {} {}\n",
                f.heading(&pad(&m.progression_id, 22)),
                f.numeral(&pad(&roman, 28)),
                f.dim(&format!("at {}..={}", m.start, m.end))
            ));
        }
        out
    })
}

fn render_next(f: &Formatter, suggestions: &[NextChordSuggestion]) -> String {
    let mut out = String::new();
    for s in suggestions {
        out.push_str(&format!(
            "{} {} {:>5.2}  {}\n",
            f.numeral(&pad(&s.roman, 8)),
            f.chord(&pad(&s.chord, 8)),
            s.weight,
            f.dim(&format!("x{}", s.occurrences))
        ));
    }
    out
}

pub fn next(fmt: &Formatter, tonic: &str, mode: ModeId, romans: &[String]) -> Result<()> {
    let suggestions = suggest_next_chords(romans, tonic, mode)?;
    fmt.emit(&suggestions, |f| render_next(f, &suggestions))
}

pub fn start(fmt: &Formatter, family: ModeFamily, tonic: &str) -> Result<()> {
    let suggestions = starting_chords(family, tonic)?;
    fmt.emit(&suggestions, |f| render_next(f, &suggestions))
}

pub fn tags(fmt: &Formatter) -> Result<()> {
    let tags = all_tags();
    fmt.emit(&tags, |_| tags.join("\n"))
}

#[derive(Serialize)]
struct ConfigReport<'a> {
    config: &'a HarmonyConfig,
    files: Vec<String>,
    env_overrides: &'a [String],
}

pub fn show_config(fmt: &Formatter, config: &HarmonyConfig, sources: &ConfigSources) -> Result<()> {
    let report = ConfigReport {
        config,
        files: sources
            .files
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        env_overrides: &sources.env_overrides,
    };

    fmt.emit(&report, |_| {
        let mut out = String::new();
        if report.files.is_empty() {
            out.push_str("# sources: defaults only\n");
        }
        for file in &report.files {
            out.push_str(&format!("# file: {}\n", file));
        }
        for var in report.env_overrides {
            out.push_str(&format!("# env: {}\n", var));
        }
        out.push_str(&config.to_toml());
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_follow_config() {
        let mut scoring = ScoringConfig::default();
        assert_eq!(weights_from(&scoring), SubstitutionWeights::default());

        scoring.tritone = 4.0;
        scoring.min_shared_tones = 1;
        let weights = weights_from(&scoring);
        assert_eq!(weights.tritone, 4.0);
        assert_eq!(weights.min_shared_tones, 1);
    }

    #[test]
    fn flags_override_suggestion_config() {
        let config = SuggestionsConfig {
            profile: "seventh".to_string(),
            use_spice: false,
            limit: 8,
        };
        let options = suggestion_options(&config, None, false, None).unwrap();
        assert_eq!(options.profile, ChordProfile::Seventh);
        assert_eq!(options.limit, Some(8));

        let options = suggestion_options(&config, Some(ChordProfile::Jazz), true, Some(2)).unwrap();
        assert_eq!(options.profile, ChordProfile::Jazz);
        assert!(options.use_spice);
        assert_eq!(options.limit, Some(2));
    }

    #[test]
    fn bad_profile_in_config_is_reported() {
        let config = SuggestionsConfig {
            profile: "bebop".to_string(),
            ..SuggestionsConfig::default()
        };
        let err = suggestion_options(&config, None, false, None).unwrap_err();
        assert!(format!("{:#}", err).contains("bebop"));
    }

    #[test]
    fn require_key_explains_failure() {
        let err = require_key("nonsense").unwrap_err();
        assert!(err.to_string().contains("nonsense"));
        assert!(require_key("Bb dorian").is_ok());
    }
}
