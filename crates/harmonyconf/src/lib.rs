//! Minimal configuration loading for chordcraft.
//!
//! The harmony engine is pure computation and takes its knobs as plain
//! values; this crate finds and merges the files and environment variables
//! those values come from.
//!
//! # Usage
//!
//! ```rust,no_run
//! use harmonyconf::HarmonyConfig;
//!
//! let config = HarmonyConfig::load().expect("Failed to load config");
//! println!("tritone weight: {}", config.scoring.tritone);
//! println!("profile: {}", config.suggestions.profile);
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/chordcraft/config.toml` (system)
//! 2. `~/.config/chordcraft/config.toml` (user)
//! 3. `./chordcraft.toml` (local override, or the `--config` path)
//! 4. Environment variables (`CHORDCRAFT_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [scoring]
//! shared_tone_weight = 2.0
//! min_shared_tones = 2
//! tritone = 1.5
//! borrowed_penalty = -0.5
//!
//! [suggestions]
//! profile = "jazz"
//! use_spice = true
//! limit = 8
//!
//! [telemetry]
//! log_level = "info"
//! ```

pub mod loader;
pub mod output;
pub mod scoring;

pub use loader::{discover_config_files_with_override, ConfigSources};
pub use output::{SuggestionsConfig, TelemetryConfig};
pub use scoring::ScoringConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Complete chordcraft configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HarmonyConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub suggestions: SuggestionsConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl HarmonyConfig {
    /// Load configuration from all sources.
    ///
    /// Load order (later wins):
    /// 1. Compiled defaults
    /// 2. `/etc/chordcraft/config.toml`
    /// 3. `~/.config/chordcraft/config.toml`
    /// 4. `./chordcraft.toml`
    /// 5. Environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration with `config_path` in place of `./chordcraft.toml`,
    /// then apply env overrides.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration and return information about sources.
    pub fn load_with_sources() -> Result<(Self, ConfigSources), ConfigError> {
        Self::load_with_sources_from(None)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let files = loader::discover_config_files_with_override(config_path);
        let (mut config, mut sources) = Self::load_files(&files)?;

        // Apply environment variable overrides
        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Merge exactly `files`, in order, without consulting the environment.
    pub fn load_files(files: &[PathBuf]) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut merged = toml::Table::new();

        for path in files {
            let table = loader::load_table(path)?;
            loader::merge_tables(&mut merged, table);
            sources.files.push(path.clone());
        }

        let origin = files
            .last()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("<defaults>"));
        let config = loader::table_to_config(merged, &origin)?;
        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Build TOML manually for nicer formatting
        let mut output = String::new();

        output.push_str("# chordcraft configuration\n\n");

        let s = &self.scoring;
        output.push_str("[scoring]\n");
        output.push_str(&format!("shared_tone_weight = {:?}\n", s.shared_tone_weight));
        output.push_str(&format!("min_shared_tones = {}\n", s.min_shared_tones));
        output.push_str(&format!("diatonic_bonus = {:?}\n", s.diatonic_bonus));
        output.push_str(&format!("secondary_dominant = {:?}\n", s.secondary_dominant));
        output.push_str(&format!("leading_tone = {:?}\n", s.leading_tone));
        output.push_str(&format!("tritone = {:?}\n", s.tritone));
        output.push_str(&format!("backdoor = {:?}\n", s.backdoor));
        output.push_str(&format!("borrowed_penalty = {:?}\n", s.borrowed_penalty));
        output.push_str(&format!(
            "harmonic_minor_dominant = {:?}\n",
            s.harmonic_minor_dominant
        ));
        output.push_str(&format!("chromatic_approach = {:?}\n", s.chromatic_approach));

        output.push_str("\n[suggestions]\n");
        output.push_str(&format!("profile = \"{}\"\n", self.suggestions.profile));
        output.push_str(&format!("use_spice = {}\n", self.suggestions.use_spice));
        output.push_str(&format!("limit = {}\n", self.suggestions.limit));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!(
            "log_level = \"{}\"\n",
            self.telemetry.log_level
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = HarmonyConfig::default();
        assert_eq!(config.scoring.tritone, 1.5);
        assert_eq!(config.suggestions.profile, "triad");
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = HarmonyConfig::default();
        let text = config.to_toml();
        assert!(text.contains("[scoring]"));
        assert!(text.contains("[suggestions]"));
        assert!(text.contains("borrowed_penalty = -0.5"));

        let parsed: HarmonyConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_files_later_wins() {
        let dir = tempfile::tempdir().unwrap();
        let system = write_config(
            &dir,
            "system.toml",
            "[scoring]\ntritone = 4.0\nbackdoor = 0.25\n\n[suggestions]\nlimit = 3\n",
        );
        let local = write_config(&dir, "local.toml", "[scoring]\ntritone = 5.0\n");

        let (config, sources) = HarmonyConfig::load_files(&[system.clone(), local.clone()]).unwrap();
        assert_eq!(config.scoring.tritone, 5.0);
        assert_eq!(config.scoring.backdoor, 0.25);
        assert_eq!(config.suggestions.limit, 3);
        assert_eq!(sources.files, vec![system, local]);
    }

    #[test]
    fn test_load_files_empty_is_defaults() {
        let (config, sources) = HarmonyConfig::load_files(&[]).unwrap();
        assert_eq!(config, HarmonyConfig::default());
        assert!(sources.files.is_empty());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = HarmonyConfig::load_from(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_bad_file_names_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_config(&dir, "bad.toml", "[suggestions]\nuse_spice = \"sure\"\n");
        let err = HarmonyConfig::load_files(&[bad]).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
