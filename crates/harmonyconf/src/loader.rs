//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, HarmonyConfig};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided it replaces the local override and is returned
/// even when missing, so loading reports the bad path instead of silently
/// falling back to defaults.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    // System config
    let system = PathBuf::from("/etc/chordcraft/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("chordcraft/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(path.to_path_buf());
        return files;
    }

    // Local override (current directory)
    let local = PathBuf::from("chordcraft.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read one config file as a raw TOML table.
///
/// The table is also deserialized on its own so type errors point at the
/// file that caused them.
pub fn load_table(path: &Path) -> Result<toml::Table, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_table(&contents, path)
}

fn parse_table(contents: &str, path: &Path) -> Result<toml::Table, ConfigError> {
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    table_to_config(table.clone(), path)?;
    Ok(table)
}

/// Deserialize a merged table into the typed config.
pub fn table_to_config(table: toml::Table, path: &Path) -> Result<HarmonyConfig, ConfigError> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Merge `overlay` into `base`. Nested tables merge key by key; any other
/// value in `overlay` replaces the one in `base`.
pub fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Apply `CHORDCRAFT_*` and `RUST_LOG` overrides from the process environment.
pub fn apply_env_overrides(config: &mut HarmonyConfig, sources: &mut ConfigSources) {
    apply_overrides_from(config, sources, |name| env::var(name).ok());
}

/// Apply overrides using `lookup` in place of the process environment.
///
/// Values that fail to parse are ignored and not recorded as overrides.
pub fn apply_overrides_from<F>(config: &mut HarmonyConfig, sources: &mut ConfigSources, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let mut record = |name: &str| sources.env_overrides.push(name.to_string());

    // Suggestions
    if let Some(v) = lookup("CHORDCRAFT_PROFILE") {
        config.suggestions.profile = v;
        record("CHORDCRAFT_PROFILE");
    }
    if let Some(v) = lookup("CHORDCRAFT_USE_SPICE") {
        if let Some(flag) = parse_flag(&v) {
            config.suggestions.use_spice = flag;
            record("CHORDCRAFT_USE_SPICE");
        }
    }
    if let Some(v) = lookup("CHORDCRAFT_LIMIT") {
        if let Ok(limit) = v.parse() {
            config.suggestions.limit = limit;
            record("CHORDCRAFT_LIMIT");
        }
    }

    // Scoring
    if let Some(v) = lookup("CHORDCRAFT_MIN_SHARED_TONES") {
        if let Ok(min) = v.parse() {
            config.scoring.min_shared_tones = min;
            record("CHORDCRAFT_MIN_SHARED_TONES");
        }
    }
    if let Some(v) = lookup("CHORDCRAFT_SHARED_TONE_WEIGHT") {
        if let Ok(weight) = v.parse() {
            config.scoring.shared_tone_weight = weight;
            record("CHORDCRAFT_SHARED_TONE_WEIGHT");
        }
    }

    // Telemetry
    if let Some(v) = lookup("CHORDCRAFT_LOG_LEVEL") {
        config.telemetry.log_level = v;
        record("CHORDCRAFT_LOG_LEVEL");
    }
    // Also support RUST_LOG
    if let Some(v) = lookup("RUST_LOG") {
        config.telemetry.log_level = v;
        record("RUST_LOG");
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
