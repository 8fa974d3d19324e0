//! Suggestion defaults and logging.

use serde::{Deserialize, Serialize};

/// Defaults for next-chord suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsConfig {
    /// Chord profile: triad, seventh or jazz.
    /// Default: triad
    #[serde(default = "SuggestionsConfig::default_profile")]
    pub profile: String,

    /// Add altered dominants to jazz suggestions.
    /// Default: false
    #[serde(default)]
    pub use_spice: bool,

    /// Maximum suggestions returned.
    /// Default: 8
    #[serde(default = "SuggestionsConfig::default_limit")]
    pub limit: usize,
}

impl SuggestionsConfig {
    fn default_profile() -> String {
        "triad".to_string()
    }

    fn default_limit() -> usize {
        8
    }
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            profile: Self::default_profile(),
            use_spice: false,
            limit: Self::default_limit(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    /// Default: info
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_defaults() {
        let suggestions = SuggestionsConfig::default();
        assert_eq!(suggestions.profile, "triad");
        assert!(!suggestions.use_spice);
        assert_eq!(suggestions.limit, 8);
    }

    #[test]
    fn test_telemetry_defaults() {
        assert_eq!(TelemetryConfig::default().log_level, "info");
    }
}
