//! Configuration model.
//!
//! Every field has a default so a missing or partial `config.toml` still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MentorlyConfig {
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub analytics: AnalyticsSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    /// Root of the JSON data directory; the platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Tuning knobs for the derived metrics.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub scoring: ScoringWeights,
    pub keywords: KeywordSettings,
    /// Window used for a mentor's sessions-per-week figure
    pub trailing_weeks: u32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            scoring: ScoringWeights::default(),
            keywords: KeywordSettings::default(),
            trailing_weeks: 4,
        }
    }
}

/// Weights of the mentor recommendation heuristic.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringWeights {
    /// Added per mentee interest matching a mentor tag
    pub interest_weight: f64,
    /// Multiplied by the mentor's 0-5 rating
    pub rating_weight: f64,
    /// Completed sessions per experience point
    pub sessions_divisor: f64,
    /// Upper bound of the experience contribution
    pub session_cap: f64,
    pub max_results: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interest_weight: 30.0,
            rating_weight: 20.0,
            sessions_divisor: 10.0,
            session_cap: 20.0,
            max_results: 6,
        }
    }
}

/// Feedback keyword extraction settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KeywordSettings {
    /// Tokens must be strictly longer than this many characters
    pub min_token_len: usize,
    pub max_keywords: usize,
}

impl Default for KeywordSettings {
    fn default() -> Self {
        Self {
            min_token_len: 4,
            max_keywords: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: MentorlyConfig = toml::from_str(
            r#"
            [analytics.scoring]
            interest_weight = 50.0
            "#,
        )
        .unwrap();

        assert_eq!(config.analytics.scoring.interest_weight, 50.0);
        assert_eq!(config.analytics.scoring.rating_weight, 20.0);
        assert_eq!(config.analytics.keywords.max_keywords, 10);
        assert_eq!(config.analytics.trailing_weeks, 4);
        assert_eq!(config.logging.level, "info");
        assert!(config.storage.data_dir.is_none());
    }
}
