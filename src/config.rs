use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::DEFAULT_TOP_K;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub demo: DemoSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_top_k() -> usize { DEFAULT_TOP_K }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_gender_match_weight")]
    pub gender_match: f64,
    #[serde(default = "default_gender_mismatch_weight")]
    pub gender_mismatch: f64,
    #[serde(default = "default_age_in_range_weight")]
    pub age_in_range: f64,
    #[serde(default = "default_shared_interest_weight")]
    pub shared_interest: f64,
    #[serde(default = "default_completeness_weight")]
    pub completeness: f64,
    #[serde(default = "default_distance_penalty_weight")]
    pub distance_penalty: f64,
    #[serde(default = "default_proximity_weight")]
    pub proximity: f64,
    #[serde(default = "default_tie_breaker_weight")]
    pub tie_breaker: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            gender_match: default_gender_match_weight(),
            gender_mismatch: default_gender_mismatch_weight(),
            age_in_range: default_age_in_range_weight(),
            shared_interest: default_shared_interest_weight(),
            completeness: default_completeness_weight(),
            distance_penalty: default_distance_penalty_weight(),
            proximity: default_proximity_weight(),
            tie_breaker: default_tie_breaker_weight(),
        }
    }
}

fn default_gender_match_weight() -> f64 { 20.0 }
fn default_gender_mismatch_weight() -> f64 { 10.0 }
fn default_age_in_range_weight() -> f64 { 15.0 }
fn default_shared_interest_weight() -> f64 { 5.0 }
fn default_completeness_weight() -> f64 { 0.1 }
fn default_distance_penalty_weight() -> f64 { 0.2 }
fn default_proximity_weight() -> f64 { 10.0 }
fn default_tie_breaker_weight() -> f64 { 2.0 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            gender_match: config.gender_match,
            gender_mismatch: config.gender_mismatch,
            age_in_range: config.age_in_range,
            shared_interest: config.shared_interest,
            completeness: config.completeness,
            distance_penalty: config.distance_penalty,
            proximity: config.proximity,
            tie_breaker: config.tie_breaker,
        }
    }
}

/// Sample data used by the demo binary
#[derive(Debug, Clone, Deserialize)]
pub struct DemoSettings {
    #[serde(default = "default_demo_users")]
    pub users: usize,
    /// Fixed RNG seed; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            users: default_demo_users(),
            seed: None,
        }
    }
}

fn default_demo_users() -> usize { 12 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SPARK__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SPARK__SCORING__DEFAULT_TOP_K -> scoring.default_top_k
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SPARK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights_match_scoring_defaults() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.scoring.default_top_k, 10);
        assert_eq!(settings.demo.users, 12);
        assert_eq!(settings.demo.seed, None);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "compact");
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[scoring]\ndefault_top_k = 5\n\n[scoring.weights]\nshared_interest = 7.5\n\n[demo]\nseed = 42"
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.scoring.default_top_k, 5);
        assert_eq!(settings.scoring.weights.shared_interest, 7.5);
        assert_eq!(settings.scoring.weights.gender_match, 20.0);
        assert_eq!(settings.demo.seed, Some(42));
        assert_eq!(settings.demo.users, 12);
        assert_eq!(settings.logging.level, "info");
    }
}
