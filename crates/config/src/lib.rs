//! Configuration loading and validation for promptloom.
//!
//! Loads configuration from `~/.promptloom/config.toml` with environment
//! variable overrides. Every setting has a default, so a missing file is
//! not an error.

use promptloom_insight::{DEFAULT_THRESHOLDS, TierTracker};
use promptloom_sequence::{
    DEFAULT_RECENT_CAPACITY, DEFAULT_SUGGESTION_LIMIT, DEFAULT_WINDOW_SECS, RecentEvents,
};
use promptloom_template::{DEFAULT_MISSING_THRESHOLD, Guardrail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.promptloom/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Finalize guardrail
    #[serde(default)]
    pub guardrail: GuardrailConfig,

    /// Quality meter tiers
    #[serde(default)]
    pub quality: QualityConfig,

    /// Sequence tracking and suggestions
    #[serde(default)]
    pub sequence: SequenceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailConfig {
    /// Interrupt finalize once this many placeholders are unfilled.
    #[serde(default = "default_missing_threshold")]
    pub missing_threshold: usize,
}

fn default_missing_threshold() -> usize {
    DEFAULT_MISSING_THRESHOLD
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            missing_threshold: default_missing_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Score tiers, strictly ascending, each within 1..=100.
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<u32>,
}

fn default_thresholds() -> Vec<u32> {
    DEFAULT_THRESHOLDS.to_vec()
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            thresholds: default_thresholds(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Two consumptions closer than this form a transition.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Size of the recent-events ring.
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
}

fn default_window_secs() -> u64 {
    DEFAULT_WINDOW_SECS as u64
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

fn default_recent_capacity() -> usize {
    DEFAULT_RECENT_CAPACITY
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            suggestion_limit: default_suggestion_limit(),
            recent_capacity: default_recent_capacity(),
        }
    }
}

/// Longest accepted window: one day.
const MAX_WINDOW_SECS: u64 = 86_400;

impl AppConfig {
    /// Load configuration from the default path (~/.promptloom/config.toml).
    ///
    /// Environment variables override the file:
    /// - `PROMPTLOOM_MISSING_THRESHOLD`
    /// - `PROMPTLOOM_SEQUENCE_WINDOW_SECS`
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Apply overrides looked up by variable name.
    pub fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = var("PROMPTLOOM_MISSING_THRESHOLD") {
            self.guardrail.missing_threshold = parse_override("PROMPTLOOM_MISSING_THRESHOLD", &raw)?;
        }
        if let Some(raw) = var("PROMPTLOOM_SEQUENCE_WINDOW_SECS") {
            self.sequence.window_secs = parse_override("PROMPTLOOM_SEQUENCE_WINDOW_SECS", &raw)?;
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".promptloom")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.guardrail.missing_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "guardrail.missing_threshold must be at least 1".into(),
            ));
        }

        let thresholds = &self.quality.thresholds;
        if thresholds.iter().any(|t| !(1..=100).contains(t)) {
            return Err(ConfigError::ValidationError(
                "quality.thresholds must each be between 1 and 100".into(),
            ));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::ValidationError(
                "quality.thresholds must be strictly ascending".into(),
            ));
        }

        if self.sequence.window_secs == 0 || self.sequence.window_secs > MAX_WINDOW_SECS {
            return Err(ConfigError::ValidationError(format!(
                "sequence.window_secs must be between 1 and {MAX_WINDOW_SECS}"
            )));
        }
        if self.sequence.suggestion_limit == 0 {
            return Err(ConfigError::ValidationError(
                "sequence.suggestion_limit must be > 0".into(),
            ));
        }
        if self.sequence.recent_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "sequence.recent_capacity must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    pub fn guardrail(&self) -> Guardrail {
        Guardrail::new(self.guardrail.missing_threshold)
    }

    pub fn tier_tracker(&self) -> TierTracker {
        TierTracker::new(self.quality.thresholds.clone())
    }

    pub fn recent_events(&self) -> RecentEvents {
        RecentEvents::new(
            self.sequence.recent_capacity,
            chrono::Duration::seconds(self.sequence.window_secs as i64),
        )
    }
}

fn parse_override<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{name} is not a valid number: {raw:?}")))
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.guardrail.missing_threshold, 2);
        assert_eq!(config.quality.thresholds, vec![45, 65, 85]);
        assert_eq!(config.sequence.window_secs, 300);
        assert_eq!(config.sequence.suggestion_limit, 3);
        assert_eq!(config.sequence.recent_capacity, 50);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sequence]\nsuggestion_limit = 5\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.sequence.suggestion_limit, 5);
        assert_eq!(config.sequence.window_secs, 300);
        assert_eq!(config.guardrail.missing_threshold, 2);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[quality\nthresholds = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn invalid_file_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[quality]\nthresholds = [65, 45]\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn thresholds_must_be_in_range_and_ascending() {
        for bad in [vec![0, 50], vec![50, 101], vec![45, 45], vec![85, 65]] {
            let config = AppConfig {
                quality: QualityConfig { thresholds: bad.clone() },
                ..AppConfig::default()
            };
            assert!(config.validate().is_err(), "{bad:?} accepted");
        }
        let empty = AppConfig {
            quality: QualityConfig { thresholds: vec![] },
            ..AppConfig::default()
        };
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn zero_limits_rejected() {
        let mut config = AppConfig::default();
        config.sequence.suggestion_limit = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sequence.recent_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.guardrail.missing_threshold = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.sequence.window_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PROMPTLOOM_MISSING_THRESHOLD", "4"),
            ("PROMPTLOOM_SEQUENCE_WINDOW_SECS", " 120 "),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.guardrail.missing_threshold, 4);
        assert_eq!(config.sequence.window_secs, 120);
    }

    #[test]
    fn unparseable_override_is_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|name| {
            (name == "PROMPTLOOM_MISSING_THRESHOLD").then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("[guardrail]"));
        assert!(toml_str.contains("missing_threshold = 2"));
        assert!(toml_str.contains("window_secs = 300"));
    }

    #[test]
    fn builds_engine_values() {
        let config = AppConfig::default();
        assert_eq!(config.guardrail().threshold, 2);
        assert_eq!(config.tier_tracker(), TierTracker::default());
        assert_eq!(config.recent_events().window(), chrono::Duration::seconds(300));
    }
}
