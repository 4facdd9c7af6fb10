//! Configuration Module - User preferences from the platform config dir
//!
//! Supports:
//! - Analysis service base URL
//! - Display language
//! - Log level
//! - Score animation pacing

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use crate::animator::AnimationTiming;
use crate::i18n::Locale;

/// Public deployment of the analysis service
pub const DEFAULT_BASE_URL: &str = "https://resume-ats-checker-82vc.onrender.com";

/// ATS Checker Configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Remote service settings
    pub service: ServiceConfig,
    /// Score animation settings
    pub animation: AnimationConfig,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Display language: ar, en
    pub locale: Locale,
    /// Log level: off, trace, debug, info, warn, error
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Ar,
            log_level: "info".to_string(),
        }
    }
}

impl GeneralConfig {
    /// Parsed `log_level`; `None` when it names no known level
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.log_level.trim().parse().ok()
    }
}

/// Remote analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL; requests go to `{base_url}/analyze`
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Score animation pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Milliseconds between counter ticks
    pub tick_ms: u64,
    /// Number of ticks from 0 to the final score
    pub steps: u32,
    /// Delay before the ring moves to its final position
    pub ring_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let timing = AnimationTiming::default();
        Self {
            tick_ms: timing.tick.as_millis() as u64,
            steps: timing.steps,
            ring_delay_ms: timing.ring_delay.as_millis() as u64,
        }
    }
}

impl AnimationConfig {
    /// Zero values fall back to a 1ms tick and a single step
    pub fn timing(&self) -> AnimationTiming {
        AnimationTiming {
            tick: Duration::from_millis(self.tick_ms.max(1)),
            steps: self.steps.max(1),
            ring_delay: Duration::from_millis(self.ring_delay_ms),
        }
    }
}

impl Config {
    /// Load config from the default path; defaults when no file exists
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "tunclon", "ats-checker")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".ats-checker")
                    .join("config.toml")
            })
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path() -> PathBuf {
        Self::default_path().with_file_name("ats-checker.log")
    }

    /// Create default config file if it doesn't exist. Returns the path.
    pub fn ensure_exists() -> Result<PathBuf> {
        let path = Self::default_path();
        if !path.exists() {
            Config::default().save_to(&path)?;
            tracing::info!("Created default config at {}", path.display());
        }
        Ok(path)
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, base_url: Option<&str>, locale: Option<Locale>) -> Self {
        if let Some(url) = base_url {
            self.service.base_url = url.to_string();
        }
        if let Some(locale) = locale {
            self.general.locale = locale;
        }
        self
    }
}

/// Generate a sample config file with comments
pub fn generate_sample_config() -> String {
    format!(
        r#"# ATS Checker Configuration
# Location: {path}

[general]
# Display language: "ar" or "en"
locale = "ar"

# Log level: off, trace, debug, info, warn, error
# In the TUI, logs go to ats-checker.log next to this file
log_level = "info"

[service]
# Analysis service; the client posts to <base_url>/analyze
base_url = "{url}"

[animation]
# Milliseconds between score counter ticks
tick_ms = 30

# Ticks from 0 to the final score
steps = 50

# Delay before the score ring fills (milliseconds)
ring_delay_ms = 100
"#,
        path = Config::default_path().display(),
        url = DEFAULT_BASE_URL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.locale, Locale::Ar);
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.animation.timing(), AnimationTiming::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.general.locale = Locale::En;
        config.service.base_url = "http://localhost:5000".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_sample_config() {
        let sample = generate_sample_config();
        let config: Config = toml::from_str(&sample).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[service]\nbase_url = \"http://x\"\n").unwrap();
        assert_eq!(config.service.base_url, "http://x");
        assert_eq!(config.animation.steps, 50);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_zero_animation_values_are_clamped() {
        let animation = AnimationConfig {
            tick_ms: 0,
            steps: 0,
            ring_delay_ms: 0,
        };
        let timing = animation.timing();
        assert_eq!(timing.tick, Duration::from_millis(1));
        assert_eq!(timing.steps, 1);
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("http://127.0.0.1:9"), Some(Locale::En));
        assert_eq!(config.service.base_url, "http://127.0.0.1:9");
        assert_eq!(config.general.locale, Locale::En);

        let untouched = Config::default().with_overrides(None, None);
        assert_eq!(untouched, Config::default());
    }

    #[test]
    fn test_log_level_parsing() {
        let mut general = GeneralConfig::default();
        assert_eq!(general.level_filter(), Some(LevelFilter::INFO));

        general.log_level = " debug ".into();
        assert_eq!(general.level_filter(), Some(LevelFilter::DEBUG));

        general.log_level = "off".into();
        assert_eq!(general.level_filter(), Some(LevelFilter::OFF));
    }

    #[test]
    fn test_unknown_log_level_still_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nlog_level = \"verbose\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.log_level, "verbose");
        assert_eq!(config.general.level_filter(), None);
    }

    #[test]
    fn test_log_path_sits_next_to_config() {
        assert_eq!(Config::log_path().parent(), Config::default_path().parent());
        assert!(Config::log_path().ends_with("ats-checker.log"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nlocale = \"xx\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
