use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::constants;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub resume: ResumeConfig,

    #[serde(default)]
    pub reporting: ReportingConfig,

    #[serde(default)]
    pub controls: ControlsConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_true")]
    pub autoplay: bool,

    #[serde(default = "default_volume")]
    pub default_volume: f64,

    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeConfig {
    #[serde(default = "default_persist_interval")]
    pub persist_interval_secs: u64,

    #[serde(default = "default_prompt_timeout")]
    pub prompt_timeout_secs: u64,

    /// Stored positions at or past this fraction of the duration count as finished
    #[serde(default = "default_finished_fraction")]
    pub finished_fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    #[serde(default = "default_watched_after")]
    pub watched_after_secs: f64,

    #[serde(default = "default_watched_fraction")]
    pub watched_fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default = "default_hide_delay")]
    pub hide_delay_ms: u64,

    #[serde(default = "default_skip_indicator")]
    pub skip_indicator_ms: u64,

    #[serde(default = "default_skip_back_zone")]
    pub skip_back_zone: f64,

    #[serde(default = "default_skip_forward_zone")]
    pub skip_forward_zone: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            let contents = fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
            info!("Config loaded successfully");
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", config_path);
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join(constants::APP_DIR).join("config.toml"))
    }

    /// Location of the resume-point database, falling back to the user data dir
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().context("Failed to get data directory")?;
        Ok(data_dir.join(constants::APP_DIR).join("store.db"))
    }

    pub fn player_settings(&self) -> PlayerSettings {
        PlayerSettings {
            api_base_url: self.api.base_url.trim_end_matches('/').to_string(),
            autoplay: self.playback.autoplay,
            default_volume: self.playback.default_volume.clamp(0.0, 1.0),
            skip_seconds: self.playback.skip_seconds,
            persist_interval: Duration::from_secs(self.resume.persist_interval_secs),
            resume_prompt_timeout: Duration::from_secs(self.resume.prompt_timeout_secs),
            finished_fraction: self.resume.finished_fraction,
            watched_after_secs: self.reporting.watched_after_secs,
            watched_fraction: self.reporting.watched_fraction,
            hide_controls_after: Duration::from_millis(self.controls.hide_delay_ms),
            skip_indicator_duration: Duration::from_millis(self.controls.skip_indicator_ms),
            skip_back_zone: self.controls.skip_back_zone,
            skip_forward_zone: self.controls.skip_forward_zone,
        }
    }
}

/// Runtime view of the configuration consumed by the player components
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    pub api_base_url: String,
    pub autoplay: bool,
    pub default_volume: f64,
    pub skip_seconds: f64,
    pub persist_interval: Duration,
    pub resume_prompt_timeout: Duration,
    pub finished_fraction: f64,
    pub watched_after_secs: f64,
    pub watched_fraction: f64,
    pub hide_controls_after: Duration,
    pub skip_indicator_duration: Duration,
    pub skip_back_zone: f64,
    pub skip_forward_zone: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Config::default().player_settings()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: default_true(),
            default_volume: default_volume(),
            skip_seconds: default_skip_seconds(),
        }
    }
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            persist_interval_secs: default_persist_interval(),
            prompt_timeout_secs: default_prompt_timeout(),
            finished_fraction: default_finished_fraction(),
        }
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            watched_after_secs: default_watched_after(),
            watched_fraction: default_watched_fraction(),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: default_hide_delay(),
            skip_indicator_ms: default_skip_indicator(),
            skip_back_zone: default_skip_back_zone(),
            skip_forward_zone: default_skip_forward_zone(),
        }
    }
}

// Default value functions
fn default_base_url() -> String { constants::DEFAULT_API_BASE_URL.to_string() }
fn default_timeout() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_volume() -> f64 { 1.0 }
fn default_skip_seconds() -> f64 { constants::SKIP_SECONDS }
fn default_persist_interval() -> u64 { constants::PERSIST_INTERVAL_SECS }
fn default_prompt_timeout() -> u64 { constants::RESUME_PROMPT_SECS }
fn default_finished_fraction() -> f64 { constants::FINISHED_FRACTION }
fn default_watched_after() -> f64 { constants::WATCHED_AFTER_SECS }
fn default_watched_fraction() -> f64 { constants::WATCHED_FRACTION }
fn default_hide_delay() -> u64 { constants::HIDE_CONTROLS_MS }
fn default_skip_indicator() -> u64 { constants::SKIP_INDICATOR_MS }
fn default_skip_back_zone() -> f64 { constants::SKIP_BACK_ZONE }
fn default_skip_forward_zone() -> f64 { constants::SKIP_FORWARD_ZONE }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_player_behaviour() {
        let settings = Config::default().player_settings();

        assert_eq!(settings.persist_interval, Duration::from_secs(5));
        assert_eq!(settings.resume_prompt_timeout, Duration::from_secs(5));
        assert_eq!(settings.hide_controls_after, Duration::from_secs(3));
        assert_eq!(settings.skip_indicator_duration, Duration::from_millis(800));
        assert_eq!(settings.finished_fraction, 0.95);
        assert_eq!(settings.watched_after_secs, 30.0);
        assert_eq!(settings.watched_fraction, 0.1);
        assert_eq!(settings.skip_seconds, 10.0);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:8080/"

            [controls]
            hide_delay_ms = 1500
            "#,
        )
        .unwrap();

        let settings = config.player_settings();
        assert_eq!(settings.api_base_url, "http://localhost:8080");
        assert_eq!(settings.hide_controls_after, Duration::from_millis(1500));
        assert_eq!(settings.skip_indicator_duration, Duration::from_millis(800));
        assert!(settings.autoplay);
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/tmp/hive.db"));

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.database_path().unwrap(), PathBuf::from("/tmp/hive.db"));
        assert_eq!(parsed.api.base_url, config.api.base_url);
    }
}
