//! TOML-based application configuration.
//!
//! Stores the deployment parameters:
//! - Cycle anchor (weekday, hour, reference timezone) -- **required**, the
//!   recurrence rule is a product decision that must never be baked into code
//! - Badge thresholds
//! - Roster backend endpoint and credentials
//!
//! Configuration is stored at `~/.config/chestboard/config.toml` unless a
//! path is supplied. A missing or malformed cycle anchor fails loading
//! immediately; everything else falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Weekday;
use chrono_tz::Tz;

use crate::cycle::CycleConfig;
use crate::error::ConfigError;
use crate::roster::BadgeThresholds;

/// Cycle anchor settings. All three fields are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleSettings {
    /// Weekday name, e.g. "sunday".
    #[serde(default)]
    pub anchor_weekday: Option<String>,
    /// Hour of day (0-23) at which a new cycle begins.
    #[serde(default)]
    pub anchor_hour: Option<u32>,
    /// IANA timezone the anchor is expressed in, e.g. "UTC" or
    /// "America/Mexico_City".
    #[serde(default)]
    pub reference_timezone: Option<String>,
}

/// Roster backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_current_table")]
    pub current_table: String,
    #[serde(default = "default_last_table")]
    pub last_table: String,
    #[serde(default = "default_uploads_table")]
    pub uploads_table: String,
}

fn default_current_table() -> String {
    "players_current".into()
}
fn default_last_table() -> String {
    "players_last".into()
}
fn default_uploads_table() -> String {
    "raw_chests".into()
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            current_table: default_current_table(),
            last_table: default_last_table(),
            uploads_table: default_uploads_table(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cycle: CycleSettings,
    #[serde(default)]
    pub badges: BadgeThresholds,
    #[serde(default)]
    pub source: SourceSettings,
}

impl Config {
    /// Default on-disk location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("chestboard").join("config.toml"))
    }

    /// Load and validate configuration from `path`.
    ///
    /// Validation runs eagerly so a bad cycle anchor surfaces at startup,
    /// not on the first tick.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.cycle_config()?;
        Ok(config)
    }

    /// Write this configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        let raw = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, raw).map_err(|e| save_failed(e.to_string()))
    }

    /// Resolve the validated cycle recurrence rule.
    pub fn cycle_config(&self) -> Result<CycleConfig, ConfigError> {
        let weekday_raw = self
            .cycle
            .anchor_weekday
            .as_deref()
            .ok_or_else(|| ConfigError::MissingKey("cycle.anchor_weekday".into()))?;
        let anchor_hour = self
            .cycle
            .anchor_hour
            .ok_or_else(|| ConfigError::MissingKey("cycle.anchor_hour".into()))?;
        let tz_raw = self
            .cycle
            .reference_timezone
            .as_deref()
            .ok_or_else(|| ConfigError::MissingKey("cycle.reference_timezone".into()))?;

        let anchor_weekday = Weekday::from_str(weekday_raw).map_err(|_| {
            ConfigError::InvalidValue {
                key: "cycle.anchor_weekday".into(),
                message: format!("not a weekday name: {weekday_raw:?}"),
            }
        })?;
        let reference_tz = Tz::from_str(tz_raw).map_err(|_| ConfigError::InvalidValue {
            key: "cycle.reference_timezone".into(),
            message: format!("unknown IANA timezone: {tz_raw:?}"),
        })?;

        CycleConfig::new(anchor_weekday, anchor_hour, reference_tz)
    }

    /// Starter file for `config init`: the UTC deployment, with the
    /// alternative anchor noted for operators.
    pub fn starter_toml() -> &'static str {
        r#"# Chestboard configuration.

[cycle]
# When a new scoring week begins. This is a per-deployment product decision;
# the other live deployment uses anchor_hour = 11 in "America/Mexico_City".
anchor_weekday = "sunday"
anchor_hour = 17
reference_timezone = "UTC"

[badges]
chest_hero_chests = 100
legend_score = 2000
consistent_chests = 70
consistent_score = 1000

[source]
base_url = ""
api_key = ""
"#
    }
}
