use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::params::snapshot::default_state_path;
use crate::params::TrackIndex;

/// Embedded default configuration
const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// 1-based, as shown on the track buttons.
    pub start_track: usize,
    pub state_path: String,
    pub log_path: String,
    pub log_level: String,
    pub autosave: bool,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        match user_config_path() {
            Some(path) if path.exists() => Self::load_with_override(&path),
            _ => Self::defaults(),
        }
    }

    pub fn defaults() -> Self {
        // The embedded file ships with the crate and is covered by tests.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!("embedded config.toml is invalid: {}", e);
            Self {
                start_track: 1,
                state_path: String::new(),
                log_path: String::new(),
                log_level: "info".to_string(),
                autosave: true,
            }
        })
    }

    /// Keys present in the override replace the defaults; a bad override is
    /// reported and ignored.
    pub fn load_with_override(path: &Path) -> Self {
        match Self::try_load_with_override(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}", e);
                Self::defaults()
            }
        }
    }

    pub fn try_load_with_override(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_override_str(&contents)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))
    }

    fn from_override_str(contents: &str) -> Result<Self, String> {
        let mut base: toml::Table = toml::from_str(DEFAULT_CONFIG).map_err(|e| e.to_string())?;
        let user: toml::Table = toml::from_str(contents).map_err(|e| e.to_string())?;
        for (key, value) in user {
            if !base.contains_key(&key) {
                log::warn!("config: unknown key '{}'", key);
                continue;
            }
            base.insert(key, value);
        }
        toml::Value::Table(base)
            .try_into()
            .map_err(|e: toml::de::Error| e.to_string())
    }

    pub fn start_track(&self) -> TrackIndex {
        TrackIndex::new_clamped(self.start_track.saturating_sub(1))
    }

    pub fn state_path(&self) -> PathBuf {
        if self.state_path.is_empty() {
            default_state_path()
        } else {
            PathBuf::from(&self.state_path)
        }
    }

    pub fn log_path(&self) -> PathBuf {
        if self.log_path.is_empty() {
            dirs::data_dir()
                .map(|d| d.join("sixtrack").join("sixtrack.log"))
                .unwrap_or_else(|| PathBuf::from("sixtrack.log"))
        } else {
            PathBuf::from(&self.log_path)
        }
    }

    /// Unknown level names fall back to info.
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sixtrack").join("config.toml"))
}
