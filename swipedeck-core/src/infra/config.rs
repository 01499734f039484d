use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::constants::{api, deck, gesture};

pub(crate) const APP_NAME: &str = "swipedeck";
const CONFIG_FILE: &str = "config.json";
const API_URL_ENV: &str = "SWIPEDECK_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub api_base_url: String,
    pub fallback_domain_suffix: String,
    pub request_timeout_secs: u64,
    pub domain_lookup_timeout_ms: u64,
    pub long_press_ms: u64,
    pub swipe_offset_px: f32,
    pub swipe_velocity_px_s: f32,
    pub advance_delay_ms: u64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            api_base_url: api::BASE_URL.to_string(),
            fallback_domain_suffix: api::FALLBACK_DOMAIN_SUFFIX.to_string(),
            request_timeout_secs: api::REQUEST_TIMEOUT_SECS,
            domain_lookup_timeout_ms: api::DOMAIN_LOOKUP_TIMEOUT_MS,
            long_press_ms: gesture::LONG_PRESS_MS,
            swipe_offset_px: gesture::SWIPE_OFFSET_PX,
            swipe_velocity_px_s: gesture::SWIPE_VELOCITY_PX_S,
            advance_delay_ms: deck::ADVANCE_DELAY_MS,
        }
    }
}

impl DeckConfig {
    /// Defaults, then the config file, then `SWIPEDECK_API_URL`.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        };

        // Allow env var to override config file for the API URL
        if let Ok(api_url) = std::env::var(API_URL_ENV) {
            config.api_base_url = api_url;
        }

        config
    }

    /// Read a config file, falling back to defaults if it is missing or
    /// unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<DeckConfig>(&content)
                    .map_err(|e| e.to_string())
            }) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "[DeckConfig] Ignoring unreadable config at {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", APP_NAME, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn domain_lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.domain_lookup_timeout_ms)
    }

    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}
