use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use themecore::cache::DEFAULT_CACHE_CAPACITY;
use themecore::height::HeightParams;
use themecore::types::MessageOrder;

use crate::error::{Result, ThemeError};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub cache_capacity: usize,
    pub avatar_spacing_px: f64,
    pub avatar_offset_px: f64,
    /// Host build number, if known. Older builds list messages newest-first.
    pub host_build_version: Option<u32>,
    pub setting_debounce_ms: u64,
    pub frame_interval_ms: u64,
    pub poll_interval_ms: u64,
    pub plugin_path: String,
    /// Max log level applied by `theme-inspect` when loaded with `--config`.
    /// The library never sets the global logger level itself.
    pub log_level: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            avatar_spacing_px: 3.0,
            avatar_offset_px: 20.0,
            host_build_version: None,
            setting_debounce_ms: 100,
            frame_interval_ms: 16,
            poll_interval_ms: 500,
            plugin_path: String::new(),
            log_level: "warn".to_string(),
        }
    }
}

impl ThemeConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(ThemeError::ConfigFile)?;
        Self::from_json(&raw)
    }

    pub fn height_params(&self) -> HeightParams {
        HeightParams {
            spacing: self.avatar_spacing_px,
            offset: self.avatar_offset_px,
        }
    }

    pub fn message_order(&self) -> MessageOrder {
        MessageOrder::for_build(self.host_build_version)
    }

    pub fn setting_debounce(&self) -> Duration {
        Duration::from_millis(self.setting_debounce_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ThemeConfig::from_json(r#"{"host_build_version": 28000, "log_level": "off"}"#)
            .unwrap();
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.message_order(), MessageOrder::Reversed);
        assert_eq!(config.log_filter(), log::LevelFilter::Off);
        assert_eq!(config.height_params(), HeightParams::default());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, r#"{"cache_capacity": 64, "avatar_offset_px": 12}"#).unwrap();

        let config = ThemeConfig::load(&path).unwrap();
        assert_eq!(config.cache_capacity, 64);
        assert_eq!(config.avatar_offset_px, 12.0);
        assert!(ThemeConfig::load(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn bad_json_is_a_config_error() {
        assert!(ThemeConfig::from_json("{").is_err());
    }
}
