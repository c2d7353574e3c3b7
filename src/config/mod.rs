use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClockFormat {
    #[default]
    Hour24,      // "14:30"
    Hour12,      // "2:30pm"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Serve requests from the in-process mock backend instead of HTTP
    #[serde(default = "default_true")]
    pub use_mock_api: bool,
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    #[serde(default)]
    pub clock_format: ClockFormat,
    #[serde(default = "default_grid_start_hour")]
    pub grid_start_hour: u8,
    #[serde(default = "default_grid_end_hour")]
    pub grid_end_hour: u8,
}

fn default_api_base_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_mock_latency_ms() -> u64 {
    300
}

fn default_grid_start_hour() -> u8 {
    0
}

fn default_grid_end_hour() -> u8 {
    24
}

fn default_true() -> bool {
    true
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            use_mock_api: true,
            mock_latency_ms: default_mock_latency_ms(),
            font_scale: 1.0,
            clock_format: ClockFormat::Hour24,
            grid_start_hour: default_grid_start_hour(),
            grid_end_hour: default_grid_end_hour(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "weekplan", "weekplan")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Base URL without trailing slashes; a bare host gets "http://"
    pub fn base_url(&self) -> String {
        let url = self.api_base_url.trim().trim_end_matches('/');
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("http://{}", url)
        }
    }

    /// Visible grid hours as a half-open range, always at least one hour wide
    pub fn grid_hours(&self) -> std::ops::Range<u32> {
        let end = u32::from(self.grid_end_hour.min(24));
        let start = u32::from(self.grid_start_hour).min(end.saturating_sub(1));
        start..end.max(start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let mut config = Config::default();
        assert_eq!(config.base_url(), "http://localhost:5173");

        config.api_base_url = " localhost:8080/ ".to_string();
        assert_eq!(config.base_url(), "http://localhost:8080");

        config.api_base_url = "https://todo.example.com//".to_string();
        assert_eq!(config.base_url(), "https://todo.example.com");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"use_mock_api": false}"#).unwrap();
        assert!(!config.use_mock_api);
        assert_eq!(config.mock_latency_ms, 300);
        assert_eq!(config.clock_format, ClockFormat::Hour24);
        assert_eq!(config.grid_hours(), 0..24);
    }

    #[test]
    fn grid_hours_never_empty() {
        let config = Config {
            grid_start_hour: 30,
            grid_end_hour: 7,
            ..Config::default()
        };
        assert_eq!(config.grid_hours(), 6..7);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("weekplan-config-{}", std::process::id()));
        let path = dir.join("config.json");

        let config = Config {
            api_base_url: "http://example.test".to_string(),
            clock_format: ClockFormat::Hour12,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_base_url, "http://example.test");
        assert_eq!(loaded.clock_format, ClockFormat::Hour12);

        let _ = fs::remove_dir_all(&dir);
    }
}
