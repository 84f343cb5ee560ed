use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::models::LoggingLevel;

const SETTINGS_FILE: &str = "settings.toml";

/// Console settings, persisted as TOML in the platform config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the Netureon web UI is served.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub log_level: LoggingLevel,
    /// Also write logs to daily files in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 30,
            log_level: LoggingLevel::Info,
            log_dir: None,
        }
    }
}

impl Settings {
    /// Path of the settings file for the current user.
    pub fn default_path() -> Result<PathBuf, String> {
        let project_dirs = ProjectDirs::from("org", "netureon", "netureon-console")
            .ok_or_else(|| "Failed to determine project directories".to_string())?;
        Ok(project_dirs.config_dir().join(SETTINGS_FILE))
    }

    pub fn load() -> Result<Self, String> {
        Self::load_from(&Self::default_path()?)
    }

    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings file {}: {}", path.display(), e))?;

        toml::from_str(&content)
            .map_err(|e| format!("Failed to parse settings file {}: {}", path.display(), e))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = toml::to_string(self)
            .map_err(|e| format!("Failed to serialize settings to TOML: {}", e))?;

        fs::write(path, content).map_err(|e| format!("Failed to write settings file: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "base_url = \"http://netureon.lan:8080\"\nlog_level = \"DEBUG\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.base_url, "http://netureon.lan:8080");
        assert_eq!(settings.log_level, LoggingLevel::Debug);
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = Settings {
            request_timeout_secs: 5,
            log_dir: Some(dir.path().join("logs")),
            ..Settings::default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse settings file"), "{err}");
    }
}
