use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::{Path, PathBuf}};

use crate::{model::Coordinates, permission::Permission};

/// Environment variable that takes precedence over the configured API key.
pub const API_KEY_ENV: &str = "MYWEATHER_APP_ID";

/// Fixed location used in place of a positioning fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationConfig> for Coordinates {
    fn from(l: LocationConfig) -> Self {
        Coordinates::new(l.latitude, l.longitude)
    }
}

/// Remembered answers to the location permission prompt.
///
/// `None` means the user was never asked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsConfig {
    pub coarse_location: Option<bool>,
    pub fine_location: Option<bool>,
}

impl PermissionsConfig {
    pub fn get(&self, permission: Permission) -> Option<bool> {
        match permission {
            Permission::CoarseLocation => self.coarse_location,
            Permission::FineLocation => self.fine_location,
        }
    }

    pub fn set(&mut self, permission: Permission, granted: bool) {
        match permission {
            Permission::CoarseLocation => self.coarse_location = Some(granted),
            Permission::FineLocation => self.fine_location = Some(granted),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key (`appid`).
    pub api_key: Option<String>,

    /// Override for the API base URL, e.g. a local mock.
    pub base_url: Option<String>,

    /// Example TOML:
    /// [location]
    /// latitude = 51.5
    /// longitude = -0.12
    pub location: Option<LocationConfig>,

    #[serde(default)]
    pub permissions: PermissionsConfig,
}

impl Config {
    /// Returns the API key stored in the file, if present and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// The key to send to the API: [`API_KEY_ENV`] first, then the stored one.
    ///
    /// The environment value is never copied into `self`, so saving the
    /// config cannot persist it.
    pub fn effective_api_key(&self) -> Option<String> {
        let from_env = env::var(API_KEY_ENV).ok();
        self.effective_api_key_from(from_env.as_deref())
            .map(str::to_owned)
    }

    fn effective_api_key_from<'a>(&'a self, from_env: Option<&'a str>) -> Option<&'a str> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_location(&mut self, coordinates: Coordinates) {
        self.location = Some(LocationConfig {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        });
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "example", "myweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory holding the preference store.
    pub fn data_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(cfg.api_key().is_none());
        assert!(cfg.location.is_none());
        assert_eq!(cfg.permissions, PermissionsConfig::default());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(cfg.api_key().is_none());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());
        cfg.set_location(Coordinates::new(59.91, 10.75));
        cfg.permissions.set(Permission::CoarseLocation, true);
        cfg.permissions.set(Permission::FineLocation, false);
        cfg.save_to(&path).unwrap();

        let back = Config::load_from(&path).unwrap();
        assert_eq!(back.api_key(), Some("OPEN_KEY"));
        assert_eq!(
            back.location.map(Coordinates::from),
            Some(Coordinates::new(59.91, 10.75))
        );
        assert_eq!(back.permissions.get(Permission::CoarseLocation), Some(true));
        assert_eq!(back.permissions.get(Permission::FineLocation), Some(false));
    }

    #[test]
    fn parses_hand_written_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
api_key = "abc"

[location]
latitude = 40.4
longitude = -3.7
"#,
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.api_key(), Some("abc"));
        assert!(cfg.base_url.is_none());
        assert_eq!(cfg.permissions.get(Permission::FineLocation), None);
    }

    #[test]
    fn env_key_takes_precedence_over_file_key() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Default::default()
        };

        assert_eq!(cfg.effective_api_key_from(Some("ENV_KEY")), Some("ENV_KEY"));
        assert_eq!(cfg.effective_api_key_from(Some("  ")), Some("FILE_KEY"));
        assert_eq!(cfg.effective_api_key_from(None), Some("FILE_KEY"));
        assert_eq!(Config::default().effective_api_key_from(None), None);
    }

    #[test]
    fn env_key_is_never_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.effective_api_key_from(Some("SECRET_FROM_ENV")), Some("SECRET_FROM_ENV"));
        cfg.permissions.set(Permission::FineLocation, true);
        cfg.save_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("SECRET_FROM_ENV"));
        assert!(Config::load_from(&path).unwrap().api_key().is_none());
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
