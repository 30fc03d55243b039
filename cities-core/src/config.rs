use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::Credentials;

pub const DEFAULT_BASE_URL: &str = "http://137.184.108.252:5000";

pub const EMAIL_VAR: &str = "EMAIL";
pub const PASSWORD_VAR: &str = "PASSWORD";
pub const BASE_URL_VAR: &str = "CITIES_BASE_URL";

/// What happens to rows already in the sink when a run renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Keep existing rows; repeated runs accumulate.
    #[default]
    Append,
    /// Clear the sink before rendering either outcome.
    Replace,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "http://localhost:5000"
/// email = "user@example.com"
/// password = "secret"
/// require_token = false
/// render_mode = "append"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub email: Option<String>,
    pub password: Option<String>,

    /// Fail the login step when the response carries no token.
    pub require_token: bool,

    pub render_mode: RenderMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            email: None,
            password: None,
            require_token: false,
            render_mode: RenderMode::default(),
        }
    }
}

impl Config {
    /// Load config from disk (or defaults if there is no file yet), then apply
    /// process environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Load config from `path`, or return defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
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
        let path = Self::config_file_path()?;
        self.save_to(&path)
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

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cities", "cities-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override values from `EMAIL`, `PASSWORD` and `CITIES_BASE_URL`.
    /// Empty variables count as set.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(email) = lookup(EMAIL_VAR) {
            self.email = Some(email);
        }
        if let Some(password) = lookup(PASSWORD_VAR) {
            self.password = Some(password);
        }
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            self.base_url = base_url;
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials { email: self.email.clone(), password: self.password.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_public_service() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.render_mode, RenderMode::Append);
        assert!(!cfg.require_token);
        assert_eq!(cfg.credentials(), Credentials::default());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = Config {
            email: Some("file@example.com".into()),
            password: Some("file-pass".into()),
            ..Config::default()
        };

        cfg.apply_env(env(&[(EMAIL_VAR, "env@example.com"), (BASE_URL_VAR, "http://localhost:5000")]));

        assert_eq!(cfg.email.as_deref(), Some("env@example.com"));
        assert_eq!(cfg.password.as_deref(), Some("file-pass"));
        assert_eq!(cfg.base_url, "http://localhost:5000");
    }

    #[test]
    fn missing_env_leaves_credentials_unset() {
        let mut cfg = Config::default();
        cfg.apply_env(env(&[]));

        assert!(cfg.email.is_none());
        assert!(cfg.password.is_none());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg: Config = toml::from_str(r#"render_mode = "replace""#).unwrap();

        assert_eq!(cfg.render_mode, RenderMode::Replace);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let path = std::env::temp_dir().join("cities-core-does-not-exist").join("config.toml");
        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("cities-core-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let cfg = Config {
            base_url: "http://127.0.0.1:5000".into(),
            email: Some("a@b.c".into()),
            password: Some("pw".into()),
            require_token: true,
            render_mode: RenderMode::Replace,
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(loaded, cfg);
    }
}
