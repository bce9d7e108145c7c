//! Client configuration.
//!
//! `SproutConfig` is built once at startup (file, then environment, then
//! explicit overrides) and handed to the components that need it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::locale::Locale;

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
const DEFAULT_PAGE_SIZE: u32 = 8;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Immutable runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SproutConfig {
    /// Base URL of the plant catalog API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Catalog page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Catalog request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub locale: Locale,
    /// Local plant store location (defaults to the user data dir)
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

impl Default for SproutConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            locale: Locale::default(),
            db_path: None,
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Default location of the configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sprout").join(CONFIG_FILE_NAME))
}

/// Default location of the local plant store.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sprout")
        .join("sprout.db")
}

impl SproutConfig {
    /// Load from the default config file and the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) => Self::load_from_path(&path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load a config file; a missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            Error::Config(format!(
                "Failed to parse config at {}: {}",
                path.display(),
                error
            ))
        })?;
        config.validated()
    }

    /// Apply `SPROUT_*` overrides from an environment lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = non_blank(lookup("SPROUT_API_URL")) {
            self.api_base_url = url;
        }
        if let Some(path) = non_blank(lookup("SPROUT_DB_PATH")) {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(locale) = non_blank(lookup("SPROUT_LOCALE")) {
            self.locale = locale.parse()?;
        }
        if let Some(page_size) = non_blank(lookup("SPROUT_PAGE_SIZE")) {
            self.page_size = page_size.parse().map_err(|_| {
                Error::Config(format!("SPROUT_PAGE_SIZE must be a number, got '{page_size}'"))
            })?;
        }
        self.normalize()
    }

    /// Replace the API base URL, validating it.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.api_base_url = url.into();
        self.validated()
    }

    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Store path, falling back to the platform data dir
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(default_db_path)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validated(mut self) -> Result<Self> {
        self.normalize()?;
        Ok(self)
    }

    fn normalize(&mut self) -> Result<()> {
        let url = non_blank(Some(self.api_base_url.clone()))
            .ok_or_else(|| Error::Config("api_base_url must not be empty".to_string()))?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(
                "api_base_url must include http:// or https://".to_string(),
            ));
        }
        self.api_base_url = url.trim_end_matches('/').to_string();

        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trimmed text, or `None` when blank
fn non_blank(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SproutConfig::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, SproutConfig::default());
        assert_eq!(config.page_size, 8);
    }

    #[test]
    fn file_values_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "api_base_url": " https://plants.example.com/ ", "locale": "pt" }"#,
        )
        .unwrap();

        let config = SproutConfig::load_from_path(&path).unwrap();
        assert_eq!(config.api_base_url, "https://plants.example.com");
        assert_eq!(config.locale, Locale::Portuguese);
        assert_eq!(config.page_size, 8);
    }

    #[test]
    fn rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let error = SproutConfig::load_from_path(&path).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }

    #[test]
    fn env_overrides_apply() {
        let env = HashMap::from([
            ("SPROUT_API_URL", "http://10.0.2.2:3333/"),
            ("SPROUT_LOCALE", "pt"),
            ("SPROUT_PAGE_SIZE", "4"),
            ("SPROUT_DB_PATH", "/tmp/plants.db"),
        ]);

        let mut config = SproutConfig::default();
        config
            .apply_env(|name| env.get(name).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.api_base_url, "http://10.0.2.2:3333");
        assert_eq!(config.locale, Locale::Portuguese);
        assert_eq!(config.page_size, 4);
        assert_eq!(config.resolved_db_path(), PathBuf::from("/tmp/plants.db"));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(SproutConfig::default().with_api_base_url("localhost").is_err());

        let mut config = SproutConfig::default();
        let result = config.apply_env(|name| (name == "SPROUT_PAGE_SIZE").then(|| "0".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_request_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "request_timeout_secs": 0 }"#).unwrap();

        let error = SproutConfig::load_from_path(&path).unwrap_err();
        assert!(error.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = SproutConfig::default();
        config
            .apply_env(|name| (name == "SPROUT_API_URL").then(|| "   ".to_string()))
            .unwrap();
        assert_eq!(config, SproutConfig::default());
    }
}
