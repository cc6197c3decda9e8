use crate::data::persistence::{Persistable, get_config_dir};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const BASE_URL_ENV: &str = "HOLIDAYS_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("base URL '{0}' is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("unknown country code '{0}'")]
    UnknownCountry(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub base_url: String,
    pub default_country: String,
    pub timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_country: "US".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_dir()?)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        SettingsWrapper {
            settings: self.clone(),
        }
        .save_to(dir)
    }

    /// Layers the environment and the command line over the file values:
    /// `--base-url` beats `HOLIDAYS_API_BASE_URL`, which beats config.yaml.
    pub fn with_overrides(
        mut self,
        env_base_url: Option<String>,
        cli_base_url: Option<String>,
        cli_timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = env_base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(url) = cli_base_url {
            self.base_url = url;
        }
        if let Some(secs) = cli_timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let ok = reqwest::Url::parse(&self.base_url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !ok {
            return Err(SettingsError::InvalidBaseUrl(self.base_url.clone()));
        }
        if crate::data::options::country_by_code(&self.default_country).is_none() {
            return Err(SettingsError::UnknownCountry(self.default_country.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();
        assert_eq!(settings.base_url, "http://localhost:8000/api");
        assert_eq!(settings.default_country, "US");
        assert_eq!(settings.timeout_secs, 30);
    }

    #[test]
    fn test_settings_wrapper_missing_key_uses_default() {
        let wrapper: SettingsWrapper = serde_norway::from_str("other: 1").unwrap();
        assert_eq!(wrapper.settings, AppSettings::default());
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let yaml = "settings:\n  default_country: GB\n";
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings.default_country, "GB");
        assert_eq!(wrapper.settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_from_dir() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.yaml"),
            "settings:\n  base_url: https://holidays.example.com/api\n  timeout_secs: 5\n",
        )
        .unwrap();
        let settings = AppSettings::load_from(tmp.path()).unwrap();
        assert_eq!(settings.base_url, "https://holidays.example.com/api");
        assert_eq!(settings.timeout_secs, 5);
    }

    #[test]
    fn test_load_from_empty_dir_is_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(AppSettings::load_from(tmp.path()).unwrap(), AppSettings::default());
    }

    #[test]
    fn test_cli_override_beats_env() {
        let s = AppSettings::default().with_overrides(
            Some("http://env/api".to_string()),
            Some("http://cli/api".to_string()),
            None,
        );
        assert_eq!(s.base_url, "http://cli/api");
    }

    #[test]
    fn test_env_override_beats_file() {
        let s = AppSettings::default().with_overrides(Some("http://env/api".to_string()), None, Some(3));
        assert_eq!(s.base_url, "http://env/api");
        assert_eq!(s.timeout_secs, 3);
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        let s = AppSettings::default().with_overrides(Some("  ".to_string()), None, None);
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let s = AppSettings {
            base_url: "/api".to_string(),
            ..AppSettings::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_country() {
        let s = AppSettings {
            default_country: "ZZ".to_string(),
            ..AppSettings::default()
        };
        assert!(matches!(s.validate(), Err(SettingsError::UnknownCountry(_))));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(AppSettings::default().validate().is_ok());
    }
}
