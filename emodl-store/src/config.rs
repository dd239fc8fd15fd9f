//! Configuration management.

use crate::error::StoreError;
use crate::loader::{LoaderOptions, ProviderOptions};
use emodl_core::{ProviderKind, UserScope};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Provider-specific configurations, keyed by `bttv`, `ffz`, `seventv`.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Aggregation deadline in seconds.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Whether this provider is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// User scope to load channel emotes for (`twitch:123` or an account id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

fn default_deadline_secs() -> u64 {
    5
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            deadline_secs: default_deadline_secs(),
            http_timeout_secs: default_http_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scope: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let providers = ProviderKind::all()
            .iter()
            .map(|kind| (config_key(*kind).to_string(), ProviderConfig::default()))
            .collect();

        Self {
            general: GeneralConfig::default(),
            providers,
        }
    }
}

/// Key of a provider in the `providers` table.
pub fn config_key(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Bttv => "bttv",
        ProviderKind::Ffz => "ffz",
        ProviderKind::SevenTv => "seventv",
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("emodl")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    pub fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::default_path())
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.general.deadline_secs == 0 {
            return Err(StoreError::Config("deadline_secs must be positive".into()));
        }
        if self.general.http_timeout_secs == 0 {
            return Err(StoreError::Config("http_timeout_secs must be positive".into()));
        }
        for kind in ProviderKind::all() {
            self.scope(*kind)?;
        }
        Ok(())
    }

    /// Returns the configuration of a provider, accepting its CLI name as key.
    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        self.providers
            .get(config_key(kind))
            .or_else(|| self.providers.get(kind.cli_name()))
    }

    /// Returns whether a provider is enabled.
    pub fn is_provider_enabled(&self, kind: ProviderKind) -> bool {
        self.provider(kind).is_none_or(|p| p.enabled)
    }

    /// Returns the parsed user scope of a provider.
    pub fn scope(&self, kind: ProviderKind) -> Result<Option<UserScope>, StoreError> {
        self.provider(kind)
            .and_then(|p| p.scope.as_deref())
            .map(str::parse::<UserScope>)
            .transpose()
            .map_err(StoreError::from)
    }

    /// Returns the aggregation deadline.
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.general.deadline_secs)
    }

    /// Returns the per-request HTTP timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.general.http_timeout_secs)
    }

    /// Builds loader options from this configuration.
    pub fn loader_options(&self) -> Result<LoaderOptions, StoreError> {
        let mut options = LoaderOptions::default()
            .with_deadline(self.deadline())
            .with_http_timeout(self.http_timeout());

        for kind in ProviderKind::all() {
            *options.provider_mut(*kind) = ProviderOptions {
                enabled: self.is_provider_enabled(*kind),
                scope: self.scope(*kind)?,
            };
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config.general.deadline_secs, 5);
        assert_eq!(config.general.http_timeout_secs, 30);
        assert!(ProviderKind::all().iter().all(|k| config.is_provider_enabled(*k)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.general.deadline_secs = 9;
        config.providers.insert(
            "seventv".to_string(),
            ProviderConfig {
                enabled: true,
                scope: Some("twitch:1048391821".to_string()),
            },
        );
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.deadline(), Duration::from_secs(9));
        assert_eq!(
            loaded.scope(ProviderKind::SevenTv).unwrap(),
            Some(UserScope::platform("twitch", "1048391821"))
        );
    }

    #[test]
    fn test_partial_file_and_cli_name_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"providers":{"ffz":{"enabled":false},"7tv":{"scope":"60ae3e98"}}}"#)
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert!(!config.is_provider_enabled(ProviderKind::Ffz));
        assert!(config.is_provider_enabled(ProviderKind::Bttv));
        assert_eq!(
            config.scope(ProviderKind::SevenTv).unwrap(),
            Some(UserScope::account("60ae3e98"))
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{"general":{"deadline_secs":0}}"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(StoreError::Config(_))));

        std::fs::write(&path, r#"{"providers":{"bttv":{"scope":"twitch:"}}}"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(StoreError::Core(_))));
    }

    #[test]
    fn test_loader_options() {
        let mut config = Config::default();
        config.providers.get_mut("bttv").unwrap().enabled = false;
        config.providers.get_mut("ffz").unwrap().scope = Some("twitch:22484632".into());

        let options = config.loader_options().unwrap();
        assert!(!options.bttv.enabled);
        assert_eq!(options.ffz.scope, Some(UserScope::platform("twitch", "22484632")));
        assert_eq!(options.deadline, Duration::from_secs(5));
    }
}
