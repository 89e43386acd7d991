use crate::KanbanResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_OWNER: &str = "local";
const DEFAULT_PLACEHOLDER_PREFIX: &str = "tmp";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Board owner used when none is given on the command line
    #[serde(default)]
    pub default_owner: Option<String>,
    /// Prefix for client-side ids issued before the store assigns durable ones
    #[serde(default)]
    pub placeholder_prefix: Option<String>,
    /// Seconds before an unanswered store call counts as failed
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/kanban/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("kanban/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("kanban\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the platform config path, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(config) = Self::load_from(&config_path) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> KanbanResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn effective_owner<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_owner.as_deref())
            .unwrap_or(DEFAULT_OWNER)
    }

    pub fn effective_placeholder_prefix(&self) -> &str {
        self.placeholder_prefix
            .as_deref()
            .unwrap_or(DEFAULT_PLACEHOLDER_PREFIX)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_owner(None), "local");
        assert_eq!(config.effective_placeholder_prefix(), "tmp");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_explicit_owner_wins() {
        let config = AppConfig {
            default_owner: Some("alice".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.effective_owner(Some("bob")), "bob");
        assert_eq!(config.effective_owner(None), "alice");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "placeholder_prefix = \"draft\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.effective_placeholder_prefix(), "draft");
        assert_eq!(config.default_owner, None);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "placeholder_prefix = [").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
