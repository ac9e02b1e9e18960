use crate::error::{Result, TaskoraError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskoraConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub sync: SyncSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_snooze_minutes")]
    pub default_snooze_minutes: u32,
}

fn default_poll_interval_secs() -> u64 {
    crate::sync::DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_snooze_minutes() -> u32 {
    15
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            default_snooze_minutes: default_snooze_minutes(),
        }
    }
}

impl SyncSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "taskora", "taskora")
}

impl TaskoraConfig {
    /// Load from an explicit path, or from the per-user config file.
    ///
    /// An explicit path must exist. A missing per-user file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::read(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TaskoraError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config: TaskoraConfig = serde_yaml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.yml"))
    }

    pub fn default_session_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().join("session.json"))
    }

    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api.base_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sync.poll_interval_secs == 0 {
            return Err(TaskoraError::Config(
                "sync.poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(TaskoraError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        url::Url::parse(&self.api.base_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = TaskoraConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.sync.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.sync.default_snooze_minutes, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        std::fs::write(&path, "api:\n  base_url: https://tasks.example.com/api/\n").unwrap();

        let config = TaskoraConfig::load(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "https://tasks.example.com/api/");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.sync.poll_interval_secs, 60);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = TaskoraConfig::load(Some(&temp_dir.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, TaskoraError::Config(_)));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        std::fs::write(&path, "sync:\n  poll_interval_secs: 0\n").unwrap();
        assert!(TaskoraConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_api_url_override() {
        let config = TaskoraConfig::default().with_api_url(Some("http://10.0.0.2:8080".into()));
        assert_eq!(config.api.base_url, "http://10.0.0.2:8080");
        let untouched = TaskoraConfig::default().with_api_url(None);
        assert_eq!(untouched.api.base_url, "http://localhost:3000");
    }
}
