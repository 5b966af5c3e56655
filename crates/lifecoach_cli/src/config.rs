//! CLI configuration loaded from TOML.
//!
//! Resolution order: built-in defaults, then the config file (when it
//! exists), then command-line overrides.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "lifecoach.db";
const DEFAULT_USER: &str = "local";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Owner of every document read or written.
    pub user_id: String,
    pub db_path: PathBuf,
    /// Must be absolute.
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let (data_dir, log_dir) = match project_dirs() {
            Some(dirs) => (dirs.data_dir().to_path_buf(), dirs.data_dir().join("logs")),
            None => {
                let fallback = std::env::temp_dir().join("lifecoach");
                (fallback.clone(), fallback.join("logs"))
            }
        };
        Self {
            user_id: DEFAULT_USER.to_string(),
            db_path: data_dir.join(DB_FILE_NAME),
            log_dir,
            log_level: lifecoach_core::default_log_level().to_string(),
        }
    }
}

impl Config {
    /// Default config file location, e.g. `~/.config/lifecoach/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Reads `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config `{}`", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config `{}`", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        if config.user_id.trim().is_empty() {
            anyhow::bail!("user_id must not be empty");
        }
        Ok(config)
    }

    pub fn with_user(mut self, user_id: Option<String>) -> Self {
        if let Some(user_id) = user_id.filter(|id| !id.trim().is_empty()) {
            self.user_id = user_id.trim().to_string();
        }
        self
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "lifecoach")
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::path::PathBuf;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.user_id, "local");
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "user_id = \"alice\"\ndb_path = \"/tmp/coach.db\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.user_id, "alice");
        assert_eq!(config.db_path, PathBuf::from("/tmp/coach.db"));
        assert_eq!(config.log_level, Config::default().log_level);
    }

    #[test]
    fn empty_user_is_rejected_and_flag_wins() {
        assert!(Config::parse("user_id = \"  \"").is_err());
        let config = Config::default().with_user(Some("bob".to_string()));
        assert_eq!(config.user_id, "bob");
        let unchanged = Config::default().with_user(Some(" ".to_string()));
        assert_eq!(unchanged.user_id, "local");
    }
}
