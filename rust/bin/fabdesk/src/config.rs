//! Client-side settings.
//!
//! Reads/writes `~/.fabdesk/config.toml`. Command-line flags win over the file.

use std::path::{Path, PathBuf};

use fabdesk_core::ServiceConfig;
use serde::{Deserialize, Serialize};

/// Client configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Directory holding `fabdesk.redb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Explicit database file, overrides `data_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// Default output format when `--output` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl ClientConfig {
    /// Default config file path: ~/.fabdesk/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Storage settings: file values first, then command-line overrides.
    /// Without any data directory the store lives under ~/.fabdesk.
    pub fn service_config(&self, overrides: &ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            data_dir: overrides
                .data_dir
                .clone()
                .or_else(|| self.data_dir.clone())
                .or_else(|| Some(dirs_path())),
            db_path: overrides.db_path.clone().or_else(|| self.db_path.clone()),
            in_memory: overrides.in_memory,
        }
    }
}

/// Return the fabdesk config directory (~/.fabdesk).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".fabdesk")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let config = ClientConfig {
            data_dir: Some(PathBuf::from("/srv/fabdesk")),
            db_path: None,
            output: Some("json".into()),
        };
        config.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("db_path"));
        assert_eq!(ClientConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn flags_override_file() {
        let file = ClientConfig {
            data_dir: Some(PathBuf::from("/from/file")),
            db_path: Some(PathBuf::from("/from/file/x.redb")),
            output: None,
        };
        let flags = ServiceConfig {
            data_dir: Some(PathBuf::from("/from/flag")),
            ..Default::default()
        };
        let merged = file.service_config(&flags);
        assert_eq!(merged.data_dir, Some(PathBuf::from("/from/flag")));
        assert_eq!(merged.resolve_db_path(), PathBuf::from("/from/file/x.redb"));
    }

    #[test]
    fn bad_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = [").unwrap();
        let err = ClientConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
