//! Runtime configuration read from environment variables.
//!
//! - `CONTACT_COLLECTOR_HOME`: data directory (default `~/.contact-collector`)
//! - `CONTACT_COLLECTOR_EXPORT_DIR`: where exports are written (default the
//!   user's download directory, else the data directory)
//! - `CONTACT_COLLECTOR_PERSIST`: keep the list between sessions (default off)
//! - `CONTACT_COLLECTOR_LOG`: `tracing` filter directive

use std::path::PathBuf;

use directories::{BaseDirs, UserDirs};
use thiserror::Error;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".contact-collector";
/// Filter applied when `CONTACT_COLLECTOR_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "contact_collector=info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("could not locate home directory; set CONTACT_COLLECTOR_HOME")]
    NoHome,

    #[error("CONTACT_COLLECTOR_PERSIST must be a boolean, got {0:?}")]
    InvalidPersist(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    /// Keep the list in the local archive between sessions.
    pub persist: bool,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = match var("CONTACT_COLLECTOR_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => BaseDirs::new()
                .map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
                .ok_or(ConfigError::NoHome)?,
        };

        let export_dir = var("CONTACT_COLLECTOR_EXPORT_DIR")
            .map(PathBuf::from)
            .or_else(|| {
                UserDirs::new().and_then(|dirs| dirs.download_dir().map(|dir| dir.to_path_buf()))
            })
            .unwrap_or_else(|| data_dir.join("exports"));

        let persist = match var("CONTACT_COLLECTOR_PERSIST") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidPersist(raw))?,
            None => false,
        };

        let log_filter =
            var("CONTACT_COLLECTOR_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            data_dir,
            export_dir,
            persist,
            log_filter,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("contact-collector.log")
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_values_win() {
        let config = Config::from_lookup(lookup(&[
            ("CONTACT_COLLECTOR_HOME", "/data/cc"),
            ("CONTACT_COLLECTOR_EXPORT_DIR", "/tmp/out"),
            ("CONTACT_COLLECTOR_PERSIST", "yes"),
            ("CONTACT_COLLECTOR_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/data/cc"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert!(config.persist);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.log_path(), PathBuf::from("/data/cc/contact-collector.log"));
    }

    #[test]
    fn persistence_is_off_by_default() {
        let config = Config::from_lookup(lookup(&[("CONTACT_COLLECTOR_HOME", "/data/cc")])).unwrap();
        assert!(!config.persist);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[
            ("CONTACT_COLLECTOR_HOME", "/data/cc"),
            ("CONTACT_COLLECTOR_PERSIST", ""),
            ("CONTACT_COLLECTOR_LOG", "  "),
        ]))
        .unwrap();
        assert!(!config.persist);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn bad_persist_flag_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("CONTACT_COLLECTOR_HOME", "/data/cc"),
            ("CONTACT_COLLECTOR_PERSIST", "sometimes"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPersist("sometimes".to_string()));
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
