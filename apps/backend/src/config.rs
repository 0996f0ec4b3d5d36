//! Server configuration from environment variables

use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;
use verb_quiz_core::{ParseError, RankThresholds, ThresholdError, VerbCatalog};

use crate::store::StoreLimits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),

    #[error("invalid {key} value {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("invalid RANK_THRESHOLDS: {0}")]
    Thresholds(#[from] ThresholdError),

    #[error("failed to read verb catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid verb catalog: {0}")]
    Catalog(#[from] ParseError),
}

/// Runtime configuration.
///
/// Recognized variables:
/// - HOST: bind address (default `0.0.0.0`)
/// - PORT: bind port (default `3000`)
/// - VERB_CATALOG_PATH: catalog file to serve instead of the built-in sets
/// - RANK_THRESHOLDS: `S,A,B,C` minimum percents (default `90,75,60,30`)
/// - MAX_SESSIONS_PER_DEVICE: sessions kept per device (default `5`)
/// - SESSION_IDLE_MINUTES: unfinished sessions expire after this (default `1440`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub catalog_path: Option<PathBuf>,
    pub rank_thresholds: RankThresholds,
    pub store_limits: StoreLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            catalog_path: None,
            rank_thresholds: RankThresholds::default(),
            store_limits: StoreLimits::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => defaults.port,
        };

        let catalog_path = lookup("VERB_CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let rank_thresholds = match lookup("RANK_THRESHOLDS") {
            Some(value) => value.parse::<RankThresholds>()?,
            None => defaults.rank_thresholds,
        };

        let mut store_limits = defaults.store_limits;
        if let Some(value) = lookup("MAX_SESSIONS_PER_DEVICE") {
            store_limits.max_sessions_per_device = positive("MAX_SESSIONS_PER_DEVICE", value)? as usize;
        }
        if let Some(value) = lookup("SESSION_IDLE_MINUTES") {
            let minutes = positive("SESSION_IDLE_MINUTES", value)?;
            store_limits.idle_session_ttl = Duration::minutes(i64::from(minutes));
        }

        Ok(Self {
            host,
            port,
            catalog_path,
            rank_thresholds,
            store_limits,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<VerbCatalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
                        path: path.clone(),
                        source,
                    })?;
                Ok(VerbCatalog::from_text(&content)?)
            }
            None => Ok(VerbCatalog::builtin()?),
        }
    }
}

fn positive(key: &'static str, value: String) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("VERB_CATALOG_PATH", "/srv/verbs.txt"),
            ("RANK_THRESHOLDS", "95,85,70,40"),
        ]))
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/verbs.txt")));
        assert_eq!(
            config.rank_thresholds,
            RankThresholds::new(95.0, 85.0, 70.0, 40.0).unwrap()
        );
    }

    #[test]
    fn test_store_limits() {
        let config = Config::from_lookup(lookup_from(&[
            ("MAX_SESSIONS_PER_DEVICE", "2"),
            ("SESSION_IDLE_MINUTES", "90"),
        ]))
        .unwrap();

        assert_eq!(config.store_limits.max_sessions_per_device, 2);
        assert_eq!(config.store_limits.idle_session_ttl, Duration::minutes(90));
        assert_eq!(
            config.store_limits.completed_session_ttl,
            StoreLimits::default().completed_session_ttl
        );

        for (key, value) in [("MAX_SESSIONS_PER_DEVICE", "0"), ("SESSION_IDLE_MINUTES", "soon")] {
            let err = Config::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidNumber { key: k, .. } if k == key));
        }
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(value) if value == "http"));
    }

    #[test]
    fn test_invalid_thresholds() {
        let err = Config::from_lookup(lookup_from(&[("RANK_THRESHOLDS", "60,75,90,30")])).unwrap_err();
        assert!(matches!(err, ConfigError::Thresholds(ThresholdError::Order)));
    }

    #[test]
    fn test_builtin_catalog_by_default() {
        let catalog = Config::default().load_catalog().unwrap();
        assert_eq!(catalog.len(), 20);
    }

    #[test]
    fn test_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SET: mini\nbo | bor | bodde | bodd | Проживать").unwrap();

        let config = Config {
            catalog_path: Some(file.path().to_path_buf()),
            ..Config::default()
        };
        let catalog = config.load_catalog().unwrap();

        assert_eq!(catalog.set_names().collect::<Vec<_>>(), vec!["mini"]);
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = Config {
            catalog_path: Some(PathBuf::from("/definitely/not/here.txt")),
            ..Config::default()
        };
        assert!(matches!(
            config.load_catalog(),
            Err(ConfigError::CatalogRead { .. })
        ));
    }
}
