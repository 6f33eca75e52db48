//! Daemon configuration with TOML file support.

use std::path::{Path, PathBuf};

use ballot_utils::LogFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for `ballotd`.
///
/// Loaded from a TOML file via [`DaemonConfig::from_toml_file`]; every field
/// has a default, and CLI flags or `BALLOT_*` variables override file values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Directory holding the LMDB ledger.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    /// How many times a mutating command is attempted when it loses a
    /// version race.
    #[serde(default = "default_max_commit_attempts")]
    pub max_commit_attempts: u32,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Membership provider the local caller is attested by.
    #[serde(default = "default_msp_id")]
    pub msp_id: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./ballot_data")
}

fn default_map_size_mb() -> usize {
    64
}

fn default_max_commit_attempts() -> u32 {
    3
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_msp_id() -> String {
    "LocalMSP".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_size_mb == 0 {
            return Err(ConfigError::Invalid("map_size_mb must be at least 1".into()));
        }
        if self.max_commit_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_commit_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size_mb: default_map_size_mb(),
            max_commit_attempts: default_max_commit_attempts(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            msp_id: default_msp_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = DaemonConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = DaemonConfig::from_toml_str(&text).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = DaemonConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.map_size_mb, 64);
        assert_eq!(config.max_commit_attempts, 3);
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            data_dir = "/var/lib/ballot"
            log_format = "json"
            msp_id = "Org1MSP"
        "#;
        let config = DaemonConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/ballot"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.msp_id, "Org1MSP");
        assert_eq!(config.max_commit_attempts, 3); // default
    }

    #[test]
    fn zero_attempts_are_rejected() {
        let err = DaemonConfig::from_toml_str("max_commit_attempts = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_returns_read_error() {
        let err = DaemonConfig::from_toml_file(Path::new("/nonexistent/ballotd.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ballotd.toml");
        std::fs::write(&path, "map_size_mb = 8\n").unwrap();
        let config = DaemonConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.map_size_bytes(), 8 * 1024 * 1024);
    }
}
