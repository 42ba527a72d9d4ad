//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ballot_types::AddressMatch;
use ballot_utils::LogFormat;
use ballot_workflow::WorkflowConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the ballot client.
///
/// Loaded from a TOML file via [`BallotConfig::from_toml_file`]; command-line
/// flags and `BALLOT_*` environment variables override individual fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotConfig {
    /// JSON-RPC endpoint of the wallet.
    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    /// Directory holding the local LMDB store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Address matching mode: "strict" or "substring".
    #[serde(default)]
    pub address_match: AddressMatch,

    /// Re-read the contract after a confirmed vote.
    #[serde(default)]
    pub auto_reload_after_vote: bool,

    /// Delay between receipt polls while waiting for a vote to be mined.
    #[serde(default = "default_confirmation_poll_ms")]
    pub confirmation_poll_ms: u64,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_provider_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./ballot_data")
}

fn default_confirmation_poll_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BallotConfig {
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
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn confirmation_poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirmation_poll_ms)
    }

    /// The subset of settings the voting workflow reads.
    pub fn workflow(&self) -> WorkflowConfig {
        WorkflowConfig {
            address_match: self.address_match,
            auto_reload_after_vote: self.auto_reload_after_vote,
        }
    }
}

impl Default for BallotConfig {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            data_dir: default_data_dir(),
            address_match: AddressMatch::default(),
            auto_reload_after_vote: false,
            confirmation_poll_ms: default_confirmation_poll_ms(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}
