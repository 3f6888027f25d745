//! Configuration for connecting to EVM nodes
//!
//! This module provides the configuration system consumed by [`Runtime`]:
//! which node to talk to, which account signs, how confirmations are
//! awaited and where compiled artifacts live.
//!
//! # Example Configuration File (minter.toml)
//!
//! ```toml
//! [network]
//! network = "hardhat"
//!
//! [rpc]
//! url = "http://127.0.0.1:8545"
//!
//! [confirmation]
//! poll_interval_ms = 250
//! timeout_secs = 0
//! confirmations = 1
//!
//! [paths]
//! artifacts = "artifacts"
//!
//! [log]
//! level = "warn"
//! ```
//!
//! [`Runtime`]: crate::runtime::Runtime

use crate::address::Address;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default file name looked up in the working directory
pub const CONFIG_FILE: &str = "minter.toml";

/// Development network the node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Hardhat,
    Ganache,
    /// Any other node; the chain id is not checked
    Custom,
}

impl Network {
    /// Get the default RPC port for this network
    #[must_use]
    pub const fn default_rpc_port(self) -> u16 {
        match self {
            Self::Hardhat | Self::Custom => 8545,
            Self::Ganache => 7545,
        }
    }

    /// Chain id the node is expected to report, if fixed
    #[must_use]
    pub const fn expected_chain_id(self) -> Option<u64> {
        match self {
            Self::Hardhat => Some(31337),
            Self::Ganache => Some(1337),
            Self::Custom => None,
        }
    }

    /// Get the default RPC URL for this network
    #[must_use]
    pub fn default_rpc_url(self) -> String {
        format!("http://127.0.0.1:{}", self.default_rpc_port())
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hardhat => write!(f, "hardhat"),
            Self::Ganache => write!(f, "ganache"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// RPC connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// RPC URL (e.g., `http://127.0.0.1:8545`); the network's default when
    /// left out of the file
    #[serde(default)]
    pub url: String,
    /// Basic auth username, for nodes behind a proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Sending account; the node's first account when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::for_network(Network::default())
    }
}

impl RpcConfig {
    /// Create RPC config for a specific network with default settings
    #[must_use]
    pub fn for_network(network: Network) -> Self {
        Self {
            url: network.default_rpc_url(),
            user: None,
            password: None,
            from: None,
        }
    }
}

/// How transaction confirmation is awaited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Delay between receipt polls
    pub poll_interval_ms: u64,
    /// Give up after this long; `0` waits forever
    pub timeout_secs: u64,
    /// Blocks (including the inclusion block) before a receipt counts
    pub confirmations: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            timeout_secs: 0,
            confirmations: 1,
        }
    }
}

impl ConfirmationConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// Project paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding compiled contract artifacts
    pub artifacts: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artifacts: PathBuf::from("artifacts"),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level directive; `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Network configuration wrapper (for TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct NetworkWrapper {
    network: Network,
}

/// Complete node configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(from = "NodeConfigFile")]
pub struct NodeConfig {
    /// Network selection
    #[serde(rename = "network")]
    network_wrapper: NetworkWrapper,
    /// RPC connection settings
    pub rpc: RpcConfig,
    /// Confirmation polling
    pub confirmation: ConfirmationConfig,
    pub paths: PathsConfig,
    pub log: LogConfig,
}

/// On-disk form; the RPC URL default depends on the network
#[derive(Deserialize)]
struct NodeConfigFile {
    #[serde(default)]
    network: NetworkWrapper,
    rpc: Option<RpcConfig>,
    #[serde(default)]
    confirmation: ConfirmationConfig,
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    log: LogConfig,
}

impl From<NodeConfigFile> for NodeConfig {
    fn from(file: NodeConfigFile) -> Self {
        let network = file.network.network;
        let mut rpc = file
            .rpc
            .unwrap_or_else(|| RpcConfig::for_network(network));
        if rpc.url.is_empty() {
            rpc.url = network.default_rpc_url();
        }
        Self {
            network_wrapper: file.network,
            rpc,
            confirmation: file.confirmation,
            paths: file.paths,
            log: file.log,
        }
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load `minter.toml` from `dir`, falling back to defaults when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Like [`discover`](Self::discover), with a relative artifacts
    /// directory resolved against `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn discover_project<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let mut config = Self::discover(dir)?;
        if config.paths.artifacts.is_relative() {
            config.paths.artifacts = dir.join(&config.paths.artifacts);
        }
        Ok(config)
    }

    /// Parse configuration from TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let toml_str = self.to_toml()?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Create a default config for a network
    #[must_use]
    pub fn for_network(network: Network) -> Self {
        Self {
            network_wrapper: NetworkWrapper { network },
            rpc: RpcConfig::for_network(network),
            ..Default::default()
        }
    }

    /// Get the network type
    #[must_use]
    pub const fn network(&self) -> Network {
        self.network_wrapper.network
    }

    /// Set the network type
    pub fn set_network(&mut self, network: Network) {
        self.network_wrapper.network = network;
    }

    /// Create config with a custom RPC URL
    #[must_use]
    pub fn with_rpc(mut self, url: &str) -> Self {
        self.rpc.url = url.to_string();
        self
    }

    /// Set basic auth credentials
    #[must_use]
    pub fn with_auth(mut self, user: &str, password: &str) -> Self {
        self.rpc.user = Some(user.to_string());
        self.rpc.password = Some(password.to_string());
        self
    }

    /// Set the sending account
    #[must_use]
    pub fn with_from(mut self, from: Address) -> Self {
        self.rpc.from = Some(from);
        self
    }

    /// Set the artifacts directory
    #[must_use]
    pub fn with_artifacts_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.paths.artifacts = dir.into();
        self
    }

    /// Set confirmation polling
    #[must_use]
    pub fn with_confirmation(mut self, confirmation: ConfirmationConfig) -> Self {
        self.confirmation = confirmation;
        self
    }
}
