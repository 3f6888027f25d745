//! Error types for minter operations

use crate::client::TxHash;
use thiserror::Error;

/// Errors raised by a [`NodeClient`](crate::client::NodeClient)
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur while resolving or reading contract artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact for {0} not found")]
    NotFound(String),

    #[error("Multiple artifacts match {name}: {}", candidates.join(", "))]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },

    #[error("Artifact {} holds {found}, not {expected}", path.display())]
    NameMismatch {
        path: std::path::PathBuf,
        expected: String,
        found: String,
    },

    #[error("Contract {0} is not deployable: {1}")]
    NotDeployable(String, String),

    #[error("Contract {contract} has more than one function named {name}")]
    AmbiguousFunction { contract: String, name: String },

    #[error("Failed to parse artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid RPC URL {0}: {1}")]
    InvalidUrl(String, String),
}

/// Any failure along the deploy-and-call sequence
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Node exposes no accounts and no sender is configured")]
    NoSigner,

    #[error("Connected to chain {actual}, expected {expected}")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("Contract {contract} has no function {method}")]
    UnknownMethod { contract: String, method: String },

    #[error("Function {0} takes arguments and cannot be called without them")]
    ArgumentsRequired(String),

    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    #[error("Transaction {0} was not confirmed within {1} seconds")]
    ConfirmationTimeout(TxHash, u64),

    #[error("Deployment receipt for {0} carries no contract address")]
    MissingContractAddress(TxHash),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
