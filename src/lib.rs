//! Minter - deploy a compiled EVM contract and mint through it
//!
//! This crate provides the pieces a deploy script needs on a development
//! network: resolving compiled artifacts by contract name, submitting the
//! creation transaction, waiting for it to be mined, and calling a
//! function on the new instance.
//!
//! # Example
//!
//! ```ignore
//! use minter::Runtime;
//!
//! // Reads minter.toml from the working directory when present
//! let runtime = Runtime::load()?;
//!
//! let factory = runtime.get_contract_factory("MyEpicNFT")?;
//! let contract = factory.deploy()?.deployed()?;
//! println!("Contract deployed to: {}", contract.address());
//!
//! contract.send("makeAnEpicNFT")?.wait()?;
//! ```
//!
//! # Connecting to Nodes
//!
//! `RpcClient` talks JSON-RPC to a node that signs with its own unlocked
//! accounts, such as a local Hardhat or Ganache node:
//!
//! ```ignore
//! use minter::{NodeConfig, RpcClient, Runtime};
//!
//! let config = NodeConfig::default().with_rpc("http://127.0.0.1:8545");
//! let runtime = Runtime::connect(config)?;
//! ```

pub mod address;
pub mod artifact;
pub mod client;
pub mod config;
pub mod contract;
pub mod deployer;
pub mod error;
pub mod logging;
#[cfg(feature = "rpc")]
pub mod rpc_client;
pub mod runtime;
pub mod transaction;
pub mod util;

#[cfg(test)]
mod mock_client;
#[cfg(test)]
mod test_fixtures;

// Re-export core types
pub use address::Address;
pub use artifact::{Artifact, ArtifactStore};
pub use client::{NodeClient, Receipt, TransactionRequest, TxHash};
pub use config::{ConfirmationConfig, Network, NodeConfig, RpcConfig};
pub use contract::{ContractFactory, DeployedContract, PendingDeployment};
pub use error::{ArtifactError, ClientError, ConfigError, DeployError};
pub use runtime::Runtime;
pub use transaction::PendingTransaction;

#[cfg(feature = "rpc")]
pub use rpc_client::RpcClient;
