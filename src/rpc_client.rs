//! RPC-based NodeClient implementation for connecting to EVM nodes
//!
//! This module provides an implementation of the `NodeClient` trait that
//! talks Ethereum JSON-RPC over HTTP. Transactions go through
//! `eth_sendTransaction`, so signing is left to the node's unlocked
//! accounts (the setup development nodes such as Hardhat and Ganache ship
//! with).
//!
//! # Example
//!
//! ```ignore
//! use minter::{NodeConfig, RpcClient};
//! use minter::client::NodeClient;
//!
//! // Load config from file
//! let config = NodeConfig::from_file("minter.toml")?;
//! let client = RpcClient::new(&config)?;
//!
//! // Or point straight at a URL
//! let client = RpcClient::from_url("http://127.0.0.1:8545")?;
//!
//! let accounts = client.accounts()?;
//! ```

use crate::address::Address;
use crate::client::{ClientResult, NodeClient, Receipt, TransactionRequest, TxHash};
use crate::config::NodeConfig;
use crate::error::{ClientError, ConfigError};
use crate::util;

/// RPC client for EVM nodes
pub struct RpcClient {
    client: jsonrpc::Client,
    url: String,
}

impl RpcClient {
    /// Create a new RPC client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is not usable.
    pub fn new(config: &NodeConfig) -> Result<Self, ConfigError> {
        let mut builder = jsonrpc::simple_http::SimpleHttpTransport::builder()
            .url(&config.rpc.url)
            .map_err(|e| ConfigError::InvalidUrl(config.rpc.url.clone(), e.to_string()))?;

        if let Some(user) = &config.rpc.user {
            builder = builder.auth(user.as_str(), config.rpc.password.as_deref());
        }

        let client = jsonrpc::Client::with_transport(builder.build());

        Ok(Self {
            client,
            url: config.rpc.url.clone(),
        })
    }

    /// Create from a URL with otherwise default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not usable.
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        Self::new(&NodeConfig::default().with_rpc(url))
    }

    /// Endpoint this client talks to
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make an RPC call
    fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: &[serde_json::Value],
    ) -> ClientResult<T> {
        let params_json = serde_json::to_string(params).map_err(|e| {
            ClientError::Transport(format!("Failed to serialize params: {e}"))
        })?;
        let raw_params = serde_json::value::RawValue::from_string(params_json).map_err(|e| {
            ClientError::Transport(format!("Failed to create raw value: {e}"))
        })?;

        tracing::debug!(method, url = %self.url, "rpc call");

        let request = self.client.build_request(method, Some(&raw_params));
        let response = self
            .client
            .send_request(request)
            .map_err(|e| ClientError::Transport(format!("RPC request failed: {e}")))?;

        response.result().map_err(|e| match e {
            jsonrpc::Error::Rpc(err) => ClientError::Rpc {
                code: err.code,
                message: err.message,
            },
            other => ClientError::InvalidResponse(format!("{method}: {other}")),
        })
    }

    /// Test the connection to the node
    ///
    /// # Errors
    ///
    /// Returns an error if the node does not answer `web3_clientVersion`.
    pub fn client_version(&self) -> ClientResult<String> {
        self.call("web3_clientVersion", &[])
    }

    /// Balance of `address` in wei at the latest block
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the balance exceeds `u128`.
    pub fn get_balance(&self, address: &Address) -> ClientResult<u128> {
        let balance: String =
            self.call("eth_getBalance", &[address.to_string().into(), "latest".into()])?;
        let digits = util::strip_0x(&balance);
        u128::from_str_radix(digits, 16)
            .map_err(|e| ClientError::InvalidResponse(format!("balance {balance:?}: {e}")))
    }

    fn call_quantity(&self, method: &str) -> ClientResult<u64> {
        let value: String = self.call(method, &[])?;
        util::parse_quantity(&value).map_err(ClientError::InvalidResponse)
    }
}

impl NodeClient for RpcClient {
    fn accounts(&self) -> ClientResult<Vec<Address>> {
        self.call("eth_accounts", &[])
    }

    fn chain_id(&self) -> ClientResult<u64> {
        self.call_quantity("eth_chainId")
    }

    fn block_number(&self) -> ClientResult<u64> {
        self.call_quantity("eth_blockNumber")
    }

    fn send_transaction(&self, tx: &TransactionRequest) -> ClientResult<TxHash> {
        let param = serde_json::to_value(tx)
            .map_err(|e| ClientError::Transport(format!("Failed to serialize transaction: {e}")))?;
        self.call("eth_sendTransaction", &[param])
    }

    fn get_transaction_receipt(&self, hash: &TxHash) -> ClientResult<Option<Receipt>> {
        self.call("eth_getTransactionReceipt", &[hash.to_string().into()])
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient").field("url", &self.url).finish()
    }
}
