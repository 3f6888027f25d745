//! Abstract interface for interacting with EVM nodes

use crate::address::Address;
use crate::error::ClientError;
use crate::util::{self, quantity};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Result type for node client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// A 32-byte transaction hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash(pub [u8; 32]);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&util::encode_hex(&self.0))
    }
}

impl FromStr for TxHash {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(util::strip_0x(s), &mut bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("Invalid tx hash {s:?}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Transaction submitted through a node-managed account
///
/// A request without `to` creates a contract from `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(serialize_with = "serialize_data")]
    pub data: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none", with = "quantity::option")]
    pub gas: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", with = "quantity::option")]
    pub value: Option<u64>,
}

fn serialize_data<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&util::encode_hex(data))
}

impl TransactionRequest {
    /// Contract creation from `bytecode`
    #[must_use]
    pub fn deploy(from: Address, bytecode: Vec<u8>) -> Self {
        Self {
            from,
            to: None,
            data: bytecode,
            gas: None,
            value: None,
        }
    }

    /// Message call to `to` with `data` as calldata
    #[must_use]
    pub fn call(from: Address, to: Address, data: Vec<u8>) -> Self {
        Self {
            from,
            to: Some(to),
            data,
            gas: None,
            value: None,
        }
    }

    #[must_use]
    pub const fn is_create(&self) -> bool {
        self.to.is_none()
    }
}

/// Mined transaction receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: TxHash,
    #[serde(with = "quantity")]
    pub block_number: u64,
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// `Some(0)` for reverted transactions; absent on pre-Byzantium chains
    #[serde(default, with = "quantity::option")]
    pub status: Option<u64>,
    #[serde(with = "quantity")]
    pub gas_used: u64,
}

impl Receipt {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status != Some(0)
    }
}

/// Abstract interface for interacting with EVM nodes
///
/// This trait allows minter to work with different backends (a live
/// JSON-RPC endpoint, an in-process mock) through a unified interface.
pub trait NodeClient {
    /// Accounts the node can sign for
    fn accounts(&self) -> ClientResult<Vec<Address>>;

    /// Chain id reported by the node
    fn chain_id(&self) -> ClientResult<u64>;

    /// Number of the latest block
    fn block_number(&self) -> ClientResult<u64>;

    /// Sign and broadcast a transaction with a node-managed account
    fn send_transaction(&self, tx: &TransactionRequest) -> ClientResult<TxHash>;

    /// Receipt of a transaction, `None` while it is still pending
    fn get_transaction_receipt(&self, hash: &TxHash) -> ClientResult<Option<Receipt>>;
}
