//! Mock NodeClient implementation for testing

#![cfg(test)]

use crate::address::Address;
use crate::client::{ClientResult, NodeClient, Receipt, TransactionRequest, TxHash};
use crate::error::ClientError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// A call made against the mock, in order of arrival
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Accounts,
    ChainId,
    BlockNumber,
    SendTransaction(TransactionRequest),
    GetReceipt(TxHash),
}

/// Failure injected into one step of the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    /// `eth_accounts` returns nothing
    NoAccounts,
    /// The node refuses the contract creation transaction
    RejectDeploy,
    /// The creation transaction is mined with status 0
    RevertDeploy,
    /// The creation receipt lacks `contractAddress`
    NoContractAddress,
    /// The node refuses the method call transaction
    RejectCall,
    /// The method call is mined with status 0
    RevertCall,
    /// Every receipt query fails
    ReceiptUnavailable,
}

/// Mock client for testing without a live node
#[derive(Clone)]
pub struct MockClient {
    inner: Arc<Mutex<MockClientInner>>,
}

struct MockClientInner {
    signer: Address,
    chain_id: u64,
    block_number: u64,
    pending_polls: u32,
    faults: HashSet<Fault>,
    calls: Vec<Call>,
    receipts: HashMap<TxHash, Receipt>,
    polls: HashMap<TxHash, u32>,
}

impl MockClient {
    /// Create a new mock client posing as a Hardhat node
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockClientInner {
                signer: Address::from_bytes(rand::random()),
                chain_id: 31337,
                block_number: 0,
                pending_polls: 0,
                faults: HashSet::new(),
                calls: Vec::new(),
                receipts: HashMap::new(),
                polls: HashMap::new(),
            })),
        }
    }

    /// Inject a failure
    #[must_use]
    pub fn with_fault(self, fault: Fault) -> Self {
        self.inner.lock().unwrap().faults.insert(fault);
        self
    }

    /// Report transactions as pending for `polls` receipt queries
    #[must_use]
    pub fn with_pending_polls(self, polls: u32) -> Self {
        self.inner.lock().unwrap().pending_polls = polls;
        self
    }

    #[must_use]
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        self.inner.lock().unwrap().chain_id = chain_id;
        self
    }

    /// The account `eth_accounts` reports
    #[must_use]
    pub fn signer(&self) -> Address {
        self.inner.lock().unwrap().signer
    }

    /// Advance the chain head
    pub fn mine_blocks(&self, count: u64) {
        self.inner.lock().unwrap().block_number += count;
    }

    /// Every call received so far
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Transactions submitted so far
    #[must_use]
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SendTransaction(tx) => Some(tx),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeClient for MockClient {
    fn accounts(&self) -> ClientResult<Vec<Address>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Accounts);
        if inner.faults.contains(&Fault::NoAccounts) {
            Ok(Vec::new())
        } else {
            Ok(vec![inner.signer])
        }
    }

    fn chain_id(&self) -> ClientResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::ChainId);
        Ok(inner.chain_id)
    }

    fn block_number(&self) -> ClientResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::BlockNumber);
        Ok(inner.block_number)
    }

    fn send_transaction(&self, tx: &TransactionRequest) -> ClientResult<TxHash> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::SendTransaction(tx.clone()));

        let (reject, revert) = if tx.is_create() {
            (Fault::RejectDeploy, Fault::RevertDeploy)
        } else {
            (Fault::RejectCall, Fault::RevertCall)
        };
        if inner.faults.contains(&reject) {
            return Err(ClientError::Rpc {
                code: -32000,
                message: "insufficient funds for gas * price + value".to_string(),
            });
        }

        let hash = TxHash(rand::random());
        inner.block_number += 1;

        let contract_address = (tx.is_create() && !inner.faults.contains(&Fault::NoContractAddress))
            .then(|| Address::from_bytes(rand::random()));
        let receipt = Receipt {
            transaction_hash: hash,
            block_number: inner.block_number,
            contract_address,
            status: Some(u64::from(!inner.faults.contains(&revert))),
            gas_used: 21_000,
        };
        inner.receipts.insert(hash, receipt);

        Ok(hash)
    }

    fn get_transaction_receipt(&self, hash: &TxHash) -> ClientResult<Option<Receipt>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::GetReceipt(*hash));

        if inner.faults.contains(&Fault::ReceiptUnavailable) {
            return Err(ClientError::Transport("connection refused".to_string()));
        }

        let pending_polls = inner.pending_polls;
        let polls = inner.polls.entry(*hash).or_insert(0);
        if *polls < pending_polls {
            *polls += 1;
            return Ok(None);
        }

        Ok(inner.receipts.get(hash).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_send_and_receipt() {
        let client = MockClient::new();
        let from = client.signer();

        let hash = client
            .send_transaction(&TransactionRequest::deploy(from, vec![0x60]))
            .unwrap();
        let receipt = client.get_transaction_receipt(&hash).unwrap().unwrap();

        assert!(receipt.succeeded());
        assert!(receipt.contract_address.is_some());
        assert_eq!(receipt.block_number, 1);
    }

    #[test]
    fn test_mock_unknown_hash() {
        let client = MockClient::new();
        assert!(client
            .get_transaction_receipt(&TxHash([7; 32]))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_mock_records_calls_in_order() {
        let client = MockClient::new();
        client.accounts().unwrap();
        client.chain_id().unwrap();
        client.block_number().unwrap();
        assert_eq!(
            client.calls(),
            vec![Call::Accounts, Call::ChainId, Call::BlockNumber]
        );
    }

    #[test]
    fn test_mock_reject_deploy_only() {
        let client = MockClient::new().with_fault(Fault::RejectDeploy);
        let from = client.signer();

        assert!(client
            .send_transaction(&TransactionRequest::deploy(from, vec![0x60]))
            .is_err());
        assert!(client
            .send_transaction(&TransactionRequest::call(from, from, vec![]))
            .is_ok());
    }
}
