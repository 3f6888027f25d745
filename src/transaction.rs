//! Waiting for submitted transactions to be mined

use crate::client::{NodeClient, Receipt, TxHash};
use crate::config::ConfirmationConfig;
use crate::error::DeployError;
use std::time::Instant;

/// A transaction accepted by the node but not yet confirmed
#[must_use = "a pending transaction does nothing unless waited on"]
pub struct PendingTransaction<'a, C: NodeClient> {
    client: &'a C,
    hash: TxHash,
    confirmation: ConfirmationConfig,
}

impl<'a, C: NodeClient> PendingTransaction<'a, C> {
    pub fn new(client: &'a C, hash: TxHash, confirmation: ConfirmationConfig) -> Self {
        Self {
            client,
            hash,
            confirmation,
        }
    }

    #[must_use]
    pub const fn hash(&self) -> TxHash {
        self.hash
    }

    /// Block until the transaction is mined and buried under the configured
    /// number of confirmations
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::Reverted`] if the receipt reports failure,
    /// [`DeployError::ConfirmationTimeout`] once the configured timeout
    /// elapses, and any client error raised while polling.
    pub fn wait(self) -> Result<Receipt, DeployError> {
        let started = Instant::now();
        let required = self.confirmation.confirmations.max(1);

        loop {
            if let Some(receipt) = self.client.get_transaction_receipt(&self.hash)? {
                if !receipt.succeeded() {
                    tracing::warn!(tx = %self.hash, block = receipt.block_number, "transaction reverted");
                    return Err(DeployError::Reverted(self.hash));
                }

                let depth = if required == 1 {
                    1
                } else {
                    let head = self.client.block_number()?;
                    (head + 1).saturating_sub(receipt.block_number)
                };
                if depth >= required {
                    tracing::info!(
                        tx = %self.hash,
                        block = receipt.block_number,
                        gas_used = receipt.gas_used,
                        "transaction confirmed"
                    );
                    return Ok(receipt);
                }
            }

            if let Some(timeout) = self.confirmation.timeout() {
                if started.elapsed() >= timeout {
                    return Err(DeployError::ConfirmationTimeout(
                        self.hash,
                        self.confirmation.timeout_secs,
                    ));
                }
            }

            std::thread::sleep(self.confirmation.poll_interval());
        }
    }
}
