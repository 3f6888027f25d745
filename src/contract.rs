//! Contract deployment and interaction

use crate::address::Address;
use crate::artifact::{Artifact, Function};
use crate::client::{NodeClient, Receipt, TransactionRequest, TxHash};
use crate::config::ConfirmationConfig;
use crate::error::DeployError;
use crate::transaction::PendingTransaction;
use std::sync::Arc;

/// Deploys new instances of one compiled contract
pub struct ContractFactory<'a, C: NodeClient> {
    client: &'a C,
    artifact: Arc<Artifact>,
    signer: Address,
    confirmation: ConfirmationConfig,
}

impl<'a, C: NodeClient> ContractFactory<'a, C> {
    /// Create a factory for `artifact`, sending from `signer`
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact has no deployable bytecode.
    pub fn new(
        client: &'a C,
        artifact: Artifact,
        signer: Address,
        confirmation: ConfirmationConfig,
    ) -> Result<Self, DeployError> {
        artifact.ensure_deployable()?;
        Ok(Self {
            client,
            artifact: Arc::new(artifact),
            signer,
            confirmation,
        })
    }

    #[must_use]
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    #[must_use]
    pub const fn signer(&self) -> Address {
        self.signer
    }

    /// Submit the creation transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the transaction.
    pub fn deploy(&self) -> Result<PendingDeployment<'a, C>, DeployError> {
        let request = TransactionRequest::deploy(self.signer, self.artifact.bytecode().to_vec());
        let hash = self.client.send_transaction(&request)?;
        tracing::info!(
            contract = self.artifact.contract_name(),
            tx = %hash,
            "deployment submitted"
        );

        Ok(PendingDeployment {
            pending: PendingTransaction::new(self.client, hash, self.confirmation),
            client: self.client,
            artifact: Arc::clone(&self.artifact),
            signer: self.signer,
            confirmation: self.confirmation,
        })
    }
}

/// A creation transaction awaiting confirmation
#[must_use = "a deployment is not usable until `deployed` confirms it"]
pub struct PendingDeployment<'a, C: NodeClient> {
    pending: PendingTransaction<'a, C>,
    client: &'a C,
    artifact: Arc<Artifact>,
    signer: Address,
    confirmation: ConfirmationConfig,
}

impl<'a, C: NodeClient> PendingDeployment<'a, C> {
    #[must_use]
    pub const fn hash(&self) -> TxHash {
        self.pending.hash()
    }

    /// Wait for the creation transaction to be mined
    ///
    /// # Errors
    ///
    /// Returns an error if the deployment reverts, is not confirmed in time,
    /// or its receipt names no contract address.
    pub fn deployed(self) -> Result<DeployedContract<'a, C>, DeployError> {
        let hash = self.pending.hash();
        let receipt = self.pending.wait()?;
        let address = receipt
            .contract_address
            .ok_or(DeployError::MissingContractAddress(hash))?;

        Ok(DeployedContract {
            client: self.client,
            artifact: self.artifact,
            address,
            signer: self.signer,
            confirmation: self.confirmation,
            receipt,
        })
    }
}

/// A contract instance with a confirmed on-chain address
pub struct DeployedContract<'a, C: NodeClient> {
    client: &'a C,
    artifact: Arc<Artifact>,
    address: Address,
    signer: Address,
    confirmation: ConfirmationConfig,
    receipt: Receipt,
}

impl<'a, C: NodeClient> DeployedContract<'a, C> {
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Receipt of the creation transaction
    #[must_use]
    pub const fn deployment_receipt(&self) -> &Receipt {
        &self.receipt
    }

    #[must_use]
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Send a transaction invoking the zero-argument function `method`
    ///
    /// # Errors
    ///
    /// Returns an error if the contract has no such function, the function
    /// takes arguments, or the node rejects the transaction.
    pub fn send(&self, method: &str) -> Result<PendingTransaction<'a, C>, DeployError> {
        let function = self.resolve(method)?;
        if !function.inputs.is_empty() {
            return Err(DeployError::ArgumentsRequired(function.signature()));
        }

        let request =
            TransactionRequest::call(self.signer, self.address, function.selector().to_vec());
        let hash = self.client.send_transaction(&request)?;
        tracing::info!(
            contract = %self.address,
            method = %function.signature(),
            tx = %hash,
            "call submitted"
        );

        Ok(PendingTransaction::new(self.client, hash, self.confirmation))
    }

    fn resolve(&self, method: &str) -> Result<&Function, DeployError> {
        self.artifact
            .function(method)?
            .ok_or_else(|| DeployError::UnknownMethod {
                contract: self.artifact.contract_name().to_string(),
                method: method.to_string(),
            })
    }
}
