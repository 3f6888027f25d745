//! Toolkit runtime: configuration, artifacts and a connected client

use crate::address::Address;
use crate::artifact::ArtifactStore;
use crate::client::NodeClient;
use crate::config::NodeConfig;
use crate::contract::ContractFactory;
use crate::error::DeployError;

/// Everything needed to turn contract names into deployable factories
pub struct Runtime<C: NodeClient> {
    config: NodeConfig,
    artifacts: ArtifactStore,
    client: C,
}

impl<C: NodeClient> Runtime<C> {
    /// Assemble a runtime from its parts
    pub fn new(config: NodeConfig, artifacts: ArtifactStore, client: C) -> Self {
        Self {
            config,
            artifacts,
            client,
        }
    }

    /// Runtime reading artifacts from the configured directory
    pub fn with_client(config: NodeConfig, client: C) -> Self {
        let artifacts = ArtifactStore::new(config.paths.artifacts.clone());
        Self::new(config, artifacts, client)
    }

    #[must_use]
    pub const fn config(&self) -> &NodeConfig {
        &self.config
    }

    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// The account transactions are sent from
    ///
    /// # Errors
    ///
    /// Returns an error if no sender is configured and the node exposes no
    /// accounts.
    pub fn signer(&self) -> Result<Address, DeployError> {
        if let Some(from) = self.config.rpc.from {
            return Ok(from);
        }
        self.client
            .accounts()?
            .first()
            .copied()
            .ok_or(DeployError::NoSigner)
    }

    /// Check the node is on the chain the configured network implies
    ///
    /// # Errors
    ///
    /// Returns an error on a mismatch or if the chain id cannot be fetched.
    pub fn verify_chain(&self) -> Result<(), DeployError> {
        let Some(expected) = self.config.network().expected_chain_id() else {
            return Ok(());
        };
        let actual = self.client.chain_id()?;
        if actual != expected {
            return Err(DeployError::ChainMismatch { expected, actual });
        }
        Ok(())
    }

    /// Resolve `name` to a factory bound to the runtime's signer
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be found or deployed, the
    /// node is on an unexpected chain, or no signer is available.
    pub fn get_contract_factory(&self, name: &str) -> Result<ContractFactory<'_, C>, DeployError> {
        let artifact = self.artifacts.load(name)?;
        self.verify_chain()?;
        let signer = self.signer()?;
        tracing::debug!(contract = name, %signer, "contract factory ready");
        ContractFactory::new(&self.client, artifact, signer, self.config.confirmation)
    }
}

#[cfg(feature = "rpc")]
impl Runtime<crate::rpc_client::RpcClient> {
    /// Connect using `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured RPC URL is unusable.
    pub fn connect(config: NodeConfig) -> Result<Self, DeployError> {
        let client = crate::rpc_client::RpcClient::new(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Connect using `minter.toml` from `dir`, or defaults when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid or names an unusable
    /// RPC URL.
    pub fn load_from<P: AsRef<std::path::Path>>(dir: P) -> Result<Self, DeployError> {
        Self::connect(NodeConfig::discover_project(dir)?)
    }

    /// Connect using `minter.toml` from the working directory
    ///
    /// # Errors
    ///
    /// See [`Runtime::load_from`].
    pub fn load() -> Result<Self, DeployError> {
        Self::load_from(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Artifact;
    use crate::config::Network;
    use crate::error::ArtifactError;
    use crate::mock_client::{Call, Fault, MockClient};
    use crate::test_fixtures::NFT_ARTIFACT;

    fn runtime(config: NodeConfig, client: MockClient) -> Runtime<MockClient> {
        let artifacts = ArtifactStore::with_artifacts([Artifact::from_json(NFT_ARTIFACT).unwrap()]);
        Runtime::new(config, artifacts, client)
    }

    #[test]
    fn test_signer_defaults_to_first_account() {
        let client = MockClient::new();
        let signer = client.signer();
        let runtime = runtime(NodeConfig::default(), client);
        assert_eq!(runtime.signer().unwrap(), signer);
    }

    #[test]
    fn test_configured_signer_wins() {
        let from = Address::from_bytes([0xaa; 20]);
        let runtime = runtime(NodeConfig::default().with_from(from), MockClient::new());
        assert_eq!(runtime.signer().unwrap(), from);
        assert!(runtime.client().calls().is_empty());
    }

    #[test]
    fn test_no_signer() {
        let runtime = runtime(NodeConfig::default(), MockClient::new().with_fault(Fault::NoAccounts));
        assert!(matches!(runtime.signer(), Err(DeployError::NoSigner)));
    }

    #[test]
    fn test_chain_mismatch() {
        let runtime = runtime(NodeConfig::default(), MockClient::new().with_chain_id(1));
        assert!(matches!(
            runtime.get_contract_factory("MyEpicNFT"),
            Err(DeployError::ChainMismatch { expected: 31337, actual: 1 })
        ));
    }

    #[test]
    fn test_custom_network_skips_chain_check() {
        let config = NodeConfig::for_network(Network::Custom);
        let runtime = runtime(config, MockClient::new().with_chain_id(1));
        assert!(runtime.get_contract_factory("MyEpicNFT").is_ok());
        assert!(!runtime.client().calls().contains(&Call::ChainId));
    }

    #[test]
    fn test_unknown_contract_touches_no_node() {
        let runtime = runtime(NodeConfig::default(), MockClient::new());
        assert!(matches!(
            runtime.get_contract_factory("Missing"),
            Err(DeployError::Artifact(ArtifactError::NotFound(_)))
        ));
        assert!(runtime.client().calls().is_empty());
    }

    #[cfg(feature = "rpc")]
    #[test]
    fn test_load_from_resolves_artifacts_against_dir() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = Runtime::<crate::rpc_client::RpcClient>::load_from(dir.path()).unwrap();
        assert_eq!(runtime.config().paths.artifacts, dir.path().join("artifacts"));
    }
}
