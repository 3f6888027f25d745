//! The deploy script: create the NFT contract and mint one token
//!
//! Steps run strictly in order, each blocking until it resolves:
//! factory lookup, deployment, deployment confirmation, mint call, mint
//! confirmation. The first failure ends the run.

use crate::address::Address;
use crate::client::{NodeClient, Receipt};
use crate::error::DeployError;
use crate::runtime::Runtime;
use std::io::Write;

/// Artifact the script deploys
pub const CONTRACT_NAME: &str = "MyEpicNFT";

/// Zero-argument function the script calls on the fresh instance
pub const MINT_METHOD: &str = "makeAnEpicNFT";

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub address: Address,
    pub deployment: Receipt,
    pub mint: Receipt,
}

/// Deploy [`CONTRACT_NAME`] and call [`MINT_METHOD`] on it, reporting
/// progress to `out`
///
/// # Errors
///
/// Returns the first failure of any step; later steps are not attempted.
pub fn run<C: NodeClient, W: Write>(
    runtime: &Runtime<C>,
    out: &mut W,
) -> Result<DeployReport, DeployError> {
    let factory = runtime.get_contract_factory(CONTRACT_NAME)?;
    let contract = factory.deploy()?.deployed()?;
    writeln!(out, "Contract deployed to: {}", contract.address())?;

    let mint = contract.send(MINT_METHOD)?.wait()?;
    writeln!(out, "Minted an NFT")?;

    Ok(DeployReport {
        address: contract.address(),
        deployment: contract.deployment_receipt().clone(),
        mint,
    })
}

/// Run the script and map the outcome to a process exit code
///
/// Any failure, including one building the runtime, is dumped to `out`
/// and yields [`EXIT_FAILURE`].
pub fn run_main<C: NodeClient, W: Write>(
    runtime: Result<Runtime<C>, DeployError>,
    out: &mut W,
) -> u8 {
    match runtime.and_then(|runtime| run(&runtime, out)) {
        Ok(report) => {
            tracing::info!(address = %report.address, "deploy script finished");
            EXIT_SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "deploy script failed");
            // The writer may be the thing that failed
            let _ = writeln!(out, "{err:#?}");
            EXIT_FAILURE
        }
    }
}
