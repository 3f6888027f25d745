//! Deploy `MyEpicNFT` and mint one token
//!
//! Takes no arguments. Network, sender and artifact location come from
//! `minter.toml` in the working directory, or the local Hardhat defaults.

use minter::{deployer, logging, DeployError, NodeConfig, RpcClient, Runtime};
use std::process::ExitCode;

fn main() -> ExitCode {
    // The config picks the log level, so its own discovery is not traced
    let config = NodeConfig::discover_project(".");

    let log_config = config
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    if let Err(e) = logging::init_tracing(&log_config) {
        eprintln!("{e}");
    }

    let runtime = config
        .map_err(DeployError::from)
        .and_then(Runtime::<RpcClient>::connect);

    let mut stdout = std::io::stdout().lock();
    ExitCode::from(deployer::run_main(runtime, &mut stdout))
}
