//! Example: Using minter's RpcClient against a local development node
//!
//! Run with: cargo run --example rpc_client
//!
//! Prerequisites:
//!   - A node on http://127.0.0.1:8545 with unlocked accounts
//!     (e.g. `npx hardhat node` or `anvil`)

use minter::{NodeClient, NodeConfig, RpcClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Minter RpcClient Example\n");

    // Uncomment to load from file:
    // let config = NodeConfig::from_file("minter.toml")?;
    let config = NodeConfig::default();

    println!("1. Config");
    println!("   Network: {}", config.network());
    println!("   RPC URL: {}", config.rpc.url);

    println!("\n2. Connecting...");
    let client = RpcClient::new(&config)?;

    match client.client_version() {
        Ok(version) => println!("   ✓ Connected to {version}"),
        Err(e) => {
            println!("   ✗ Connection failed: {e}");
            println!("   Make sure a development node is running");
            return Ok(());
        }
    }

    println!("\n3. Chain state");
    println!("   Chain id: {}", client.chain_id()?);
    println!("   Block number: {}", client.block_number()?);

    println!("\n4. Accounts");
    for account in client.accounts()?.iter().take(3) {
        println!("   {account}: {} wei", client.get_balance(account)?);
    }

    Ok(())
}
