//! Example: Inspecting a compiled artifact without touching a node
//!
//! Run with: cargo run --example inspect_artifact -- [ContractName]
//!
//! Looks the contract up under `artifacts/` in the working directory.

use minter::ArtifactStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let name = std::env::args().nth(1).unwrap_or_else(|| "MyEpicNFT".to_string());

    let artifact = ArtifactStore::new("artifacts").load(&name)?;

    println!("{}", artifact.fully_qualified_name());
    println!("   Creation code: {} bytes", artifact.bytecode().len());
    println!("   Runtime code:  {} bytes", artifact.deployed_bytecode().len());
    match artifact.ensure_deployable() {
        Ok(()) => println!("   ✓ Deployable"),
        Err(e) => println!("   ✗ {e}"),
    }

    println!("\nFunctions:");
    for function in artifact.functions() {
        println!(
            "   {}  {}{}",
            minter::util::encode_hex(&function.selector()),
            function.signature(),
            if function.is_read_only() { "  [view]" } else { "" }
        );
    }

    Ok(())
}
