//! Test fixtures and constants for minter tests

#![allow(dead_code)] // Test fixtures may not all be used in every test

use std::path::Path;

/// Trimmed artifact of the NFT contract the deploy script targets
pub const NFT_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "MyEpicNFT",
  "sourceName": "contracts/MyEpicNFT.sol",
  "abi": [
    {"inputs": [], "stateMutability": "nonpayable", "type": "constructor"},
    {
      "anonymous": false,
      "inputs": [
        {"indexed": true, "internalType": "address", "name": "from", "type": "address"},
        {"indexed": true, "internalType": "address", "name": "to", "type": "address"},
        {"indexed": true, "internalType": "uint256", "name": "tokenId", "type": "uint256"}
      ],
      "name": "Transfer",
      "type": "event"
    },
    {
      "inputs": [{"internalType": "address", "name": "owner", "type": "address"}],
      "name": "balanceOf",
      "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
      "stateMutability": "view",
      "type": "function"
    },
    {
      "inputs": [],
      "name": "makeAnEpicNFT",
      "outputs": [],
      "stateMutability": "nonpayable",
      "type": "function"
    },
    {
      "inputs": [{"internalType": "uint256", "name": "tokenId", "type": "uint256"}],
      "name": "tokenURI",
      "outputs": [{"internalType": "string", "name": "", "type": "string"}],
      "stateMutability": "view",
      "type": "function"
    }
  ],
  "bytecode": "0x608060405234801561001057600080fd5b50610150806100206000396000f3fe",
  "deployedBytecode": "0x608060405234801561001057600080fd5b5060043610610041",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

/// Minimal artifact with one zero-argument function
#[must_use]
pub fn artifact_json(name: &str, bytecode: &str) -> String {
    format!(
        r#"{{
  "contractName": "{name}",
  "sourceName": "contracts/{name}.sol",
  "abi": [{{"type": "function", "name": "ping", "inputs": [], "outputs": []}}],
  "bytecode": "{bytecode}"
}}"#
    )
}

/// Write `json` where the toolchain would put the artifact of `name`
/// compiled from `source`
pub fn write_artifact(root: &Path, source: &str, name: &str, json: &str) {
    let dir = root.join(source);
    std::fs::create_dir_all(&dir).expect("create artifact dir");
    std::fs::write(dir.join(format!("{name}.json")), json).expect("write artifact");
}
