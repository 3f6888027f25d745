//! Tests for resolving compiled artifacts from a toolchain output directory

use minter::{Artifact, ArtifactError, ArtifactStore};
use std::path::Path;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn artifact(name: &str, source: &str) -> String {
    format!(
        r#"{{
  "contractName": "{name}",
  "sourceName": "{source}",
  "abi": [
    {{"type": "function", "name": "makeAnEpicNFT", "inputs": [], "outputs": [], "stateMutability": "nonpayable"}},
    {{"type": "function", "name": "tokenURI", "inputs": [{{"name": "id", "type": "uint256"}}], "outputs": [{{"name": "", "type": "string"}}], "stateMutability": "view"}}
  ],
  "bytecode": "0x6080",
  "deployedBytecode": "0x6080",
  "linkReferences": {{}}
}}"#
    )
}

#[test]
fn test_toolchain_layout() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "contracts/MyEpicNFT.sol/MyEpicNFT.json",
        &artifact("MyEpicNFT", "contracts/MyEpicNFT.sol"),
    );
    write(root, "contracts/MyEpicNFT.sol/MyEpicNFT.dbg.json", r#"{"buildInfo": "x"}"#);
    write(root, "build-info/MyEpicNFT.json", r#"{"id": "x"}"#);

    let store = ArtifactStore::new(root);
    let nft = store.load("MyEpicNFT").unwrap();
    assert_eq!(nft.fully_qualified_name(), "contracts/MyEpicNFT.sol:MyEpicNFT");
    assert!(nft.ensure_deployable().is_ok());

    let mint = nft.function("makeAnEpicNFT").unwrap().unwrap();
    assert_eq!(mint.selector(), minter::util::selector("makeAnEpicNFT()"));
    let uri = nft.function("tokenURI").unwrap().unwrap();
    assert_eq!(uri.signature(), "tokenURI(uint256)");
    assert!(uri.is_read_only());
}

#[test]
fn test_same_name_in_two_sources() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "contracts/v1/MyEpicNFT.sol/MyEpicNFT.json",
        &artifact("MyEpicNFT", "contracts/v1/MyEpicNFT.sol"),
    );
    write(
        root,
        "contracts/v2/MyEpicNFT.sol/MyEpicNFT.json",
        &artifact("MyEpicNFT", "contracts/v2/MyEpicNFT.sol"),
    );

    let store = ArtifactStore::new(root);
    let err = store.load("MyEpicNFT").unwrap_err();
    assert!(matches!(err, ArtifactError::Ambiguous { .. }));
    assert!(err.to_string().contains("contracts/v2/MyEpicNFT.sol:MyEpicNFT"));

    let v2 = store.load("contracts/v2/MyEpicNFT.sol:MyEpicNFT").unwrap();
    assert_eq!(v2.source_name(), "contracts/v2/MyEpicNFT.sol");
}

#[test]
fn test_malformed_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "contracts/Bad.sol/Bad.json", "{ not json");

    assert!(matches!(
        ArtifactStore::new(dir.path()).load("Bad"),
        Err(ArtifactError::Parse(_))
    ));
}

#[test]
fn test_artifact_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Thing.json");
    std::fs::write(&path, artifact("Thing", "contracts/Thing.sol")).unwrap();

    let thing = Artifact::from_file(&path).unwrap();
    assert_eq!(thing.contract_name(), "Thing");
    assert_eq!(thing.deployed_bytecode(), &[0x60, 0x80]);
    assert_eq!(thing.functions().len(), 2);
}
