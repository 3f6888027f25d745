//! Compiled contract artifacts and their lookup
//!
//! An artifact is the JSON file a Solidity toolchain emits per contract,
//! carrying its ABI and creation bytecode:
//!
//! ```json
//! {
//!   "contractName": "MyEpicNFT",
//!   "sourceName": "contracts/MyEpicNFT.sol",
//!   "abi": [ ... ],
//!   "bytecode": "0x6080...",
//!   "deployedBytecode": "0x6080...",
//!   "linkReferences": {}
//! }
//! ```

use crate::error::ArtifactError;
use crate::util;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory the toolchain keeps compiler inputs in, never an artifact
const BUILD_INFO_DIR: &str = "build-info";

/// A single parameter of an ABI entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub components: Vec<Param>,
}

impl Param {
    /// Canonical type as used in signatures, with tuples expanded
    #[must_use]
    pub fn canonical_type(&self) -> String {
        match self.kind.strip_prefix("tuple") {
            Some(suffix) => {
                let inner: Vec<String> = self.components.iter().map(Self::canonical_type).collect();
                format!("({}){suffix}", inner.join(","))
            }
            None => self.kind.clone(),
        }
    }
}

/// A function entry of a contract ABI
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Param>,
    #[serde(default)]
    pub outputs: Vec<Param>,
    #[serde(default)]
    pub state_mutability: Option<String>,
}

impl Function {
    /// Canonical signature, e.g. `transfer(address,uint256)`
    #[must_use]
    pub fn signature(&self) -> String {
        let inputs: Vec<String> = self.inputs.iter().map(Param::canonical_type).collect();
        format!("{}({})", self.name, inputs.join(","))
    }

    /// First four bytes of the keccak-256 hash of the signature
    #[must_use]
    pub fn selector(&self) -> [u8; 4] {
        util::selector(&self.signature())
    }

    /// Whether the function only reads state
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self.state_mutability.as_deref(), Some("view" | "pure"))
    }
}

/// An ABI entry; only functions are inspected
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum AbiItem {
    Function(Function),
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    #[serde(default)]
    source_name: String,
    abi: Vec<AbiItem>,
    bytecode: String,
    #[serde(default)]
    deployed_bytecode: String,
    #[serde(default)]
    link_references: serde_json::Map<String, serde_json::Value>,
}

/// A compiled contract ready to be handed to a factory
#[derive(Debug, Clone)]
pub struct Artifact {
    contract_name: String,
    source_name: String,
    functions: Vec<Function>,
    bytecode: Vec<u8>,
    deployed_bytecode: Vec<u8>,
    unlinked_libraries: Vec<String>,
}

impl Artifact {
    /// Parse an artifact from its JSON text
    ///
    /// # Examples
    ///
    /// ```
    /// use minter::Artifact;
    ///
    /// let artifact = Artifact::from_json(r#"{
    ///     "contractName": "Counter",
    ///     "abi": [{"type": "function", "name": "increment", "inputs": [], "outputs": []}],
    ///     "bytecode": "0x6080"
    /// }"#).unwrap();
    /// assert_eq!(artifact.contract_name(), "Counter");
    /// assert_eq!(artifact.bytecode(), &[0x60, 0x80]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON or its hex fields are malformed.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_json::from_str(json)?;

        let functions = raw
            .abi
            .into_iter()
            .filter_map(|item| match item {
                AbiItem::Function(f) => Some(f),
                AbiItem::Other => None,
            })
            .collect();

        let mut unlinked_libraries: Vec<String> = raw
            .link_references
            .iter()
            .flat_map(|(source, libs)| {
                libs.as_object()
                    .into_iter()
                    .flat_map(move |libs| libs.keys().map(move |lib| format!("{source}:{lib}")))
            })
            .collect();
        unlinked_libraries.sort();

        Ok(Self {
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            functions,
            bytecode: util::decode_hex(&raw.bytecode)?,
            deployed_bytecode: util::decode_hex(&raw.deployed_bytecode)?,
            unlinked_libraries,
        })
    }

    /// Load an artifact from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// `source:Name`, or the bare name when the source is unknown
    #[must_use]
    pub fn fully_qualified_name(&self) -> String {
        if self.source_name.is_empty() {
            self.contract_name.clone()
        } else {
            format!("{}:{}", self.source_name, self.contract_name)
        }
    }

    /// Creation bytecode
    #[must_use]
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Runtime bytecode
    #[must_use]
    pub fn deployed_bytecode(&self) -> &[u8] {
        &self.deployed_bytecode
    }

    #[must_use]
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Look up a function by name
    ///
    /// # Errors
    ///
    /// Returns an error if the name is overloaded.
    pub fn function(&self, name: &str) -> Result<Option<&Function>, ArtifactError> {
        let mut matches = self.functions.iter().filter(|f| f.name == name);
        let first = matches.next();
        if matches.next().is_some() {
            return Err(ArtifactError::AmbiguousFunction {
                contract: self.contract_name.clone(),
                name: name.to_string(),
            });
        }
        Ok(first)
    }

    /// Check that the artifact can be deployed as-is
    ///
    /// # Errors
    ///
    /// Returns an error for abstract contracts and interfaces (no creation
    /// code) and for bytecode with unlinked library placeholders.
    pub fn ensure_deployable(&self) -> Result<(), ArtifactError> {
        if self.bytecode.is_empty() {
            return Err(ArtifactError::NotDeployable(
                self.contract_name.clone(),
                "no creation bytecode (abstract contract or interface)".to_string(),
            ));
        }
        if !self.unlinked_libraries.is_empty() {
            return Err(ArtifactError::NotDeployable(
                self.contract_name.clone(),
                format!("unlinked libraries {}", self.unlinked_libraries.join(", ")),
            ));
        }
        Ok(())
    }
}

enum Source {
    Directory(PathBuf),
    Preloaded(HashMap<String, Artifact>),
}

/// Resolves contract names to artifacts
pub struct ArtifactStore {
    source: Source,
}

impl ArtifactStore {
    /// Resolve artifacts from a directory tree
    #[must_use]
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            source: Source::Directory(dir.into()),
        }
    }

    /// Serve a fixed set of artifacts, keyed by contract name
    #[must_use]
    pub fn with_artifacts<I: IntoIterator<Item = Artifact>>(artifacts: I) -> Self {
        let map = artifacts
            .into_iter()
            .map(|a| (a.contract_name.clone(), a))
            .collect();
        Self {
            source: Source::Preloaded(map),
        }
    }

    /// Find the artifact for a bare (`MyEpicNFT`) or fully qualified
    /// (`contracts/MyEpicNFT.sol:MyEpicNFT`) contract name
    ///
    /// # Errors
    ///
    /// Returns an error if no artifact or more than one matches, or if the
    /// matching file cannot be parsed.
    pub fn load(&self, name: &str) -> Result<Artifact, ArtifactError> {
        match &self.source {
            Source::Preloaded(map) => {
                let bare = name.rsplit(':').next().unwrap_or(name);
                map.get(bare)
                    .filter(|a| !name.contains(':') || a.fully_qualified_name() == name)
                    .cloned()
                    .ok_or_else(|| ArtifactError::NotFound(name.to_string()))
            }
            Source::Directory(dir) => {
                let (path, contract) = match name.split_once(':') {
                    Some((source, contract)) => {
                        let path = dir.join(source).join(format!("{contract}.json"));
                        if !path.is_file() {
                            return Err(ArtifactError::NotFound(name.to_string()));
                        }
                        (path, contract)
                    }
                    None => (Self::find_unique(dir, name)?, name),
                };
                tracing::debug!(path = %path.display(), "loading artifact");
                let artifact = Artifact::from_file(&path)?;
                if artifact.contract_name() != contract {
                    return Err(ArtifactError::NameMismatch {
                        path,
                        expected: contract.to_string(),
                        found: artifact.contract_name().to_string(),
                    });
                }
                Ok(artifact)
            }
        }
    }

    fn find_unique(dir: &Path, name: &str) -> Result<PathBuf, ArtifactError> {
        let file_name = format!("{name}.json");
        let mut found = Vec::new();
        if dir.is_dir() {
            collect_matches(dir, &file_name, &mut found)?;
        }
        found.sort();

        match found.len() {
            0 => Err(ArtifactError::NotFound(name.to_string())),
            1 => Ok(found.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_string(),
                candidates: found
                    .iter()
                    .map(|p| qualified_name_for(dir, p, name))
                    .collect(),
            }),
        }
    }
}

fn collect_matches(dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let entry_name = entry.file_name();
        let entry_name = entry_name.to_string_lossy();

        if entry.file_type()?.is_dir() {
            if entry_name != BUILD_INFO_DIR {
                collect_matches(&path, file_name, found)?;
            }
        } else if entry_name == file_name {
            found.push(path);
        }
    }
    Ok(())
}

/// `<dir>/contracts/A.sol/Token.json` becomes `contracts/A.sol:Token`
fn qualified_name_for(dir: &Path, path: &Path, name: &str) -> String {
    path.parent()
        .and_then(|parent| parent.strip_prefix(dir).ok())
        .map(|source| format!("{}:{name}", source.to_string_lossy().replace('\\', "/")))
        .unwrap_or_else(|| name.to_string())
}
