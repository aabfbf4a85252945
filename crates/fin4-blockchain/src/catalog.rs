use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use alloy::json_abi::JsonAbi;
use dashmap::DashMap;
use serde::Deserialize;

use crate::BlockchainError;

/// Compiled contract artifact as written by the build pipeline.
/// Only the ABI is of interest; bytecode and metadata are ignored.
#[derive(Deserialize)]
struct Artifact {
    abi: JsonAbi,
}

/// Interface descriptors by contract name.
///
/// Entries come either from `insert` or lazily from `<artifacts_dir>/<Name>.json`.
/// Loaded interfaces are cached for the catalog's lifetime.
#[derive(Debug, Default)]
pub struct InterfaceCatalog {
    artifacts_dir: Option<PathBuf>,
    interfaces: DashMap<String, Arc<JsonAbi>>,
}

impl InterfaceCatalog {
    /// Catalog without an artifact directory; every interface must be inserted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn from_dir(artifacts_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_dir: Some(artifacts_dir.into()),
            interfaces: DashMap::new(),
        }
    }

    pub fn insert(&self, name: impl Into<String>, interface: JsonAbi) {
        self.interfaces.insert(name.into(), Arc::new(interface));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.interfaces.contains_key(name) || self.artifact_path(name).is_some_and(|p| p.is_file())
    }

    pub fn get(&self, name: &str) -> Result<Arc<JsonAbi>, BlockchainError> {
        if let Some(interface) = self.interfaces.get(name) {
            return Ok(Arc::clone(interface.value()));
        }

        let path = self
            .artifact_path(name)
            .filter(|path| path.is_file())
            .ok_or_else(|| BlockchainError::InterfaceNotFound {
                name: name.to_string(),
            })?;
        let interface = Arc::new(load_artifact(&path)?);
        tracing::debug!(contract = name, path = %path.display(), "Loaded contract interface");

        Ok(Arc::clone(
            self.interfaces
                .entry(name.to_string())
                .or_insert(interface)
                .value(),
        ))
    }

    /// Names come from the chain too (verifier types), so only plain file
    /// names inside the artifacts directory are accepted.
    fn artifact_path(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return None;
        }
        self.artifacts_dir
            .as_ref()
            .map(|dir| dir.join(format!("{name}.json")))
    }
}

fn load_artifact(path: &Path) -> Result<JsonAbi, BlockchainError> {
    let artifact_error = |reason: String| BlockchainError::ArtifactLoad {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| artifact_error(e.to_string()))?;
    let artifact: Artifact =
        serde_json::from_str(&content).map_err(|e| artifact_error(e.to_string()))?;
    Ok(artifact.abi)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "contractName": "Fin4Messaging",
        "abi": [
            {
                "type": "function",
                "name": "getMyMessagesCount",
                "inputs": [],
                "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }],
                "stateMutability": "view"
            },
            {
                "type": "event",
                "name": "NewMessage",
                "inputs": [
                    { "name": "receiver", "type": "address", "indexed": false, "internalType": "address" },
                    { "name": "messageId", "type": "uint256", "indexed": false, "internalType": "uint256" }
                ],
                "anonymous": false
            }
        ],
        "bytecode": "0x"
    }"#;

    #[test]
    fn loads_interfaces_from_artifact_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Fin4Messaging.json"), ARTIFACT).unwrap();
        let catalog = InterfaceCatalog::from_dir(dir.path());

        assert!(catalog.contains("Fin4Messaging"));
        let interface = catalog.get("Fin4Messaging").unwrap();
        assert!(interface.function("getMyMessagesCount").is_some());
        assert!(interface.event("NewMessage").is_some());

        // Served from the cache once loaded.
        std::fs::remove_file(dir.path().join("Fin4Messaging.json")).unwrap();
        assert!(catalog.get("Fin4Messaging").is_ok());
    }

    #[test]
    fn unknown_interface_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = InterfaceCatalog::from_dir(dir.path());

        assert!(matches!(
            catalog.get("Fin4Groups"),
            Err(BlockchainError::InterfaceNotFound { name }) if name == "Fin4Groups"
        ));
    }

    #[test]
    fn names_cannot_leave_the_artifacts_dir() {
        let root = tempfile::tempdir().unwrap();
        let artifacts = root.path().join("contracts");
        std::fs::create_dir(&artifacts).unwrap();
        std::fs::write(root.path().join("Outside.json"), ARTIFACT).unwrap();
        let catalog = InterfaceCatalog::from_dir(&artifacts);

        for name in ["../Outside", "..\\Outside", "sub/Outside", ""] {
            assert!(!catalog.contains(name), "{name:?} should be rejected");
            assert!(matches!(
                catalog.get(name),
                Err(BlockchainError::InterfaceNotFound { .. })
            ));
        }
    }

    #[test]
    fn malformed_artifact_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("REP.json"), "{\"abi\": 3}").unwrap();
        let catalog = InterfaceCatalog::from_dir(dir.path());

        assert!(matches!(
            catalog.get("REP"),
            Err(BlockchainError::ArtifactLoad { path, .. }) if path.ends_with("REP.json")
        ));
    }
}
