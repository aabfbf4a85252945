use crate::provider::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum BlockchainError {
    #[error("Contract '{name}' is not registered")]
    ContractNotRegistered { name: String },

    #[error("Failed to encode {contract}.{method}: {reason}")]
    Encoding {
        contract: String,
        method: String,
        reason: String,
    },

    #[error("Failed to decode output of {label}: {reason}")]
    OutputDecoding { label: String, reason: String },

    #[error("Malformed interface for '{name}': {reason}")]
    MalformedInterface { name: String, reason: String },

    #[error("Interface '{name}' not found in catalog")]
    InterfaceNotFound { name: String },

    #[error("Failed to load interface artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    #[error("Call {label} failed: {source}")]
    Call {
        label: String,
        #[source]
        source: ProviderError,
    },

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    #[error("RPC connection failed after trying {attempts} endpoint(s)")]
    RpcConnectionFailed { attempts: usize },
}

impl BlockchainError {
    pub(crate) fn encoding(contract: &str, method: &str, reason: impl ToString) -> Self {
        Self::Encoding {
            contract: contract.to_string(),
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }
}
