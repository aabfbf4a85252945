use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// A verifier type contract known to `Fin4Verifying`.
///
/// `label` doubles as the contract registry name of the verifier type binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifierType {
    #[serde(rename = "value")]
    pub address: Address,
    pub label: String,
    pub description: String,
    pub params_encoded: String,
    pub is_noninteractive: bool,
}
