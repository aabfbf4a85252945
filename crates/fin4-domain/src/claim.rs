use std::collections::BTreeMap;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierStatus {
    /// Raw `ProofAndVerifierStatusEnum` code.
    pub status: u64,
    pub message: String,
}

/// A claim made by the current account on one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// `<token>_<claimId>`; claim ids are only unique per token.
    pub id: String,
    pub token: Address,
    pub claim_id: u64,
    pub claimer: Address,
    pub is_approved: bool,
    pub got_rejected: bool,
    pub quantity: u128,
    pub claim_creation_time: u64,
    pub comment: String,
    /// Keyed by verifier type address; the key set equals the required verifier types.
    pub verifier_statuses: BTreeMap<Address, VerifierStatus>,
    /// Never contains the zero address.
    pub verifiers_with_messages: Vec<Address>,
}

impl Claim {
    pub fn pseudo_id(token: &Address, claim_id: u64) -> String {
        format!("{token}_{claim_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_id_joins_token_and_claim_id() {
        let token = Address::repeat_byte(0x11);
        assert_eq!(
            Claim::pseudo_id(&token, 7),
            "0x1111111111111111111111111111111111111111_7"
        );
    }
}
