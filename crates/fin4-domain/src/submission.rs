use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: u64,
    pub verifier_type: Address,
    pub token: Address,
    pub user: Address,
    pub timestamp: u64,
    pub content_type: u64,
    pub content: String,
}
