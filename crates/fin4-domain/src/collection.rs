use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub collection_id: u64,
    pub user_is_creator: bool,
    pub user_is_admin: bool,
    pub admin_group_is_set: bool,
    pub admin_group_id: u64,
    pub tokens: Vec<Address>,
    pub name: String,
    pub identifier: String,
    pub description: String,
}
