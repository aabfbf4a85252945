use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// A Fin4 token as listed by the token management contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub address: Address,
    pub user_is_creator: bool,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub unit: String,
    pub total_supply: u128,
    pub creation_time: u64,
    pub has_fixed_minting_quantity: bool,
    /// `None` until the TCR registry whitelist has been read.
    pub is_opat: Option<bool>,
    pub underlyings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub token_address: Address,
    pub balance: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Underlying {
    pub title: String,
}
