use std::path::PathBuf;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which provider error shape the dry-run path should expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevertDecoderKind {
    /// `"Error: [object Object]"` followed by a JSON document.
    ObjectEnvelope,
    /// ABI-encoded `Error(string)` / `Panic(uint256)` data on a JSON-RPC error,
    /// as returned through `AlloyRpcProvider`. The default.
    RevertData,
}

/// Connection settings for the Fin4 deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockchainConfigRaw {
    /// RPC endpoints (HTTP or WebSocket). Later entries are fallbacks.
    #[serde(default)]
    pub rpc_endpoints: Vec<String>,

    /// Address of the deployed `Fin4Main` contract.
    pub main_contract_address: Option<String>,

    /// Account used as `from` for reads, dry runs and transactions.
    /// The RPC node must be able to sign for it.
    pub default_account: Option<String>,

    /// Directory holding `<ContractName>.json` build artifacts.
    pub artifacts_dir: PathBuf,

    pub revert_decoder: RevertDecoderKind,
}

impl BlockchainConfigRaw {
    /// Ensures at least one RPC endpoint is configured.
    pub fn ensure_rpc_endpoints(&self) -> Result<(), ConfigError> {
        if self.rpc_endpoints.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "rpc_endpoints must include at least one endpoint".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolve(self) -> Result<BlockchainConfig, ConfigError> {
        self.ensure_rpc_endpoints()?;

        let main_contract_address = parse_required_address(
            "main_contract_address",
            self.main_contract_address.as_deref(),
        )?;
        let default_account =
            parse_required_address("default_account", self.default_account.as_deref())?;

        Ok(BlockchainConfig {
            rpc_endpoints: self.rpc_endpoints,
            main_contract_address,
            default_account,
            artifacts_dir: self.artifacts_dir,
            revert_decoder: self.revert_decoder,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BlockchainConfig {
    pub rpc_endpoints: Vec<String>,
    pub main_contract_address: Address,
    pub default_account: Address,
    pub artifacts_dir: PathBuf,
    pub revert_decoder: RevertDecoderKind,
}

impl BlockchainConfig {
    pub fn rpc_endpoints(&self) -> &[String] {
        &self.rpc_endpoints
    }

    pub fn main_contract_address(&self) -> Address {
        self.main_contract_address
    }

    pub fn default_account(&self) -> Address {
        self.default_account
    }
}

fn parse_required_address(setting: &str, value: Option<&str>) -> Result<Address, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingSetting(setting.to_string()))?;
    value
        .trim()
        .parse::<Address>()
        .map_err(|e| ConfigError::InvalidConfig(format!("{setting} '{value}': {e}")))
}
