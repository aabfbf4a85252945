//! Built-in configuration, the lowest layer of the figment stack.

use std::path::PathBuf;

use fin4_blockchain::{BlockchainConfigRaw, RevertDecoderKind};

use super::{ConfigRaw, MethodOverrideRaw, TransactionsConfigRaw};
use crate::logger::{LogFormat, LoggerConfig};

/// The coin-flip proof pays a fixed stake and cannot be estimated reliably.
const COIN_FLIP_METHOD: &str = "submitProof_CoinFlip";
const COIN_FLIP_VALUE_WEI: &str = "4000000000000000";
const COIN_FLIP_GAS_LIMIT: u64 = 6_721_975;

pub(crate) fn config() -> ConfigRaw {
    ConfigRaw {
        logger: LoggerConfig {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        },
        blockchain: BlockchainConfigRaw {
            rpc_endpoints: vec!["http://127.0.0.1:7545".to_string()],
            main_contract_address: None,
            default_account: None,
            artifacts_dir: PathBuf::from("build/contracts"),
            revert_decoder: RevertDecoderKind::RevertData,
        },
        transactions: TransactionsConfigRaw {
            skip_dry_run_methods: vec![COIN_FLIP_METHOD.to_string()],
            method_overrides: vec![MethodOverrideRaw {
                method: COIN_FLIP_METHOD.to_string(),
                value_wei: Some(COIN_FLIP_VALUE_WEI.to_string()),
                gas_limit: Some(COIN_FLIP_GAS_LIMIT),
            }],
            notify_failures: true,
        },
    }
}
