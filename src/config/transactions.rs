use std::collections::{HashMap, HashSet};

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Write-path policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionsConfigRaw {
    /// Methods submitted without a dry run.
    #[serde(default)]
    pub skip_dry_run_methods: Vec<String>,

    #[serde(default)]
    pub method_overrides: Vec<MethodOverrideRaw>,

    /// Report dry-run failures to the UI notifier unless a call opts out.
    pub notify_failures: bool,
}

/// Value and gas attached to every transaction calling `method`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodOverrideRaw {
    pub method: String,
    /// Decimal wei amount; kept as text so it is not limited to 64 bits.
    pub value_wei: Option<String>,
    pub gas_limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MethodOverride {
    pub value: Option<U256>,
    pub gas_limit: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionsConfig {
    pub skip_dry_run_methods: HashSet<String>,
    pub method_overrides: HashMap<String, MethodOverride>,
    pub notify_failures: bool,
}

impl TransactionsConfigRaw {
    pub fn resolve(self) -> Result<TransactionsConfig, ConfigError> {
        let mut method_overrides = HashMap::with_capacity(self.method_overrides.len());
        for raw in self.method_overrides {
            let value = raw
                .value_wei
                .as_deref()
                .map(|wei| {
                    U256::from_str_radix(wei.trim(), 10).map_err(|e| {
                        ConfigError::InvalidConfig(format!(
                            "method_overrides.{}.value_wei '{wei}': {e}",
                            raw.method
                        ))
                    })
                })
                .transpose()?;

            if method_overrides
                .insert(
                    raw.method.clone(),
                    MethodOverride {
                        value,
                        gas_limit: raw.gas_limit,
                    },
                )
                .is_some()
            {
                return Err(ConfigError::InvalidConfig(format!(
                    "method_overrides lists '{}' more than once",
                    raw.method
                )));
            }
        }

        Ok(TransactionsConfig {
            skip_dry_run_methods: self.skip_dry_run_methods.into_iter().collect(),
            method_overrides,
            notify_failures: self.notify_failures,
        })
    }
}

impl TransactionsConfig {
    pub fn skips_dry_run(&self, method: &str) -> bool {
        self.skip_dry_run_methods.contains(method)
    }

    pub fn override_for(&self, method: &str) -> MethodOverride {
        self.method_overrides.get(method).copied().unwrap_or_default()
    }
}
