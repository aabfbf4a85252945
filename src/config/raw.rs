use fin4_blockchain::{BlockchainConfig, BlockchainConfigRaw};
use serde::{Deserialize, Serialize};

use super::{ConfigError, TransactionsConfig, TransactionsConfigRaw};
use crate::logger::LoggerConfig;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigRaw {
    pub logger: LoggerConfig,
    pub blockchain: BlockchainConfigRaw,
    pub transactions: TransactionsConfigRaw,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger: LoggerConfig,
    pub blockchain: BlockchainConfig,
    pub transactions: TransactionsConfig,
}

impl ConfigRaw {
    pub fn resolve(self) -> Result<Config, ConfigError> {
        Ok(Config {
            logger: self.logger,
            blockchain: self.blockchain.resolve()?,
            transactions: self.transactions.resolve()?,
        })
    }
}
