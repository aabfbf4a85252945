pub(crate) mod defaults;
mod error;
mod loader;
mod raw;
mod transactions;

pub use error::ConfigError;
pub use loader::{load_configuration, load_configuration_from};
pub use raw::{Config, ConfigRaw};
pub use transactions::{
    MethodOverride, MethodOverrideRaw, TransactionsConfig, TransactionsConfigRaw,
};
