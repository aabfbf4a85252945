use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use super::{Config, ConfigRaw, defaults};
use crate::config::ConfigError;

/// Prefix of environment overrides; nested keys are separated by `__`,
/// e.g. `FIN4_BLOCKCHAIN__DEFAULT_ACCOUNT`.
const ENV_PREFIX: &str = "FIN4_";

/// Loads configuration relative to the working directory.
pub fn load_configuration(custom_config_path: Option<&Path>) -> Result<Config, ConfigError> {
    load_configuration_from(Path::new("."), custom_config_path)
}

/// Layers (lowest to highest priority): built-in defaults, `<base_dir>/config.toml`,
/// the custom config file, `FIN4_` environment variables.
pub fn load_configuration_from(
    base_dir: &Path,
    custom_config_path: Option<&Path>,
) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(defaults::config()));

    let user_config = base_dir.join("config.toml");
    if user_config.exists() {
        tracing::info!(path = %user_config.display(), "Loading config file");
        figment = figment.merge(Toml::file(&user_config));
    }

    if let Some(config_path) = custom_config_path {
        if !config_path.exists() {
            return Err(ConfigError::MissingConfig(config_path.display().to_string()));
        }
        tracing::info!(path = %config_path.display(), "Loading custom config file");
        figment = figment.merge(Toml::file(config_path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: ConfigRaw = figment.extract().map_err(Box::new)?;

    tracing::info!("Configuration loaded successfully");

    config.resolve()
}
