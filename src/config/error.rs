use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] Box<figment::Error>),

    #[error("Missing required config file: {0}")]
    MissingConfig(String),

    #[error(transparent)]
    Blockchain(#[from] fin4_blockchain::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
