//! Client core for the Fin4 contract suite: dry-run-then-submit transactions
//! and aggregation of on-chain state into store commands.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod logger;
pub mod services;

#[cfg(test)]
mod test_support;

use std::{path::Path, sync::Arc};

pub use bootstrap::{Client, connect};
pub use error::{AggregationError, ClientError, TransactionError};
use fin4_domain::{LogNotifier, StoreCommand};
use tokio::sync::mpsc::UnboundedReceiver;

/// Loads configuration, connects, runs the initial data load and logs every
/// store command it produced.
pub async fn run(custom_config_path: Option<&Path>) -> Result<(), ClientError> {
    let config = config::load_configuration(custom_config_path)?;
    logger::initialize(&config.logger);

    tracing::info!("Fin4 client v{}", env!("CARGO_PKG_VERSION"));

    let (client, mut receiver) = connect(&config, Arc::new(LogNotifier)).await?;
    let report = client.aggregator.load_initial_data().await;
    log_store_commands(&mut receiver);

    for failure in &report.failures {
        tracing::error!(pipeline = %failure.pipeline, error = %failure.error, "Initial load incomplete");
    }
    tracing::info!(
        contracts = client.registry.len(),
        succeeded = report.succeeded.len(),
        "Initial data load done"
    );
    Ok(())
}

fn log_store_commands(receiver: &mut UnboundedReceiver<StoreCommand>) {
    while let Ok(command) = receiver.try_recv() {
        tracing::debug!(kind = command.kind(), command = ?command, "Store command");
    }
}
