use std::sync::Arc;

use fin4_blockchain::{
    AlloyRpcProvider, ContractCaller, ContractName, ContractRegistry, InterfaceCatalog,
    RpcProvider, revert_decoder,
};
use fin4_domain::{Notifier, StoreCommand, store_channel};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    config::Config,
    error::ClientError,
    fetchers::Aggregator,
    services::{DryRunSimulator, TransactionService, TransactionSubmitter},
};

/// Write path and read path sharing one registry, provider and store channel.
pub struct Client {
    pub transactions: TransactionService,
    pub aggregator: Aggregator,
    pub registry: Arc<ContractRegistry>,
}

/// Connects to the configured RPC endpoints and wires a [`Client`].
///
/// The receiver is the ordered stream of store commands; the caller owns the reducer.
pub async fn connect(
    config: &Config,
    notifier: Arc<dyn Notifier>,
) -> Result<(Client, UnboundedReceiver<StoreCommand>), ClientError> {
    let provider = AlloyRpcProvider::connect(config.blockchain.rpc_endpoints()).await?;
    let catalog = InterfaceCatalog::from_dir(config.blockchain.artifacts_dir.clone());
    assemble(config, Arc::new(provider), catalog, notifier)
}

pub(crate) fn assemble(
    config: &Config,
    provider: Arc<dyn RpcProvider>,
    catalog: InterfaceCatalog,
    notifier: Arc<dyn Notifier>,
) -> Result<(Client, UnboundedReceiver<StoreCommand>), ClientError> {
    let (store, receiver) = store_channel();
    let catalog = Arc::new(catalog);
    let registry = Arc::new(ContractRegistry::new(store.clone()));

    let main_name = ContractName::Fin4Main.as_str();
    let main = registry.register(
        main_name,
        config.blockchain.main_contract_address(),
        catalog.get(main_name)?,
        &[],
    )?;

    let caller = ContractCaller::new(Arc::clone(&registry), Arc::clone(&provider));
    let transactions_config = Arc::new(config.transactions.clone());
    let account = config.blockchain.default_account();

    let simulator = DryRunSimulator::new(
        caller.clone(),
        revert_decoder(config.blockchain.revert_decoder),
        store.clone(),
        notifier,
    );
    let submitter = TransactionSubmitter::new(
        provider,
        store.clone(),
        Arc::clone(&transactions_config),
    );
    let transactions = TransactionService::new(
        caller.clone(),
        simulator,
        submitter,
        transactions_config,
        account,
    );
    let aggregator = Aggregator::new(caller, catalog, store, main, account);

    tracing::info!(
        main = %config.blockchain.main_contract_address(),
        account = %account,
        "Client ready"
    );

    Ok((
        Client {
            transactions,
            aggregator,
            registry,
        },
        receiver,
    ))
}

#[cfg(test)]
mod tests {
    use fin4_blockchain::{BlockchainError, JsonAbi, testing::MockProvider};
    use fin4_domain::LogNotifier;

    use super::*;
    use crate::config::defaults;

    fn config() -> Config {
        let mut raw = defaults::config();
        raw.blockchain.main_contract_address =
            Some("0x00000000000000000000000000000000000000f4".to_string());
        raw.blockchain.default_account =
            Some("0x00000000000000000000000000000000000000ac".to_string());
        raw.resolve().unwrap()
    }

    #[test]
    fn registers_main_contract_first() {
        let catalog = InterfaceCatalog::in_memory();
        catalog.insert(
            "Fin4Main",
            JsonAbi::parse(["function getTCRaddresses() view returns (address, address, address, address, address)"])
                .unwrap(),
        );

        let (client, mut receiver) = assemble(
            &config(),
            Arc::new(MockProvider::new()),
            catalog,
            Arc::new(LogNotifier),
        )
        .unwrap();

        assert_eq!(client.registry.names(), vec!["Fin4Main".to_string()]);
        assert_eq!(client.aggregator.account(), config().blockchain.default_account());
        assert!(matches!(
            receiver.try_recv(),
            Ok(StoreCommand::AddContract { name, .. }) if name == "Fin4Main"
        ));
    }

    #[test]
    fn missing_main_interface_fails() {
        let result = assemble(
            &config(),
            Arc::new(MockProvider::new()),
            InterfaceCatalog::in_memory(),
            Arc::new(LogNotifier),
        );

        assert!(matches!(
            result,
            Err(ClientError::Blockchain(BlockchainError::InterfaceNotFound { .. }))
        ));
    }
}
