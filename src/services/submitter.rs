use std::sync::Arc;

use alloy::primitives::Address;
use fin4_blockchain::{EncodedCall, RpcProvider, TransactionRequest};
use fin4_domain::{
    PendingTransaction, StoreCommand, StoreDispatcher, TrackingId, TransactionHandlers,
};

use crate::config::TransactionsConfig;

/// Sends real transactions and registers them as pending for the external watcher.
#[derive(Clone)]
pub struct TransactionSubmitter {
    provider: Arc<dyn RpcProvider>,
    store: StoreDispatcher,
    config: Arc<TransactionsConfig>,
}

impl TransactionSubmitter {
    pub fn new(
        provider: Arc<dyn RpcProvider>,
        store: StoreDispatcher,
        config: Arc<TransactionsConfig>,
    ) -> Self {
        Self {
            provider,
            store,
            config,
        }
    }

    /// Registers the pending transaction, dispatches the send in the background
    /// and returns its tracking id without waiting for the provider.
    ///
    /// The background task reports the transaction hash or the rejection to the
    /// store. Must be called from within a tokio runtime.
    pub fn submit(
        &self,
        from: Address,
        call: &EncodedCall,
        display_label: &str,
        handlers: Arc<TransactionHandlers>,
    ) -> TrackingId {
        let tracking_id = TrackingId::new();
        let method_override = self.config.override_for(call.method());

        self.store
            .dispatch(StoreCommand::EnrichPendingTransaction(PendingTransaction::new(
                tracking_id,
                call.label(),
                display_label,
                Arc::clone(&handlers),
            )));

        let request = TransactionRequest {
            from,
            to: call.binding().address(),
            data: call.data().clone(),
            value: method_override.value,
            gas: method_override.gas_limit,
        };
        let provider = Arc::clone(&self.provider);
        let store = self.store.clone();
        let contract = call.contract().to_string();
        let method = call.method().to_string();
        let label = call.label().to_string();

        tokio::spawn(async move {
            match provider.send_transaction(request).await {
                Ok(tx_hash) => {
                    tracing::info!(
                        %tracking_id,
                        %tx_hash,
                        call = %label,
                        "Transaction broadcast"
                    );
                    fin4_observability::record_transaction_submission(&contract, &method, "broadcast");
                    store.dispatch(StoreCommand::TransactionBroadcast {
                        tracking_id,
                        tx_hash,
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        %tracking_id,
                        call = %label,
                        error = %error,
                        "Transaction rejected by provider"
                    );
                    fin4_observability::record_transaction_submission(&contract, &method, "rejected");
                    store.dispatch(StoreCommand::TransactionError {
                        tracking_id,
                        reason: error.message().to_string(),
                    });
                }
            }
        });

        handlers.sent();
        tracing::debug!(%tracking_id, call = call.label(), "Transaction dispatched");

        tracking_id
    }
}
