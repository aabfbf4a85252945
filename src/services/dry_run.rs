use std::sync::Arc;

use alloy::primitives::{Address, Bytes};
use fin4_blockchain::{ContractCaller, EncodedCall, RevertReasonDecoder};
use fin4_domain::{Notifier, StoreCommand, StoreDispatcher, TransactionHandlers};

use crate::error::TransactionError;

/// Result of simulating a state-changing call against current chain state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DryRunOutcome {
    /// Raw return data of the simulated call.
    Success(Bytes),
    /// Decoded revert reason.
    Failure(String),
}

/// Predicts whether a call would revert by issuing it read-only first.
#[derive(Clone)]
pub struct DryRunSimulator {
    caller: ContractCaller,
    decoder: Arc<dyn RevertReasonDecoder>,
    store: StoreDispatcher,
    notifier: Arc<dyn Notifier>,
}

impl DryRunSimulator {
    pub fn new(
        caller: ContractCaller,
        decoder: Arc<dyn RevertReasonDecoder>,
        store: StoreDispatcher,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            caller,
            decoder,
            store,
            notifier,
        }
    }

    /// Simulates `call` from `from`.
    ///
    /// A revert is a normal outcome: it is reported to the handlers, the
    /// notifier (when `notify` is set) and the store. Only a provider error
    /// whose shape the decoder cannot read is returned as an error.
    pub async fn simulate(
        &self,
        from: Address,
        call: &EncodedCall,
        display_label: &str,
        handlers: &TransactionHandlers,
        notify: bool,
    ) -> Result<DryRunOutcome, TransactionError> {
        tracing::debug!(call = call.label(), "Initiating dry run");

        let error = match self.caller.call_raw(from, call).await {
            Ok(result) => {
                tracing::debug!(call = call.label(), "Dry run succeeded");
                handlers.dry_run_succeeded(&result);
                self.store.dispatch(StoreCommand::DryRunSucceeded {
                    method_label: call.label().to_string(),
                    display_label: display_label.to_string(),
                    result: result.clone(),
                });
                fin4_observability::record_dry_run(call.contract(), call.method(), "succeeded");
                return Ok(DryRunOutcome::Success(result));
            }
            Err(error) => error,
        };

        let reason = self.decoder.decode(&error).map_err(|source| {
            tracing::error!(
                call = call.label(),
                error = %error,
                reason = %source,
                "Dry run failed with an unrecognized error"
            );
            fin4_observability::record_dry_run(call.contract(), call.method(), "undecodable");
            TransactionError::DecodeShape {
                label: call.label().to_string(),
                source,
            }
        })?;

        tracing::info!(call = call.label(), reason = %reason, "Dry run failed");
        handlers.dry_run_failed(&reason);
        if notify {
            self.notifier
                .report_failure(&format!("Transaction test failed. Reason: {reason}"));
        }
        self.store.dispatch(StoreCommand::DryRunFailed {
            method_label: call.label().to_string(),
            display_label: display_label.to_string(),
            error_reason: reason.clone(),
        });
        fin4_observability::record_dry_run(call.contract(), call.method(), "reverted");

        Ok(DryRunOutcome::Failure(reason))
    }
}
