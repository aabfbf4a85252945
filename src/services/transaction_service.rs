use std::sync::Arc;

use alloy::primitives::Address;
use fin4_blockchain::{BlockchainError, CallParams, ContractCaller, OutputRow};
use fin4_domain::{TrackingId, TransactionHandlers};

use super::{DryRunOutcome, DryRunSimulator, TransactionSubmitter};
use crate::{config::TransactionsConfig, error::TransactionError};

/// A state-changing call as requested by the client.
#[derive(Debug)]
pub struct ContractCallRequest {
    contract: String,
    method: String,
    params: CallParams,
    display_label: String,
    handlers: TransactionHandlers,
    skip_dry_run: bool,
    notify: bool,
}

impl ContractCallRequest {
    pub fn new(contract: impl Into<String>, method: impl Into<String>, params: impl Into<CallParams>) -> Self {
        Self {
            contract: contract.into(),
            method: method.into(),
            params: params.into(),
            display_label: String::new(),
            handlers: TransactionHandlers::new(),
            skip_dry_run: false,
            notify: true,
        }
    }

    /// Human-readable description shown next to the pending transaction.
    pub fn display_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = label.into();
        self
    }

    pub fn handlers(mut self, handlers: TransactionHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn skip_dry_run(mut self) -> Self {
        self.skip_dry_run = true;
        self
    }

    /// Keeps a dry-run failure out of the UI notifier.
    pub fn without_notification(mut self) -> Self {
        self.notify = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Transaction handed to the provider; the id tracks it until resolution.
    Submitted(TrackingId),
    /// The dry run reverted; nothing was submitted.
    Rejected { reason: String },
}

/// Entry point of the write path: encode, simulate, submit.
#[derive(Clone)]
pub struct TransactionService {
    caller: ContractCaller,
    simulator: DryRunSimulator,
    submitter: TransactionSubmitter,
    config: Arc<TransactionsConfig>,
    default_account: Address,
}

impl TransactionService {
    pub fn new(
        caller: ContractCaller,
        simulator: DryRunSimulator,
        submitter: TransactionSubmitter,
        config: Arc<TransactionsConfig>,
        default_account: Address,
    ) -> Self {
        Self {
            caller,
            simulator,
            submitter,
            config,
            default_account,
        }
    }

    pub fn default_account(&self) -> Address {
        self.default_account
    }

    /// Runs one call through the write path.
    ///
    /// Exactly one transaction is submitted when the dry run succeeds or is
    /// skipped, and none when it reverts.
    pub async fn call(&self, request: ContractCallRequest) -> Result<CallOutcome, TransactionError> {
        let call = self
            .caller
            .encode(&request.contract, &request.method, request.params)?;
        let handlers = Arc::new(request.handlers);

        let skip = request.skip_dry_run || self.config.skips_dry_run(call.method());
        if skip {
            tracing::debug!(call = call.label(), "Dry run skipped");
            fin4_observability::record_dry_run(call.contract(), call.method(), "skipped");
        } else {
            let notify = request.notify && self.config.notify_failures;
            let outcome = self
                .simulator
                .simulate(self.default_account, &call, &request.display_label, &handlers, notify)
                .await?;
            if let DryRunOutcome::Failure(reason) = outcome {
                return Ok(CallOutcome::Rejected { reason });
            }
        }

        let tracking_id =
            self.submitter
                .submit(self.default_account, &call, &request.display_label, handlers);
        Ok(CallOutcome::Submitted(tracking_id))
    }

    /// Read-only query from the default account.
    pub async fn read(
        &self,
        contract: &str,
        method: &str,
        params: impl Into<CallParams>,
    ) -> Result<OutputRow, BlockchainError> {
        self.caller
            .query(self.default_account, contract, method, params)
            .await
    }
}
