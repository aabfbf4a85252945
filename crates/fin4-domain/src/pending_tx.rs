use std::{fmt, sync::Arc};

use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle returned on submission, used to correlate the later outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingId(Uuid);

impl TrackingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TrackingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type Handler = Box<dyn Fn() + Send + Sync>;
type ReasonHandler = Box<dyn Fn(&str) + Send + Sync>;
type DataHandler = Box<dyn Fn(&Bytes) + Send + Sync>;

/// Optional lifecycle callbacks of one contract call. Empty slots are no-ops.
#[derive(Default)]
pub struct TransactionHandlers {
    on_sent: Option<Handler>,
    on_completed: Option<Handler>,
    on_failed: Option<ReasonHandler>,
    on_dry_run_succeeded: Option<DataHandler>,
    on_dry_run_failed: Option<ReasonHandler>,
}

impl TransactionHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_sent(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_sent = Some(Box::new(handler));
        self
    }

    pub fn on_completed(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_completed = Some(Box::new(handler));
        self
    }

    pub fn on_failed(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_failed = Some(Box::new(handler));
        self
    }

    pub fn on_dry_run_succeeded(mut self, handler: impl Fn(&Bytes) + Send + Sync + 'static) -> Self {
        self.on_dry_run_succeeded = Some(Box::new(handler));
        self
    }

    pub fn on_dry_run_failed(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_dry_run_failed = Some(Box::new(handler));
        self
    }

    pub fn sent(&self) {
        if let Some(handler) = &self.on_sent {
            handler();
        }
    }

    pub fn completed(&self) {
        if let Some(handler) = &self.on_completed {
            handler();
        }
    }

    pub fn failed(&self, reason: &str) {
        if let Some(handler) = &self.on_failed {
            handler(reason);
        }
    }

    pub fn dry_run_succeeded(&self, result: &Bytes) {
        if let Some(handler) = &self.on_dry_run_succeeded {
            handler(result);
        }
    }

    pub fn dry_run_failed(&self, reason: &str) {
        if let Some(handler) = &self.on_dry_run_failed {
            handler(reason);
        }
    }
}

impl fmt::Debug for TransactionHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionHandlers")
            .field("on_sent", &self.on_sent.is_some())
            .field("on_completed", &self.on_completed.is_some())
            .field("on_failed", &self.on_failed.is_some())
            .field("on_dry_run_succeeded", &self.on_dry_run_succeeded.is_some())
            .field("on_dry_run_failed", &self.on_dry_run_failed.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Sent,
    Completed,
    Failed,
}

/// Outcome reported by the external confirmation watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    Completed,
    Failed { reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum PendingTransactionError {
    #[error("Transaction {tracking_id} was already resolved as {status:?}")]
    AlreadyResolved {
        tracking_id: TrackingId,
        status: TransactionStatus,
    },
}

/// A submitted transaction awaiting its outcome.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    tracking_id: TrackingId,
    method_label: String,
    display_label: String,
    handlers: Arc<TransactionHandlers>,
    status: TransactionStatus,
}

impl PendingTransaction {
    pub fn new(
        tracking_id: TrackingId,
        method_label: impl Into<String>,
        display_label: impl Into<String>,
        handlers: Arc<TransactionHandlers>,
    ) -> Self {
        Self {
            tracking_id,
            method_label: method_label.into(),
            display_label: display_label.into(),
            handlers,
            status: TransactionStatus::Sent,
        }
    }

    pub fn tracking_id(&self) -> TrackingId {
        self.tracking_id
    }

    pub fn method_label(&self) -> &str {
        &self.method_label
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn handlers(&self) -> &TransactionHandlers {
        &self.handlers
    }

    /// Applies the watcher's verdict and fires the matching handler.
    ///
    /// A transaction resolves once; later reports are rejected.
    pub fn resolve(&mut self, outcome: TransactionOutcome) -> Result<(), PendingTransactionError> {
        if self.status != TransactionStatus::Sent {
            return Err(PendingTransactionError::AlreadyResolved {
                tracking_id: self.tracking_id,
                status: self.status,
            });
        }

        match outcome {
            TransactionOutcome::Completed => {
                self.status = TransactionStatus::Completed;
                self.handlers.completed();
            }
            TransactionOutcome::Failed { reason } => {
                self.status = TransactionStatus::Failed;
                self.handlers.failed(&reason);
            }
        }

        tracing::debug!(
            tracking_id = %self.tracking_id,
            status = ?self.status,
            method = %self.method_label,
            "Pending transaction resolved"
        );
        Ok(())
    }
}
