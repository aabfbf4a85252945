mod dry_run;
mod submitter;
mod transaction_service;

pub use dry_run::{DryRunOutcome, DryRunSimulator};
pub use submitter::TransactionSubmitter;
pub use transaction_service::{CallOutcome, ContractCallRequest, TransactionService};
