mod claim;
mod collection;
mod message;
mod notifier;
mod parameters;
mod pending_tx;
mod poll;
mod store;
mod submission;
mod token;
mod verifier_type;

pub use claim::{Claim, VerifierStatus};
pub use collection::Collection;
pub use message::{Message, MessageRecord, MessageType};
pub use notifier::{LogNotifier, Notifier};
pub use parameters::{ParameterizerParam, SystemParameter};
pub use pending_tx::{
    PendingTransaction, PendingTransactionError, TrackingId, TransactionHandlers,
    TransactionOutcome, TransactionStatus,
};
pub use poll::{PollPeriod, PollStatus, poll_status};
pub use store::{StoreCommand, StoreDispatcher, store_channel};
pub use submission::Submission;
pub use token::{Token, TokenBalance, Underlying};
pub use verifier_type::VerifierType;
