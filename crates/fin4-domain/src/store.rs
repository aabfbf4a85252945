use alloy::primitives::{Address, B256, Bytes};
use tokio::sync::mpsc;

use crate::{
    Claim, Collection, Message, MessageRecord, ParameterizerParam, PendingTransaction,
    Submission, SystemParameter, Token, TokenBalance, TrackingId, Underlying, VerifierType,
};

/// Bulk-update events for the external store.
///
/// Every mutation leaves the core as one of these; the receiving reducer owns
/// all state and applies commands in the order they were dispatched.
#[derive(Debug, Clone)]
pub enum StoreCommand {
    AddContract {
        name: String,
        address: Address,
        events: Vec<String>,
    },
    DryRunSucceeded {
        method_label: String,
        display_label: String,
        result: Bytes,
    },
    DryRunFailed {
        method_label: String,
        display_label: String,
        error_reason: String,
    },
    EnrichPendingTransaction(PendingTransaction),
    TransactionBroadcast {
        tracking_id: TrackingId,
        tx_hash: B256,
    },
    TransactionError {
        tracking_id: TrackingId,
        reason: String,
    },
    AddMultipleFin4Tokens(Vec<Token>),
    AddMultipleClaims(Vec<Claim>),
    AddMultipleMessages(Vec<MessageRecord>),
    UpdateStubMessage(Message),
    AddMultipleCollections(Vec<Collection>),
    AddMultipleSubmissions(Vec<Submission>),
    AddMultipleVerifierTypes(Vec<VerifierType>),
    SetSystemParameter(SystemParameter),
    SetParameterizerParams(Vec<ParameterizerParam>),
    UpdateMultipleBalances(Vec<TokenBalance>),
    UpdateGovernanceBalance(TokenBalance),
    SetUnderlyings(Vec<Underlying>),
    MarkFin4TokenAsOpat { token_address: Address },
}

impl StoreCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreCommand::AddContract { .. } => "ADD_CONTRACT",
            StoreCommand::DryRunSucceeded { .. } => "DRY_RUN_SUCCEEDED",
            StoreCommand::DryRunFailed { .. } => "DRY_RUN_FAILED",
            StoreCommand::EnrichPendingTransaction(_) => "ENRICH_PENDING_TRANSACTION",
            StoreCommand::TransactionBroadcast { .. } => "TRANSACTION_BROADCAST",
            StoreCommand::TransactionError { .. } => "TRANSACTION_ERROR",
            StoreCommand::AddMultipleFin4Tokens(_) => "ADD_MULTIPLE_FIN4_TOKENS",
            StoreCommand::AddMultipleClaims(_) => "ADD_MULTIPLE_CLAIMS",
            StoreCommand::AddMultipleMessages(_) => "ADD_MULTIPLE_MESSAGES",
            StoreCommand::UpdateStubMessage(_) => "UPDATE_STUB_MESSAGE",
            StoreCommand::AddMultipleCollections(_) => "ADD_MULTIPLE_COLLECTIONS",
            StoreCommand::AddMultipleSubmissions(_) => "ADD_MULTIPLE_SUBMISSIONS",
            StoreCommand::AddMultipleVerifierTypes(_) => "ADD_MULTIPLE_VERIFIER_TYPES",
            StoreCommand::SetSystemParameter(_) => "SET_SYSTEM_PARAMETER",
            StoreCommand::SetParameterizerParams(_) => "SET_PARAMETERIZER_PARAMS",
            StoreCommand::UpdateMultipleBalances(_) => "UPDATE_MULTIPLE_BALANCES",
            StoreCommand::UpdateGovernanceBalance(_) => "UPDATE_GOVERNANCE_BALANCE",
            StoreCommand::SetUnderlyings(_) => "SET_UNDERLYINGS",
            StoreCommand::MarkFin4TokenAsOpat { .. } => "MARK_FIN4TOKEN_AS_OPAT",
        }
    }
}

/// Sending half of the store command channel.
#[derive(Debug, Clone)]
pub struct StoreDispatcher {
    sender: mpsc::UnboundedSender<StoreCommand>,
}

pub fn store_channel() -> (StoreDispatcher, mpsc::UnboundedReceiver<StoreCommand>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (StoreDispatcher { sender }, receiver)
}

impl StoreDispatcher {
    pub fn dispatch(&self, command: StoreCommand) {
        let kind = command.kind();
        if self.sender.send(command).is_err() {
            tracing::warn!(kind, "Store receiver dropped; command discarded");
            return;
        }
        tracing::trace!(kind, "Dispatched store command");
    }
}
