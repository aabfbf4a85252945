use alloy::primitives::Address;
use fin4_blockchain::{BlockchainError, DecodeShapeError, ValueError};

use crate::config::ConfigError;

/// Failures of the write path (encode, dry run, submit).
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    /// The dry run failed, but the provider error did not have the expected shape.
    #[error("Dry run of {label} failed with an undecodable error")]
    DecodeShape {
        label: String,
        #[source]
        source: DecodeShapeError,
    },
}

/// Failure of one aggregation pipeline. Nothing is dispatched when this is returned.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(
        "Claim {claim_id} on {token} lists {required} required verifier types but only {statuses} statuses"
    )]
    VerifierStatusMismatch {
        token: Address,
        claim_id: u64,
        required: usize,
        statuses: usize,
    },

    #[error("{method}: output lengths differ ({left} vs {right})")]
    LengthMismatch {
        method: String,
        left: usize,
        right: usize,
    },

    #[error("{method}: expected {expected} outputs, got {actual}")]
    UnexpectedOutputCount {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("Timestamp {value} is out of range")]
    InvalidTimestamp { value: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
