//! # Domain Errors
//!
//! Error taxonomy for the loyalty workflow. None of these are fatal to the
//! process: the workflow remains usable after any failure.

use super::value_objects::RecordId;
use thiserror::Error;

/// Loyalty workflow error types.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No active submitter identity; the operation halts before any side
    /// effect.
    #[error("no connected identity")]
    NotConnected,

    /// The point value did not parse as a non-negative integer.
    #[error("invalid point value: {0:?}")]
    InvalidPointValue(String),

    /// The confidentiality provider failed during encryption or decryption
    /// proof generation.
    #[error("confidentiality provider failure: {0}")]
    ProviderFailure(String),

    /// The submitter declined to sign the transaction.
    #[error("transaction rejected by user")]
    RejectedByUser,

    /// The ledger reverted or refused the transaction.
    #[error("ledger rejected transaction: {0}")]
    LedgerRejected(String),

    /// The record is already verified on the ledger.
    ///
    /// Raised on duplicate verification. The workflow remaps this to a
    /// success outcome; it never reaches presentation as an error.
    #[error("record already verified on-chain")]
    AlreadyVerified,

    /// No record with this id on the ledger.
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    /// The ledger endpoint could not be reached.
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),
}

impl WorkflowError {
    /// Whether the error stands for a duplicate verification, which the
    /// revelation path treats as success.
    #[must_use]
    pub fn is_already_verified(&self) -> bool {
        matches!(self, Self::AlreadyVerified)
    }
}
