//! # Outbound Ports
//!
//! Traits for the two external capabilities the workflow consumes: the
//! remote ledger (read-only and signing views) and the confidentiality
//! provider. Neither is reimplemented here; the workflow only depends on
//! these contracts.

use crate::domain::{
    AccountId, ClearValuesPayload, DecryptionOutcome, DecryptionProof, EncryptedInput,
    LedgerContext, RecordData, RecordId, RecordSubmission, TxReceipt, ValueHandle, WorkflowError,
};
use async_trait::async_trait;

/// Read-only ledger view - outbound port.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Enumerate every record id, in the ledger's stable order.
    async fn list_record_ids(&self) -> Result<Vec<RecordId>, WorkflowError>;

    /// Read the full data for one record.
    async fn get_record(&self, id: &RecordId) -> Result<RecordData, WorkflowError>;

    /// Fetch the opaque handle of a record's encrypted value.
    async fn get_encrypted_handle(&self, id: &RecordId) -> Result<ValueHandle, WorkflowError>;

    /// Liveness probe.
    async fn is_available(&self) -> bool;
}

/// A submitted, not yet confirmed, ledger transaction.
///
/// Submission and confirmation are separate suspension points so the status
/// channel can report them as distinct phases.
#[async_trait]
pub trait PendingTransaction: Send {
    /// Await block inclusion.
    async fn wait(self: Box<Self>) -> Result<TxReceipt, WorkflowError>;
}

/// Signing ledger view - outbound port.
#[async_trait]
pub trait LedgerSigner: Send + Sync {
    /// Submit a record-creation write.
    ///
    /// On failure no record exists on the ledger; there is nothing to roll
    /// back locally.
    async fn submit_record(
        &self,
        submission: RecordSubmission,
    ) -> Result<Box<dyn PendingTransaction>, WorkflowError>;

    /// Submit a decryption-verification write.
    ///
    /// Fails with [`WorkflowError::AlreadyVerified`] when another actor's
    /// verification already landed for this record.
    async fn submit_verification(
        &self,
        id: &RecordId,
        clear_values: &ClearValuesPayload,
        proof: &DecryptionProof,
    ) -> Result<Box<dyn PendingTransaction>, WorkflowError>;
}

/// Off-chain encryption and decryption-proof capability - outbound port.
///
/// Both calls may suspend for an unbounded, provider-controlled duration.
/// The workflow imposes no timeout; in-flight calls are abandoned on
/// shutdown, never cancelled mid-flight.
#[async_trait]
pub trait ConfidentialityProvider: Send + Sync {
    /// Encrypt a plaintext for the target context, yielding the ciphertext
    /// and its well-formedness proof.
    async fn encrypt(
        &self,
        context: &LedgerContext,
        identity: &AccountId,
        plaintext: u64,
    ) -> Result<EncryptedInput, WorkflowError>;

    /// Request decryption of a handle set through the provider's
    /// asynchronous protocol; resolves once the proof is ready.
    async fn request_decryption(
        &self,
        handles: &[ValueHandle],
        context: &LedgerContext,
    ) -> Result<DecryptionOutcome, WorkflowError>;
}
