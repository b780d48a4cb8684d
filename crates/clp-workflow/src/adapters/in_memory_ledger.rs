//! # In-Memory Ledger
//!
//! Simulated ledger implementing both the read-only and signing ports.
//! Records live in insertion order; verification applies atomically at
//! submission, and a duplicate verification is rejected the way the real
//! ledger rejects it.

use crate::domain::{
    ClearValuesPayload, DecryptionProof, RecordData, RecordId, RecordSubmission, TxReceipt,
    ValueHandle, WorkflowError,
};
use crate::ports::{LedgerReader, LedgerSigner, PendingTransaction};
use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

/// Transaction whose effect applied at submission; `wait` only hands back
/// the receipt.
struct InstantTx {
    receipt: TxReceipt,
}

#[async_trait]
impl PendingTransaction for InstantTx {
    async fn wait(self: Box<Self>) -> Result<TxReceipt, WorkflowError> {
        Ok(self.receipt)
    }
}

/// In-memory ledger adapter.
pub struct InMemoryLedger {
    records: RwLock<Vec<(RecordId, RecordData)>>,
    unreadable: RwLock<HashSet<RecordId>>,
    reject_submissions: AtomicBool,
    available: AtomicBool,
    clock: AtomicU64,
    tx_counter: AtomicU64,
    submissions: AtomicU64,
    verifications: AtomicU64,
}

impl InMemoryLedger {
    /// Create an empty, available ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            unreadable: RwLock::new(HashSet::new()),
            reject_submissions: AtomicBool::new(false),
            available: AtomicBool::new(true),
            clock: AtomicU64::new(1_700_000_000),
            tx_counter: AtomicU64::new(0),
            submissions: AtomicU64::new(0),
            verifications: AtomicU64::new(0),
        }
    }

    /// Toggle ledger availability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make record submissions fail as user-rejected.
    pub fn set_reject_submissions(&self, reject: bool) {
        self.reject_submissions.store(reject, Ordering::SeqCst);
    }

    /// Make reads of one record fail, leaving the rest readable.
    pub fn inject_read_failure(&self, id: RecordId) {
        if let Ok(mut unreadable) = self.unreadable.write() {
            unreadable.insert(id);
        }
    }

    /// Verify a record directly, simulating another actor's verification
    /// transaction landing first.
    pub fn force_verify(&self, id: &RecordId, value: u64) -> Result<(), WorkflowError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| WorkflowError::LedgerUnavailable("ledger state poisoned".to_string()))?;
        let (_, data) = records
            .iter_mut()
            .find(|(record_id, _)| record_id == id)
            .ok_or_else(|| WorkflowError::RecordNotFound(id.clone()))?;
        if data.is_verified {
            return Err(WorkflowError::AlreadyVerified);
        }
        data.is_verified = true;
        data.revealed_value = value;
        self.verifications.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Number of stored records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    /// Number of accepted record submissions.
    #[must_use]
    pub fn submission_count(&self) -> u64 {
        self.submissions.load(Ordering::SeqCst)
    }

    /// Number of applied verifications.
    #[must_use]
    pub fn verification_count(&self) -> u64 {
        self.verifications.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), WorkflowError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(WorkflowError::LedgerUnavailable(
                "ledger endpoint unreachable".to_string(),
            ))
        }
    }

    fn next_receipt(&self) -> TxReceipt {
        let nonce = self.tx_counter.fetch_add(1, Ordering::SeqCst);
        TxReceipt {
            tx_hash: format!("0x{nonce:064x}"),
            block_number: nonce + 1,
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn list_record_ids(&self) -> Result<Vec<RecordId>, WorkflowError> {
        self.check_available()?;
        Ok(self
            .records
            .read()
            .map(|records| records.iter().map(|(id, _)| id.clone()).collect())
            .unwrap_or_default())
    }

    async fn get_record(&self, id: &RecordId) -> Result<RecordData, WorkflowError> {
        self.check_available()?;
        let unreadable = self
            .unreadable
            .read()
            .map(|set| set.contains(id))
            .unwrap_or(false);
        if unreadable {
            return Err(WorkflowError::LedgerRejected(format!(
                "read reverted for {id}"
            )));
        }
        self.records
            .read()
            .ok()
            .and_then(|records| {
                records
                    .iter()
                    .find(|(record_id, _)| record_id == id)
                    .map(|(_, data)| data.clone())
            })
            .ok_or_else(|| WorkflowError::RecordNotFound(id.clone()))
    }

    async fn get_encrypted_handle(&self, id: &RecordId) -> Result<ValueHandle, WorkflowError> {
        let data = self.get_record(id).await?;
        Ok(data.encrypted_handle)
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerSigner for InMemoryLedger {
    async fn submit_record(
        &self,
        submission: RecordSubmission,
    ) -> Result<Box<dyn PendingTransaction>, WorkflowError> {
        self.check_available()?;
        if self.reject_submissions.load(Ordering::SeqCst) {
            return Err(WorkflowError::RejectedByUser);
        }
        if submission.encrypted.proof.is_empty() {
            return Err(WorkflowError::LedgerRejected(
                "malformed well-formedness proof".to_string(),
            ));
        }

        let created_at = self.clock.fetch_add(1, Ordering::SeqCst);
        let data = RecordData {
            name: submission.name,
            brand_index: submission.brand_index,
            category_index: submission.category_index,
            description: submission.description,
            encrypted_handle: handle_for(&submission.encrypted.payload),
            creator: submission.submitter,
            created_at,
            is_verified: false,
            revealed_value: 0,
        };

        let mut records = self
            .records
            .write()
            .map_err(|_| WorkflowError::LedgerUnavailable("ledger state poisoned".to_string()))?;
        records.push((submission.id, data));
        self.submissions.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(InstantTx {
            receipt: self.next_receipt(),
        }))
    }

    async fn submit_verification(
        &self,
        id: &RecordId,
        clear_values: &ClearValuesPayload,
        proof: &DecryptionProof,
    ) -> Result<Box<dyn PendingTransaction>, WorkflowError> {
        self.check_available()?;
        if proof.0.is_empty() {
            return Err(WorkflowError::LedgerRejected(
                "malformed decryption proof".to_string(),
            ));
        }
        let value = decode_first_value(clear_values).ok_or_else(|| {
            WorkflowError::LedgerRejected("malformed clear-values payload".to_string())
        })?;

        self.force_verify(id, value)?;
        Ok(Box::new(InstantTx {
            receipt: self.next_receipt(),
        }))
    }
}

/// Handles are derived from the ciphertext so the provider's decryption
/// protocol can resolve them without extra plumbing.
fn handle_for(payload: &[u8]) -> ValueHandle {
    let mut handle = String::with_capacity(2 + payload.len() * 2);
    handle.push_str("h-");
    for byte in payload {
        let _ = write!(handle, "{byte:02x}");
    }
    ValueHandle(handle)
}

/// The clear-values payload carries one 8-byte big-endian value per
/// requested handle; a single-record verification reads the first.
fn decode_first_value(payload: &ClearValuesPayload) -> Option<u64> {
    let bytes: [u8; 8] = payload.0.get(..8)?.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}
