//! # Mock Confidentiality Provider
//!
//! Deterministic stand-in for the off-chain encryption and decryption-proof
//! capability. "Encryption" is a byte mask, proofs are fixed tags, and the
//! decryption protocol inverts the handles the in-memory ledger derives from
//! ciphertexts. Supports failure injection and a configurable proof latency
//! for interleaving tests.

use crate::domain::{
    AccountId, ClearValuesPayload, DecryptionOutcome, DecryptionProof, EncryptedInput,
    LedgerContext, ValueHandle, WorkflowError,
};
use crate::ports::ConfidentialityProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

const MASK: u8 = 0xA5;
const ENCRYPT_PROOF_TAG: &[u8] = b"clp-input-proof-v1";
const DECRYPT_PROOF_TAG: &[u8] = b"clp-decrypt-proof-v1";

/// Mock provider with failure injection.
pub struct MockConfidentialityProvider {
    fail_encrypt: AtomicBool,
    fail_decrypt: AtomicBool,
    proof_latency: RwLock<Option<Duration>>,
    encrypt_calls: AtomicU64,
    decryption_requests: AtomicU64,
}

impl MockConfidentialityProvider {
    /// Create a provider that succeeds immediately.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fail_encrypt: AtomicBool::new(false),
            fail_decrypt: AtomicBool::new(false),
            proof_latency: RwLock::new(None),
            encrypt_calls: AtomicU64::new(0),
            decryption_requests: AtomicU64::new(0),
        }
    }

    /// Make `encrypt` fail.
    pub fn set_fail_encrypt(&self, fail: bool) {
        self.fail_encrypt.store(fail, Ordering::SeqCst);
    }

    /// Make `request_decryption` fail.
    pub fn set_fail_decrypt(&self, fail: bool) {
        self.fail_decrypt.store(fail, Ordering::SeqCst);
    }

    /// Delay decryption-proof delivery, leaving the workflow suspended in
    /// its proof wait.
    pub fn set_proof_latency(&self, latency: Option<Duration>) {
        if let Ok(mut slot) = self.proof_latency.write() {
            *slot = latency;
        }
    }

    /// Number of `encrypt` invocations.
    #[must_use]
    pub fn encrypt_calls(&self) -> u64 {
        self.encrypt_calls.load(Ordering::SeqCst)
    }

    /// Number of `request_decryption` invocations.
    #[must_use]
    pub fn decryption_requests(&self) -> u64 {
        self.decryption_requests.load(Ordering::SeqCst)
    }

    fn clear_value_for(handle: &ValueHandle) -> Result<u64, WorkflowError> {
        let hex = handle.0.strip_prefix("h-").ok_or_else(|| {
            WorkflowError::ProviderFailure(format!("unresolvable handle {handle}"))
        })?;
        let bytes = decode_hex(hex).ok_or_else(|| {
            WorkflowError::ProviderFailure(format!("unresolvable handle {handle}"))
        })?;
        let masked: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
            WorkflowError::ProviderFailure(format!("unresolvable handle {handle}"))
        })?;
        Ok(u64::from_be_bytes(masked.map(|byte| byte ^ MASK)))
    }
}

impl Default for MockConfidentialityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfidentialityProvider for MockConfidentialityProvider {
    async fn encrypt(
        &self,
        _context: &LedgerContext,
        _identity: &AccountId,
        plaintext: u64,
    ) -> Result<EncryptedInput, WorkflowError> {
        self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_encrypt.load(Ordering::SeqCst) {
            return Err(WorkflowError::ProviderFailure(
                "encryption backend offline".to_string(),
            ));
        }
        let payload = plaintext
            .to_be_bytes()
            .map(|byte| byte ^ MASK)
            .to_vec();
        Ok(EncryptedInput {
            payload,
            proof: ENCRYPT_PROOF_TAG.to_vec(),
        })
    }

    async fn request_decryption(
        &self,
        handles: &[ValueHandle],
        _context: &LedgerContext,
    ) -> Result<DecryptionOutcome, WorkflowError> {
        self.decryption_requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_decrypt.load(Ordering::SeqCst) {
            return Err(WorkflowError::ProviderFailure(
                "decryption protocol unavailable".to_string(),
            ));
        }

        let latency = self
            .proof_latency
            .read()
            .ok()
            .and_then(|slot| *slot);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut clear_values = HashMap::with_capacity(handles.len());
        let mut payload = Vec::with_capacity(handles.len() * 8);
        for handle in handles {
            let value = Self::clear_value_for(handle)?;
            payload.extend_from_slice(&value.to_be_bytes());
            clear_values.insert(handle.clone(), value);
        }

        Ok(DecryptionOutcome {
            clear_values,
            payload: ClearValuesPayload(payload),
            proof: DecryptionProof(DECRYPT_PROOF_TAG.to_vec()),
        })
    }
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}
