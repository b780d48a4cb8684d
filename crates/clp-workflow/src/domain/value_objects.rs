//! # Value Objects
//!
//! Opaque identifiers, payloads, and transient workflow states.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique record identifier, assigned at creation (`point-<millis>-<hex>`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Submitter identity as known to the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Target context ciphertexts are bound to (the ledger contract or
/// equivalent).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerContext(pub String);

impl From<&str> for LedgerContext {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Opaque reference to an encrypted value stored on the ledger. Not the
/// value itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueHandle(pub String);

impl fmt::Display for ValueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ciphertext plus well-formedness proof, the output of the encrypt step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedInput {
    /// Encrypted payload.
    pub payload: Vec<u8>,
    /// Proof the payload is well-formed.
    pub proof: Vec<u8>,
}

/// Encoded clear values produced by the decryption protocol, as the ledger's
/// verification entry point expects them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearValuesPayload(pub Vec<u8>);

/// Proof that the clear values match the requested ciphertext handles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptionProof(pub Vec<u8>);

/// Result of an off-chain decryption request, delivered once the proof is
/// ready.
#[derive(Clone, Debug)]
pub struct DecryptionOutcome {
    /// Clear integer per requested handle.
    pub clear_values: HashMap<ValueHandle, u64>,
    /// Encoded clear values for the verification transaction.
    pub payload: ClearValuesPayload,
    /// Decryption proof for the verification transaction.
    pub proof: DecryptionProof,
}

/// Receipt for a confirmed ledger transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash.
    pub tx_hash: String,
    /// Block the transaction was included in.
    pub block_number: u64,
}

/// Everything a record-creation write carries.
#[derive(Clone, Debug)]
pub struct RecordSubmission {
    /// Fresh record id.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Ciphertext and well-formedness proof.
    pub encrypted: EncryptedInput,
    /// Brand reference-list index.
    pub brand_index: u32,
    /// Category reference-list index.
    pub category_index: u32,
    /// Plaintext description.
    pub description: String,
    /// Submitting identity.
    pub submitter: AccountId,
}

/// Creation-path workflow states. Process-local; they disappear on reload,
/// the ledger is the durable source of truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreationPhase {
    /// Nothing in flight.
    Idle,
    /// Waiting on the confidentiality provider.
    Encrypting,
    /// Ledger write submitted, awaiting confirmation.
    Submitting,
    /// Confirmed on the ledger.
    Committed,
}

/// Revelation-path workflow states. Process-local, independent of the
/// creation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevelationPhase {
    /// Nothing in flight.
    Idle,
    /// Fetching the encrypted handle.
    RequestingProof,
    /// Waiting on the provider's decryption protocol.
    AwaitingProof,
    /// Verification transaction submitted, awaiting confirmation.
    VerifyingOnChain,
    /// Verification confirmed.
    Verified,
}
