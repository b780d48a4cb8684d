//! # Domain Entities
//!
//! The loyalty record projection and the in-memory record store.

use super::invariants::{brand_name, category_name, verified_regressions};
use super::value_objects::{AccountId, RecordId, ValueHandle};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::warn;

/// Raw record fields as returned by a ledger read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordData {
    /// Display name, set at creation.
    pub name: String,
    /// Brand reference-list index.
    pub brand_index: u32,
    /// Category reference-list index.
    pub category_index: u32,
    /// Plaintext description.
    pub description: String,
    /// Handle of the encrypted value.
    pub encrypted_handle: ValueHandle,
    /// Submitter identity.
    pub creator: AccountId,
    /// Ledger-assigned unix timestamp.
    pub created_at: u64,
    /// Flips false -> true exactly once, on the verification transaction.
    pub is_verified: bool,
    /// Meaningful only when `is_verified` is true.
    pub revealed_value: u64,
}

/// A confidential loyalty entry as projected from the ledger.
///
/// All metadata is immutable after creation; there is no update or delete.
/// Only the verification transaction changes anything, flipping
/// `is_verified` and fixing `revealed_value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyPoint {
    /// Unique id assigned at creation.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Brand reference-list index as stored.
    pub brand_index: u32,
    /// Category reference-list index as stored.
    pub category_index: u32,
    /// Projected from `brand_index`; always a valid reference-list name.
    pub brand: String,
    /// Projected from `category_index`; always a valid reference-list name.
    pub category: String,
    /// Plaintext description.
    pub description: String,
    /// Opaque ledger reference to the encrypted value.
    pub encrypted_handle: ValueHandle,
    /// Submitter identity.
    pub creator: AccountId,
    /// Ledger-assigned unix timestamp.
    pub created_at: u64,
    /// Whether the verification transaction has landed.
    pub is_verified: bool,
    /// The certified plaintext value, present only once verified.
    pub revealed_value: Option<u64>,
}

impl LoyaltyPoint {
    /// Build the projection of a ledger record.
    #[must_use]
    pub fn project(id: RecordId, data: RecordData) -> Self {
        let is_verified = data.is_verified;
        Self {
            id,
            name: data.name,
            brand_index: data.brand_index,
            category_index: data.category_index,
            brand: brand_name(data.brand_index).to_string(),
            category: category_name(data.category_index).to_string(),
            description: data.description,
            encrypted_handle: data.encrypted_handle,
            creator: data.creator,
            created_at: data.created_at,
            is_verified,
            revealed_value: is_verified.then_some(data.revealed_value),
        }
    }

    /// The value presentation may show; `None` while still confidential.
    #[must_use]
    pub fn display_value(&self) -> Option<u64> {
        if self.is_verified {
            self.revealed_value
        } else {
            None
        }
    }
}

/// In-memory projection of all ledger records.
///
/// A derived, rebuildable view: every refresh replaces the contents
/// wholesale. Concurrent refreshes are safe by last-writer-wins replacement,
/// never by merging.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<Vec<LoyaltyPoint>>,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire projection with a fresh one.
    pub fn replace(&self, records: Vec<LoyaltyPoint>) {
        if let Ok(mut current) = self.records.write() {
            for id in verified_regressions(&current, &records) {
                warn!(%id, "verified flag regressed in refreshed projection");
            }
            *current = records;
        }
    }

    /// Snapshot of all records, in ledger enumeration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LoyaltyPoint> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Look up one record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<LoyaltyPoint> {
        self.records
            .read()
            .ok()
            .and_then(|records| records.iter().find(|point| &point.id == id).cloned())
    }

    /// Number of projected records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    /// Whether the projection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
