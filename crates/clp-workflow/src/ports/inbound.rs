//! # Inbound Ports
//!
//! API trait defining what the loyalty workflow exposes to presentation.

use crate::domain::{LoyaltyPoint, RecordId, WorkflowError};
use async_trait::async_trait;

/// Inputs for a record creation, as captured from the submitter.
#[derive(Clone, Debug)]
pub struct CreatePointRequest {
    /// Display name.
    pub name: String,
    /// Raw value text; must parse as a non-negative integer.
    pub value: String,
    /// Brand reference-list index.
    pub brand_index: u32,
    /// Category reference-list index.
    pub category_index: u32,
    /// Optional description; derived from brand and category when absent.
    pub description: Option<String>,
}

impl CreatePointRequest {
    /// Convenience constructor with a derived description.
    #[must_use]
    pub fn new(name: &str, value: &str, brand_index: u32, category_index: u32) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            brand_index,
            category_index,
            description: None,
        }
    }
}

/// Loyalty workflow API - inbound port.
#[async_trait]
pub trait LoyaltyWorkflowApi: Send + Sync {
    /// Create an encrypted loyalty point record.
    ///
    /// Not idempotent by design: two calls with identical inputs create two
    /// distinct records, there is no natural dedup key.
    async fn create(&self, request: CreatePointRequest) -> Result<LoyaltyPoint, WorkflowError>;

    /// Reveal a record's confidential value via on-chain proof verification.
    ///
    /// `Ok(Some(value))` when this call produced or read the certified value.
    /// `Ok(None)` when another actor's verification landed first; the record
    /// is verified but this call produced no new value.
    async fn reveal(&self, id: &RecordId) -> Result<Option<u64>, WorkflowError>;

    /// Rebuild the store projection from the ledger.
    ///
    /// Unreadable records are skipped, never aborting the batch.
    async fn refresh(&self) -> Result<Vec<LoyaltyPoint>, WorkflowError>;

    /// Probe ledger liveness, surfacing the outcome on the status channel.
    async fn check_ledger(&self) -> bool;

    /// Current projection snapshot.
    fn store_snapshot(&self) -> Vec<LoyaltyPoint>;
}
