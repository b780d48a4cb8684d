//! # Loyalty Point Service
//!
//! Application service driving the two confidential-value state machines:
//!
//! - creation: `Idle -> Encrypting -> Submitting -> Committed`
//! - revelation: `Idle -> RequestingProof -> AwaitingProof ->
//!   VerifyingOnChain -> Verified`
//!
//! Every suspension point (encryption, ledger reads/writes, the decryption
//! proof wait) interleaves freely with other workflows; the only shared
//! mutable state is the record store, which is replaced wholesale. No lock
//! is held across an await.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::WorkflowConfig;
use crate::domain::{
    brand_name, category_name, AccountId, CreationPhase, LoyaltyPoint, RecordId, RecordStore,
    RecordSubmission, RevelationPhase, ValueHandle, WorkflowError,
};
use crate::ports::{
    ConfidentialityProvider, CreatePointRequest, LedgerReader, LedgerSigner, LoyaltyWorkflowApi,
};
use clp_status::{OperationLog, StatusChannel, StatusPhase};

/// Loyalty Point Service - orchestrates the confidential-value lifecycle.
pub struct LoyaltyPointService<R, S, P>
where
    R: LedgerReader,
    S: LedgerSigner,
    P: ConfidentialityProvider,
{
    /// Configuration.
    config: WorkflowConfig,
    /// Read-only ledger view.
    reader: Arc<R>,
    /// Signing ledger view.
    signer: Arc<S>,
    /// Encryption/proof capability.
    provider: Arc<P>,
    /// Record projection.
    store: RecordStore,
    /// Current notification slot.
    status: StatusChannel,
    /// Completed-operation history.
    history: OperationLog,
    /// Active submitter identity, if any.
    identity: RwLock<Option<AccountId>>,
}

impl<R, S, P> LoyaltyPointService<R, S, P>
where
    R: LedgerReader,
    S: LedgerSigner,
    P: ConfidentialityProvider,
{
    /// Create a new service around the given collaborators.
    pub fn new(config: WorkflowConfig, reader: Arc<R>, signer: Arc<S>, provider: Arc<P>) -> Self {
        let history = OperationLog::with_capacity(config.history_capacity);
        Self {
            config,
            reader,
            signer,
            provider,
            store: RecordStore::new(),
            status: StatusChannel::new(),
            history,
            identity: RwLock::new(None),
        }
    }

    /// Set the active submitter identity.
    pub fn connect(&self, identity: AccountId) {
        if let Ok(mut current) = self.identity.write() {
            *current = Some(identity);
        }
    }

    /// Clear the active submitter identity.
    pub fn disconnect(&self) {
        if let Ok(mut current) = self.identity.write() {
            *current = None;
        }
    }

    /// The status channel presentation observes.
    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    /// The operation history presentation observes.
    pub fn history(&self) -> &OperationLog {
        &self.history
    }

    /// The record projection.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    fn require_identity(&self) -> Result<AccountId, WorkflowError> {
        self.identity
            .read()
            .ok()
            .and_then(|guard| (*guard).clone())
            .ok_or(WorkflowError::NotConnected)
    }

    fn parse_point_value(raw: &str) -> Result<u64, WorkflowError> {
        raw.trim()
            .parse::<u64>()
            .map_err(|_| WorkflowError::InvalidPointValue(raw.to_string()))
    }

    fn fresh_record_id() -> RecordId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);
        // Random suffix keeps rapid concurrent creations collision-free.
        RecordId(format!("point-{millis}-{:08x}", rand::random::<u32>()))
    }

    fn publish_pending(&self, message: &str) {
        self.status.publish(StatusPhase::Pending, message);
    }

    fn publish_success(&self, message: &str) {
        self.status
            .publish_autoclear(StatusPhase::Success, message, self.config.success_display);
    }

    fn publish_error(&self, message: &str) {
        self.status
            .publish_autoclear(StatusPhase::Error, message, self.config.error_display);
    }

    /// Rebuild the projection from the ledger, skipping unreadable records.
    async fn rebuild_projection(&self) -> Result<Vec<LoyaltyPoint>, WorkflowError> {
        let ids = self.reader.list_record_ids().await?;
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.reader.get_record(&id).await {
                Ok(data) => records.push(LoyaltyPoint::project(id, data)),
                Err(error) => {
                    warn!(%id, %error, "skipping unreadable record");
                }
            }
        }
        self.store.replace(records.clone());
        Ok(records)
    }

    /// Refresh after a committed transaction. The commit already succeeded,
    /// so a failed refresh is logged and the stale projection stands until
    /// the next one.
    async fn refresh_after_commit(&self) {
        if let Err(error) = self.rebuild_projection().await {
            warn!(%error, "projection refresh after commit failed");
        }
    }

    fn fail_submission(&self, error: WorkflowError) -> WorkflowError {
        let message = match &error {
            WorkflowError::RejectedByUser => "Transaction rejected by user".to_string(),
            other => format!("Submission failed: {other}"),
        };
        self.publish_error(&message);
        error
    }

    fn fail_revelation(&self, error: WorkflowError) -> WorkflowError {
        self.publish_error(&format!("Decryption failed: {error}"));
        error
    }
}

#[async_trait]
impl<R, S, P> LoyaltyWorkflowApi for LoyaltyPointService<R, S, P>
where
    R: LedgerReader + 'static,
    S: LedgerSigner + 'static,
    P: ConfidentialityProvider + 'static,
{
    async fn create(&self, request: CreatePointRequest) -> Result<LoyaltyPoint, WorkflowError> {
        let op = Uuid::new_v4();

        let identity = match self.require_identity() {
            Ok(identity) => identity,
            Err(error) => {
                self.publish_error("Please connect an account first");
                return Err(error);
            }
        };
        let value = match Self::parse_point_value(&request.value) {
            Ok(value) => value,
            Err(error) => {
                self.publish_error(&format!("Invalid point value: {:?}", request.value));
                return Err(error);
            }
        };

        let id = Self::fresh_record_id();
        let mut phase = CreationPhase::Encrypting;
        debug!(%op, %id, ?phase, value, "creation started");
        self.publish_pending("Encrypting loyalty point value...");

        let encrypted = match self
            .provider
            .encrypt(&self.config.context, &identity, value)
            .await
        {
            Ok(encrypted) => encrypted,
            Err(error) => return Err(self.fail_submission(error)),
        };

        phase = CreationPhase::Submitting;
        debug!(%op, %id, ?phase, "ciphertext ready, submitting record");
        self.publish_pending("Submitting encrypted record...");

        let description = request.description.clone().unwrap_or_else(|| {
            format!(
                "Loyalty point for {} - {}",
                brand_name(request.brand_index),
                category_name(request.category_index)
            )
        });
        let submission = RecordSubmission {
            id: id.clone(),
            name: request.name.clone(),
            encrypted,
            brand_index: request.brand_index,
            category_index: request.category_index,
            description: description.clone(),
            submitter: identity.clone(),
        };

        let pending = match self.signer.submit_record(submission).await {
            Ok(pending) => pending,
            Err(error) => return Err(self.fail_submission(error)),
        };
        self.publish_pending("Waiting for transaction confirmation...");
        let receipt = match pending.wait().await {
            Ok(receipt) => receipt,
            Err(error) => return Err(self.fail_submission(error)),
        };

        phase = CreationPhase::Committed;
        info!(%op, %id, tx = %receipt.tx_hash, ?phase, "record committed");
        self.refresh_after_commit().await;
        self.history
            .record(format!("Created point: {} ({value} points)", request.name));
        self.publish_success("Loyalty point created successfully!");

        // The projection normally holds the record after the refresh; fall
        // back to the submitted fields if the ledger read lagged. The handle
        // mirrors the id until the next full refresh resolves it.
        Ok(self.store.get(&id).unwrap_or_else(|| LoyaltyPoint {
            id: id.clone(),
            name: request.name,
            brand_index: request.brand_index,
            category_index: request.category_index,
            brand: brand_name(request.brand_index).to_string(),
            category: category_name(request.category_index).to_string(),
            description,
            encrypted_handle: ValueHandle(id.0.clone()),
            creator: identity,
            created_at: 0,
            is_verified: false,
            revealed_value: None,
        }))
    }

    async fn reveal(&self, id: &RecordId) -> Result<Option<u64>, WorkflowError> {
        let op = Uuid::new_v4();

        if let Err(error) = self.require_identity() {
            self.publish_error("Please connect an account first");
            return Err(error);
        }

        // Terminal fast path, checked first on every invocation: a verified
        // record needs no cryptographic work and no writes.
        let data = match self.reader.get_record(id).await {
            Ok(data) => data,
            Err(error) => return Err(self.fail_revelation(error)),
        };
        if data.is_verified {
            debug!(%op, %id, "already verified, returning stored value");
            self.publish_success("Data already verified on-chain");
            self.history.record(format!(
                "Verified existing point: {} points",
                data.revealed_value
            ));
            return Ok(Some(data.revealed_value));
        }

        let mut phase = RevelationPhase::RequestingProof;
        debug!(%op, %id, ?phase, "revelation started");
        let handle = match self.reader.get_encrypted_handle(id).await {
            Ok(handle) => handle,
            Err(error) => return Err(self.fail_revelation(error)),
        };

        phase = RevelationPhase::AwaitingProof;
        debug!(%op, %id, ?phase, %handle, "requesting decryption proof");
        self.publish_pending("Requesting decryption proof...");
        let outcome = match self
            .provider
            .request_decryption(std::slice::from_ref(&handle), &self.config.context)
            .await
        {
            Ok(outcome) => outcome,
            Err(error) => return Err(self.fail_revelation(error)),
        };

        phase = RevelationPhase::VerifyingOnChain;
        debug!(%op, %id, ?phase, "submitting verification");
        self.publish_pending("Verifying decryption on-chain...");
        let confirmed = match self
            .signer
            .submit_verification(id, &outcome.payload, &outcome.proof)
            .await
        {
            Ok(pending) => pending.wait().await,
            Err(error) => Err(error),
        };

        match confirmed {
            Ok(receipt) => {
                phase = RevelationPhase::Verified;
                info!(%op, %id, tx = %receipt.tx_hash, ?phase, "verification committed");
                self.refresh_after_commit().await;

                let Some(value) = outcome.clear_values.get(&handle).copied() else {
                    let error = WorkflowError::ProviderFailure(format!(
                        "no clear value for handle {handle}"
                    ));
                    return Err(self.fail_revelation(error));
                };
                self.history
                    .record(format!("Decrypted point: {value} points"));
                self.publish_success("Data decrypted and verified successfully!");
                Ok(Some(value))
            }
            Err(WorkflowError::AlreadyVerified) => {
                // Another actor's verification landed first. The record is in
                // the state this call wanted; report success, not failure.
                debug!(%op, %id, "verification raced, ledger already verified");
                self.refresh_after_commit().await;
                self.publish_success("Data is already verified on-chain");
                Ok(None)
            }
            Err(error) => Err(self.fail_revelation(error)),
        }
    }

    async fn refresh(&self) -> Result<Vec<LoyaltyPoint>, WorkflowError> {
        match self.rebuild_projection().await {
            Ok(records) => {
                self.history
                    .record(format!("Loaded {} loyalty points", records.len()));
                Ok(records)
            }
            Err(error) => {
                self.publish_error("Failed to load data");
                Err(error)
            }
        }
    }

    async fn check_ledger(&self) -> bool {
        if self.reader.is_available().await {
            self.publish_success("Ledger is available and responding");
            self.history.record("Checked ledger availability: Success");
            true
        } else {
            self.publish_error("Ledger availability check failed");
            false
        }
    }

    fn store_snapshot(&self) -> Vec<LoyaltyPoint> {
        self.store.snapshot()
    }
}
