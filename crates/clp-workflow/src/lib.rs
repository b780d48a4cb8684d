//! # CLP Workflow - Confidential Loyalty Point Lifecycle
//!
//! Orchestrates the lifecycle of confidential loyalty-point records:
//!
//! ```text
//! plaintext -> encrypted-and-submitted -> pending-verification -> on-chain-verified
//! ```
//!
//! The workflow coordinates an off-chain encryption step, an on-chain
//! submission transaction, an off-chain decryption-proof request, and an
//! on-chain verification transaction. Encryption and proof generation are
//! opaque capabilities supplied by collaborators; this crate owns the
//! ordering, idempotence, and failure guarantees around them.
//!
//! ## Module Structure
//!
//! ```text
//! clp-workflow/
//! ├── domain/          # Records, value objects, errors, projection invariants
//! ├── ports/           # API trait (inbound) + ledger/provider traits (outbound)
//! ├── application/     # LoyaltyPointService state machines + derived views
//! ├── adapters/        # In-memory ledger and deterministic provider
//! └── config.rs        # WorkflowConfig
//! ```
//!
//! ## Guarantees
//!
//! | Rule | Description |
//! |------|-------------|
//! | Verified monotonicity | A record's verified flag never reverts to false |
//! | Verified short-circuit | Revealing a verified record does no crypto work and no writes |
//! | Duplicate verification | Ledger-side "already verified" rejection is a success outcome |
//! | Wholesale refresh | The store projection is replaced, never merged |
//! | No partial records | A failed submission leaves no record behind |

#![warn(missing_docs)]
#![warn(clippy::all)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{InMemoryLedger, MockConfidentialityProvider};
pub use application::{
    brand_distribution, filter_points, point_stats, BrandSlice, LoyaltyPointService, PointStats,
};
pub use config::WorkflowConfig;
pub use domain::{
    brand_name, category_name, verified_regressions, AccountId, ClearValuesPayload, CreationPhase,
    DecryptionOutcome, DecryptionProof, EncryptedInput, LedgerContext, LoyaltyPoint, RecordData,
    RecordId, RecordStore, RecordSubmission, RevelationPhase, TxReceipt, ValueHandle,
    WorkflowError, BRANDS, CATEGORIES,
};
pub use ports::{
    ConfidentialityProvider, CreatePointRequest, LedgerReader, LedgerSigner, LoyaltyWorkflowApi,
    PendingTransaction,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
