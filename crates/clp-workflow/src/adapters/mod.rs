//! # Adapters Module
//!
//! In-process implementations of the outbound ports, used by the test suite
//! and local development. Production deployments wire real ledger and
//! provider adapters against the same traits.

pub mod in_memory_ledger;
pub mod mock_provider;

pub use in_memory_ledger::InMemoryLedger;
pub use mock_provider::MockConfidentialityProvider;
