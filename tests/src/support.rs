//! # Test Fixtures
//!
//! Shared builders for the scenario tests.

use clp_workflow::{
    AccountId, InMemoryLedger, LoyaltyPointService, MockConfidentialityProvider, WorkflowConfig,
};
use std::sync::Arc;
use std::sync::Once;

/// Service wired against the in-memory ledger and mock provider.
pub type TestService =
    LoyaltyPointService<InMemoryLedger, InMemoryLedger, MockConfidentialityProvider>;

static TRACING: Once = Once::new();

/// Initialize tracing once for the whole suite; `RUST_LOG` controls the
/// filter.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Build a service plus handles to its collaborators.
pub fn test_service() -> (
    Arc<TestService>,
    Arc<InMemoryLedger>,
    Arc<MockConfidentialityProvider>,
) {
    init_tracing();
    let ledger = Arc::new(InMemoryLedger::new());
    let provider = Arc::new(MockConfidentialityProvider::new());
    let service = Arc::new(LoyaltyPointService::new(
        WorkflowConfig::for_testing(),
        Arc::clone(&ledger),
        Arc::clone(&ledger),
        Arc::clone(&provider),
    ));
    (service, ledger, provider)
}

/// Build a service with an identity already connected.
pub fn connected_service() -> (
    Arc<TestService>,
    Arc<InMemoryLedger>,
    Arc<MockConfidentialityProvider>,
) {
    let (service, ledger, provider) = test_service();
    service.connect(AccountId::from("0xa11ce"));
    (service, ledger, provider)
}
