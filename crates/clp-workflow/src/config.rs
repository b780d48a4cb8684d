//! # Workflow Configuration

use crate::domain::LedgerContext;
use clp_status::{DEFAULT_HISTORY_CAPACITY, ERROR_DISPLAY, SUCCESS_DISPLAY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Loyalty workflow configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Target context ciphertexts are bound to (contract address or
    /// equivalent).
    pub context: LedgerContext,

    /// How long a success notice stays visible.
    pub success_display: Duration,

    /// How long an error notice stays visible.
    pub error_display: Duration,

    /// Operation history capacity.
    pub history_capacity: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            context: LedgerContext::from("0x0000000000000000000000000000000000000000"),
            success_display: SUCCESS_DISPLAY,
            error_display: ERROR_DISPLAY,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl WorkflowConfig {
    /// Create a config for testing (short display durations).
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            context: LedgerContext::from("test-context"),
            success_display: Duration::from_millis(40),
            error_display: Duration::from_millis(60),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
