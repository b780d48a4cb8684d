//! # CLP Status - Transaction Status Channel & Operation History
//!
//! Presentation-facing signals for the loyalty workflow:
//!
//! - [`StatusChannel`]: a single-slot, last-write-wins notification cell.
//!   Exactly one notice is live at any time; a new publish overwrites the
//!   previous one regardless of its phase. Success and error notices clear
//!   themselves after a display duration.
//! - [`OperationLog`]: an append-only, most-recent-first history of completed
//!   operations, capped at a fixed number of entries.
//!
//! Both are observability surfaces, not correctness mechanisms: losing or
//! overwriting a notice never affects workflow state.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod history;
pub mod status;

pub use history::{OperationEntry, OperationLog};
pub use status::{StatusChannel, StatusNotice, StatusPhase};

use std::time::Duration;

/// Default display duration for success/info notices.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(2);

/// Default display duration for error notices (slightly longer).
pub const ERROR_DISPLAY: Duration = Duration::from_secs(3);

/// Default operation history capacity.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
