//! # Operation History
//!
//! Bounded, most-recent-first log of completed operations.

use crate::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// One completed operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationEntry {
    /// Unix seconds at which the operation completed.
    pub at_unix_secs: u64,
    /// Human-readable summary.
    pub summary: String,
}

/// Append-only operation log, capped at a fixed capacity.
///
/// Newest entries come first; once full, the oldest entry is dropped.
#[derive(Debug)]
pub struct OperationLog {
    capacity: usize,
    entries: RwLock<VecDeque<OperationEntry>>,
}

impl OperationLog {
    /// Create a log with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a log holding at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: RwLock::new(VecDeque::new()),
        }
    }

    /// Record a completed operation.
    pub fn record(&self, summary: impl Into<String>) {
        let entry = OperationEntry {
            at_unix_secs: unix_now(),
            summary: summary.into(),
        };
        if let Ok(mut entries) = self.entries.write() {
            entries.push_front(entry);
            entries.truncate(self.capacity);
        }
    }

    /// Snapshot of the log, most recent first.
    #[must_use]
    pub fn entries(&self) -> Vec<OperationEntry> {
        self.entries
            .read()
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
