//! # Status Channel
//!
//! Single current notification describing workflow progress or outcome.
//!
//! Built on `tokio::sync::watch`: observers always see the latest notice and
//! never a queue of stale ones. Publishing is last-write-wins by construction.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Phase of the operation a notice describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPhase {
    /// The operation is in flight.
    Pending,
    /// The operation completed.
    Success,
    /// The operation failed.
    Error,
}

/// The single live notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotice {
    /// Whether presentation should show the notice at all.
    pub visible: bool,
    /// Progress/outcome phase.
    pub phase: StatusPhase,
    /// Human-readable message.
    pub message: String,
    /// Publish sequence number. Auto-clear timers only clear the notice they
    /// scheduled for; a newer seq means a newer notice took the slot.
    pub seq: u64,
}

impl StatusNotice {
    fn hidden(seq: u64) -> Self {
        Self {
            visible: false,
            phase: StatusPhase::Pending,
            message: String::new(),
            seq,
        }
    }
}

/// Single-slot published-state cell with subscribe/notify semantics.
pub struct StatusChannel {
    sender: Arc<watch::Sender<StatusNotice>>,
    seq: AtomicU64,
}

impl StatusChannel {
    /// Create a channel with no visible notice.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(StatusNotice::hidden(0));
        Self {
            sender: Arc::new(sender),
            seq: AtomicU64::new(0),
        }
    }

    /// Subscribe to notice updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StatusNotice> {
        self.sender.subscribe()
    }

    /// Snapshot of the current notice.
    #[must_use]
    pub fn current(&self) -> StatusNotice {
        self.sender.borrow().clone()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Publish a notice, replacing whatever was live.
    ///
    /// Returns the notice's sequence number.
    pub fn publish(&self, phase: StatusPhase, message: impl Into<String>) -> u64 {
        let seq = self.next_seq();
        let notice = StatusNotice {
            visible: true,
            phase,
            message: message.into(),
            seq,
        };
        debug!(seq, ?phase, message = %notice.message, "status published");
        self.sender.send_replace(notice);
        seq
    }

    /// Publish a notice and schedule it to clear after `ttl`.
    ///
    /// The timer clears the slot only if this notice is still live; a newer
    /// publish keeps the slot and the stale timer becomes a no-op.
    pub fn publish_autoclear(
        &self,
        phase: StatusPhase,
        message: impl Into<String>,
        ttl: Duration,
    ) -> u64 {
        let seq = self.publish(phase, message);
        let sender = Arc::clone(&self.sender);
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            sender.send_if_modified(|notice| {
                if notice.seq == seq && notice.visible {
                    *notice = StatusNotice::hidden(seq);
                    true
                } else {
                    false
                }
            });
        });
        seq
    }

    /// Hide the current notice immediately.
    pub fn clear(&self) {
        let seq = self.next_seq();
        self.sender.send_replace(StatusNotice::hidden(seq));
    }
}

impl Default for StatusChannel {
    fn default() -> Self {
        Self::new()
    }
}
