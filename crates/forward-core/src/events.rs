//! Change feed for realtime push notifications from the remote collaborator.
//!
//! The remote system emits an opaque [`ChangeEvent`] whenever a row in a
//! watched table is inserted, updated, or deleted — regardless of which
//! client caused the change. Consumers do not merge events into local
//! state; their only reaction is "invalidate and reload", which keeps
//! the client eventually consistent without local merge logic.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Kind of row change observed by the remote system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One row change in a watched remote table.
///
/// The subscription is table-wide: events carry no owner scoping. The
/// refetch issued in response is owner-scoped by the remote read
/// predicate, so an over-broad event can trigger a redundant reload but
/// never leaks rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Remote table the change occurred in.
    pub table: String,
    pub kind: ChangeKind,
    /// Id of the changed row, when the remote system supplies one
    /// (deletes may omit it).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

/// Broadcast-based feed distributing change events to hook subscribers.
///
/// Uses `tokio::sync::broadcast` with a configurable buffer size. Slow
/// receivers that fall behind receive a `Lagged` error and miss events;
/// because consumers refetch full canonical state on every event, a
/// missed event is recovered by the next one.
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Create a new change feed with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit a change event to all subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn emit(&self, event: ChangeEvent) {
        tracing::debug!(
            table = %event.table,
            kind = ?event.kind,
            subscriber_count = self.tx.receiver_count(),
            "change feed emit"
        );
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive change events. Each subscriber gets its own
    /// independent stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(crate::defaults::CHANGE_FEED_CAPACITY)
    }
}
