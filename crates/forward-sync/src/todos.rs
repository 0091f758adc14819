//! To-do list hook.
//!
//! Wraps remote access to AI-extracted to-dos. Reads are owner-scoped
//! and ordered newest first. Mutations go remote-first: local state is
//! patched only after the remote acknowledges, so a failure leaves
//! local state untouched (no rollback needed) and raises a
//! notification.
//!
//! The hook also consumes the realtime change feed: every
//! insert/update/delete on the watched table — whatever its origin —
//! triggers one full refetch. Refetches are not de-duplicated; when two
//! overlap, both apply in completion order and the last one wins, which
//! is benign because both fetch the same canonical remote state.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use forward_core::defaults::TODO_TABLE;
use forward_core::{
    Assignment, AssignmentStatus, ChangeFeed, ExtractedTodo, Notification, Notifier, TodoStore,
};
use forward_store::Store;

/// Loading/data pair exposed to views.
#[derive(Debug, Clone, Default)]
pub struct TodoListState {
    pub items: Vec<ExtractedTodo>,
    pub is_loading: bool,
}

struct Inner {
    remote: Arc<dyn TodoStore>,
    notifier: Arc<dyn Notifier>,
    /// None when no session is resolved; reads then reset to empty
    /// instead of erroring.
    owner_id: Option<String>,
    state: Mutex<TodoListState>,
}

/// The to-do list hook. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct TodoList {
    inner: Arc<Inner>,
}

impl TodoList {
    pub fn new(
        remote: Arc<dyn TodoStore>,
        notifier: Arc<dyn Notifier>,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                remote,
                notifier,
                owner_id,
                state: Mutex::new(TodoListState::default()),
            }),
        }
    }

    /// Current items (clone).
    pub fn items(&self) -> Vec<ExtractedTodo> {
        self.inner.state.lock().expect("state lock poisoned").items.clone()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().expect("state lock poisoned").is_loading
    }

    /// Full state clone for views.
    pub fn state(&self) -> TodoListState {
        self.inner.state.lock().expect("state lock poisoned").clone()
    }

    /// Reload the full list from the remote collaborator.
    ///
    /// Unauthenticated callers get an emptied list and no notification.
    /// On failure prior items are left untouched and a notification is
    /// raised.
    pub async fn refetch(&self) {
        let Some(owner_id) = self.inner.owner_id.clone() else {
            let mut state = self.inner.state.lock().expect("state lock poisoned");
            state.items.clear();
            state.is_loading = false;
            return;
        };

        self.inner
            .state
            .lock()
            .expect("state lock poisoned")
            .is_loading = true;

        match self.inner.remote.list_for_owner(&owner_id).await {
            Ok(items) => {
                debug!(
                    owner_id = %owner_id,
                    result_count = items.len(),
                    table = TODO_TABLE,
                    "todo refetch complete"
                );
                let mut state = self.inner.state.lock().expect("state lock poisoned");
                state.items = items;
                state.is_loading = false;
            }
            Err(e) => {
                error!(owner_id = %owner_id, error = %e, "todo refetch failed");
                self.inner
                    .notifier
                    .notify(Notification::error("Failed to load to-dos"));
                self.inner
                    .state
                    .lock()
                    .expect("state lock poisoned")
                    .is_loading = false;
            }
        }
    }

    /// Update one to-do's status. Local state is patched only after the
    /// remote acknowledges.
    pub async fn update_status(&self, id: &str, status: AssignmentStatus) {
        match self.inner.remote.update_status(id, status).await {
            Ok(()) => {
                let mut state = self.inner.state.lock().expect("state lock poisoned");
                if let Some(item) = state.items.iter_mut().find(|t| t.id == id) {
                    item.status = status;
                }
            }
            Err(e) => {
                error!(record_id = %id, error = %e, "todo status update failed");
                self.inner
                    .notifier
                    .notify(Notification::error("Failed to update to-do"));
            }
        }
    }

    /// Delete a to-do remotely, then drop it locally.
    pub async fn delete(&self, id: &str) {
        match self.inner.remote.delete(id).await {
            Ok(()) => {
                let mut state = self.inner.state.lock().expect("state lock poisoned");
                state.items.retain(|t| t.id != id);
            }
            Err(e) => {
                error!(record_id = %id, error = %e, "todo delete failed");
                self.inner
                    .notifier
                    .notify(Notification::error("Failed to delete to-do"));
            }
        }
    }

    /// Transfer a to-do into an [`Assignment`] in the application store.
    ///
    /// Remote-first: the record is flagged transferred remotely, then
    /// the local copy is flagged and the Assignment appended.
    pub async fn transfer(&self, id: &str, class_id: &str, app: &Store) {
        let Some(todo) = self.items().into_iter().find(|t| t.id == id) else {
            return;
        };

        match self.inner.remote.mark_transferred(id).await {
            Ok(()) => {
                {
                    let mut state = self.inner.state.lock().expect("state lock poisoned");
                    if let Some(item) = state.items.iter_mut().find(|t| t.id == id) {
                        item.transferred = true;
                    }
                }
                app.add_assignment(Assignment {
                    id: forward_core::new_id(),
                    class_id: class_id.to_string(),
                    title: todo.title,
                    due_date: todo
                        .due_date
                        .unwrap_or_else(|| chrono::Utc::now().date_naive()),
                    priority: todo.priority,
                    status: AssignmentStatus::Todo,
                });
                self.inner
                    .notifier
                    .notify(Notification::success("To-do added to assignments"));
            }
            Err(e) => {
                error!(record_id = %id, error = %e, "todo transfer failed");
                self.inner
                    .notifier
                    .notify(Notification::error("Failed to transfer to-do"));
            }
        }
    }

    /// Start reacting to change events on the extracted-todos table.
    ///
    /// Each event triggers exactly one refetch. A lagged receiver also
    /// refetches once, since canonical state covers whatever was missed.
    /// The returned guard aborts the watch task when dropped.
    pub fn watch(&self, feed: &ChangeFeed) -> WatchGuard {
        let mut rx = feed.subscribe();
        let hook = self.clone();
        info!(table = TODO_TABLE, "todo watch started");
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) if event.table == TODO_TABLE => {
                        debug!(kind = ?event.kind, "change event, refetching");
                        hook.refetch().await;
                    }
                    Ok(_) => {}
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                        debug!(missed, "change feed lagged, refetching");
                        hook.refetch().await;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        WatchGuard { handle }
    }
}

/// Cancels the watch task on drop so the subscription channel is not
/// leaked past the hook's lifetime.
pub struct WatchGuard {
    handle: JoinHandle<()>,
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        info!(table = TODO_TABLE, "todo watch stopped");
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockRemote, RecordingNotifier};
    use chrono::{Duration, Utc};
    use forward_core::{NotificationKind, Priority};

    fn todo(id: &str, age_mins: i64) -> ExtractedTodo {
        ExtractedTodo {
            id: id.to_string(),
            owner_id: "user-1".to_string(),
            note_id: "n1".to_string(),
            title: format!("todo {id}"),
            due_date: None,
            priority: Priority::Low,
            status: AssignmentStatus::Todo,
            transferred: false,
            created_at: Utc::now() - Duration::minutes(age_mins),
        }
    }

    fn hook(remote: &MockRemote, notifier: &RecordingNotifier) -> TodoList {
        TodoList::new(
            Arc::new(remote.clone()),
            Arc::new(notifier.clone()),
            Some("user-1".to_string()),
        )
    }

    #[tokio::test]
    async fn test_refetch_populates_newest_first() {
        let remote = MockRemote::new().with_todos(vec![todo("t1", 20), todo("t2", 5)]);
        let notifier = RecordingNotifier::new();
        let list = hook(&remote, &notifier);

        list.refetch().await;

        let items = list.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "t2");
        assert!(!list.is_loading());
        assert!(notifier.all().is_empty());
    }

    #[tokio::test]
    async fn test_refetch_failure_clears_pending_and_notifies() {
        let remote = MockRemote::new().with_failure_rate(1.0);
        let notifier = RecordingNotifier::new();
        let list = hook(&remote, &notifier);

        list.refetch().await;

        assert!(list.items().is_empty());
        assert!(!list.is_loading());
        let notes = notifier.take();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_unauthenticated_refetch_resets_without_notification() {
        let remote = MockRemote::new().with_todos(vec![todo("t1", 0)]);
        let notifier = RecordingNotifier::new();
        let list = TodoList::new(Arc::new(remote.clone()), Arc::new(notifier.clone()), None);

        list.refetch().await;

        assert!(list.items().is_empty());
        assert!(notifier.all().is_empty());
        // No remote call was made
        assert_eq!(remote.call_count("list_for_owner"), 0);
    }

    #[tokio::test]
    async fn test_update_status_patches_after_ack() {
        let remote = MockRemote::new().with_todos(vec![todo("t1", 0)]);
        let notifier = RecordingNotifier::new();
        let list = hook(&remote, &notifier);
        list.refetch().await;

        list.update_status("t1", AssignmentStatus::Completed).await;

        assert_eq!(list.items()[0].status, AssignmentStatus::Completed);
        assert!(notifier.all().is_empty());
    }

    #[tokio::test]
    async fn test_update_status_failure_leaves_local_unchanged() {
        let remote = MockRemote::new().with_todos(vec![todo("t1", 0)]);
        let notifier = RecordingNotifier::new();
        let list = hook(&remote, &notifier);
        list.refetch().await;

        // The remote knows no such id; the call fails and local state
        // stays as fetched.
        list.update_status("ghost", AssignmentStatus::Completed)
            .await;

        assert_eq!(list.items()[0].status, AssignmentStatus::Todo);
        assert_eq!(notifier.all().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_after_ack() {
        let remote = MockRemote::new().with_todos(vec![todo("t1", 0), todo("t2", 1)]);
        let notifier = RecordingNotifier::new();
        let list = hook(&remote, &notifier);
        list.refetch().await;

        list.delete("t1").await;

        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].id, "t2");
    }

    #[tokio::test]
    async fn test_transfer_appends_assignment() {
        let remote = MockRemote::new().with_todos(vec![todo("t1", 0)]);
        let notifier = RecordingNotifier::new();
        let list = hook(&remote, &notifier);
        list.refetch().await;
        let app = Store::new();

        list.transfer("t1", "class-9", &app).await;

        assert!(list.items()[0].transferred);
        app.with_state(|s| {
            assert_eq!(s.assignments.len(), 1);
            assert_eq!(s.assignments[0].class_id, "class-9");
            assert_eq!(s.assignments[0].title, "todo t1");
        });
        assert!(remote.todos_snapshot()[0].transferred);
    }
}
