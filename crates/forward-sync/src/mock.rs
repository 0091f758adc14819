//! Mock remote collaborator for deterministic testing.
//!
//! Implements every remote trait against in-memory tables, with a call
//! log for assertions and configurable latency/failure injection. When
//! wired to a [`ChangeFeed`], mutations emit the same change events the
//! real remote system would push.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use forward_core::defaults::TODO_TABLE;
use forward_core::{
    AssignmentStatus, BlobStore, ChangeEvent, ChangeFeed, ChangeKind, Error, ExtractedTodo,
    Notification, Notifier, ParseSyllabusRequest, ParseSyllabusResponse, ParsedSyllabus, Profile,
    ProfileStore, Result, SyllabusParser, TodoStore,
};

/// One recorded call against the mock remote.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
    /// Size of the call's payload (text chars, blob bytes), when the
    /// operation carries one.
    pub payload_len: Option<usize>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    latency_ms: u64,
    failure_rate: f64,
    parse_response: ParseSyllabusResponse,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            failure_rate: 0.0,
            parse_response: ParseSyllabusResponse {
                success: true,
                data: Some(ParsedSyllabus::default()),
                error: None,
            },
        }
    }
}

/// Mock remote collaborator.
#[derive(Clone)]
pub struct MockRemote {
    config: Arc<MockConfig>,
    todos: Arc<Mutex<Vec<ExtractedTodo>>>,
    profiles: Arc<Mutex<HashMap<String, Profile>>>,
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    feed: Option<Arc<ChangeFeed>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockRemote {
    /// Create a new mock remote with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            todos: Arc::new(Mutex::new(Vec::new())),
            profiles: Arc::new(Mutex::new(HashMap::new())),
            blobs: Arc::new(Mutex::new(HashMap::new())),
            feed: None,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed the extracted-todos table.
    pub fn with_todos(self, todos: Vec<ExtractedTodo>) -> Self {
        *self.todos.lock().unwrap() = todos;
        self
    }

    /// Seed a profile record.
    pub fn with_profile(self, profile: Profile) -> Self {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.owner_id.clone(), profile);
        self
    }

    /// Set the canned response of the parse function.
    pub fn with_parse_response(mut self, response: ParseSyllabusResponse) -> Self {
        Arc::make_mut(&mut self.config).parse_response = response;
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Set failure rate (0.0 - 1.0) for testing error handling.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        Arc::make_mut(&mut self.config).failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Emit change events on `feed` after each mutation, mimicking the
    /// remote push channel.
    pub fn with_change_feed(mut self, feed: Arc<ChangeFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of logged calls for one operation name.
    pub fn call_count(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    /// Current contents of the todos table (test inspection).
    pub fn todos_snapshot(&self) -> Vec<ExtractedTodo> {
        self.todos.lock().unwrap().clone()
    }

    /// Whether a blob exists at `path` (test inspection).
    pub fn has_blob(&self, path: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(path)
    }

    fn log_call(&self, operation: &str, input: &str, payload_len: Option<usize>) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
            payload_len,
        });
    }

    fn should_fail(&self) -> bool {
        use rand::Rng;
        self.config.failure_rate > 0.0
            && rand::thread_rng().gen::<f64>() < self.config.failure_rate
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    async fn begin(&self, operation: &str, input: &str) -> Result<()> {
        self.begin_with_len(operation, input, None).await
    }

    async fn begin_with_len(
        &self,
        operation: &str,
        input: &str,
        payload_len: Option<usize>,
    ) -> Result<()> {
        self.log_call(operation, input, payload_len);
        self.simulate_latency().await;
        if self.should_fail() {
            return Err(Error::Request("simulated failure".to_string()));
        }
        Ok(())
    }

    fn emit_change(&self, kind: ChangeKind, record_id: Option<String>) {
        if let Some(feed) = &self.feed {
            feed.emit(ChangeEvent {
                table: TODO_TABLE.to_string(),
                kind,
                record_id,
            });
        }
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MockRemote {
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ExtractedTodo>> {
        self.begin("list_for_owner", owner_id).await?;
        let mut todos: Vec<ExtractedTodo> = self
            .todos
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(todos)
    }

    async fn update_status(&self, id: &str, status: AssignmentStatus) -> Result<()> {
        self.begin("update_status", id).await?;
        let mut todos = self.todos.lock().unwrap();
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("todo {id}")))?;
        todo.status = status;
        drop(todos);
        self.emit_change(ChangeKind::Update, Some(id.to_string()));
        Ok(())
    }

    async fn mark_transferred(&self, id: &str) -> Result<()> {
        self.begin("mark_transferred", id).await?;
        let mut todos = self.todos.lock().unwrap();
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("todo {id}")))?;
        todo.transferred = true;
        drop(todos);
        self.emit_change(ChangeKind::Update, Some(id.to_string()));
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.begin("delete", id).await?;
        self.todos.lock().unwrap().retain(|t| t.id != id);
        self.emit_change(ChangeKind::Delete, Some(id.to_string()));
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MockRemote {
    async fn fetch(&self, owner_id: &str) -> Result<Profile> {
        self.begin("fetch_profile", owner_id).await?;
        self.profiles
            .lock()
            .unwrap()
            .get(owner_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("profile {owner_id}")))
    }
}

#[async_trait]
impl BlobStore for MockRemote {
    async fn upload(&self, path: &str, bytes: Vec<u8>, _content_type: &str) -> Result<()> {
        self.begin_with_len("upload", path, Some(bytes.len())).await?;
        self.blobs.lock().unwrap().insert(path.to_string(), bytes);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("mock://storage/{path}")
    }
}

#[async_trait]
impl SyllabusParser for MockRemote {
    async fn parse(&self, req: ParseSyllabusRequest) -> Result<ParseSyllabusResponse> {
        self.begin_with_len("parse", &req.file_name, Some(req.text.chars().count()))
            .await?;
        Ok(self.config.parse_response.clone())
    }
}

/// Notifier that records notifications for test assertions.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications raised so far.
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    /// Drain recorded notifications.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications.lock().unwrap())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}
