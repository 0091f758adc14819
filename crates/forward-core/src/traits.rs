//! Remote-collaborator traits for the Forward client.
//!
//! The managed backend (auth, row storage, file storage, realtime
//! notifications, serverless functions) is treated as an opaque
//! collaborator. These traits define the slice of it the client uses,
//! enabling a REST implementation in production and a mock in tests.
//!
//! Every row-level operation is scoped to the authenticated owner; the
//! remote system enforces that scoping, not the client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::*;

// =============================================================================
// TO-DO STORE
// =============================================================================

/// Row access for AI-extracted to-dos.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// List the owner's to-dos, ordered by creation time descending.
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ExtractedTodo>>;

    /// Update the status of one to-do.
    async fn update_status(&self, id: &str, status: AssignmentStatus) -> Result<()>;

    /// Flag a to-do as transferred into an Assignment.
    async fn mark_transferred(&self, id: &str) -> Result<()>;

    /// Delete a to-do. Deletion is remote-only; local state reflects it
    /// via refetch.
    async fn delete(&self, id: &str) -> Result<()>;
}

// =============================================================================
// PROFILE STORE
// =============================================================================

/// Row access for profile/storage metadata.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the owner's profile record.
    async fn fetch(&self, owner_id: &str) -> Result<Profile>;
}

// =============================================================================
// BLOB STORE
// =============================================================================

/// File storage upload/public-URL pair keyed by path.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a blob to the given storage path.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Public URL for a stored blob.
    fn public_url(&self, path: &str) -> String;
}

// =============================================================================
// SYLLABUS PARSER (remote function)
// =============================================================================

/// Payload for the remote AI syllabus-parsing function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseSyllabusRequest {
    /// Extracted plain text, already truncated by the caller.
    pub text: String,
    pub file_name: String,
}

/// Class details recovered from a syllabus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSyllabus {
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
    /// Dated items (exams, deadlines) found in the syllabus.
    #[serde(default)]
    pub events: Vec<ParsedSyllabusEvent>,
}

/// One dated item recovered from a syllabus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSyllabusEvent {
    pub title: String,
    pub date: chrono::NaiveDate,
    pub event_type: EventType,
}

/// Response envelope of the remote parse function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseSyllabusResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ParsedSyllabus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Named remote procedure invocation for AI syllabus parsing.
#[async_trait]
pub trait SyllabusParser: Send + Sync {
    async fn parse(&self, req: ParseSyllabusRequest) -> Result<ParseSyllabusResponse>;
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A user-visible notification (toast). Raised by hooks on remote-call
/// failure; never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// No-op notifier for when notifications aren't needed.
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _notification: Notification) {}
}
