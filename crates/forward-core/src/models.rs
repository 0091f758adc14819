//! Domain model for the Forward client.
//!
//! Entities are plain records with opaque string ids assigned at
//! creation (client-minted via [`new_id`] or assigned by the remote
//! collaborator) and never reused. Embedded collections
//! ([`Class::schedule`], [`Event::notes`]) are owned by their parent —
//! there is no shared mutable aliasing between records.
//!
//! Every entity carries an all-`Option` patch type whose `apply_to`
//! shallow-merges present fields onto an existing record; absent fields
//! are left untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mint a fresh opaque id for client-created records.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// CLASSES
// =============================================================================

/// One weekly meeting of a class. Times are wall-clock `"HH:MM"` strings;
/// `day` is 0–6 with 0 = Sunday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: u8,
    pub start_time: String,
    pub end_time: String,
}

/// A course the student is enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub code: String,
    pub color: String,
    pub instructor: String,
    pub location: String,
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
}

/// Partial update for a [`Class`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub color: Option<String>,
    pub instructor: Option<String>,
    pub location: Option<String>,
    pub schedule: Option<Vec<ScheduleSlot>>,
}

impl ClassPatch {
    /// Shallow-merge present fields onto `class`.
    pub fn apply_to(&self, class: &mut Class) {
        if let Some(name) = &self.name {
            class.name = name.clone();
        }
        if let Some(code) = &self.code {
            class.code = code.clone();
        }
        if let Some(color) = &self.color {
            class.color = color.clone();
        }
        if let Some(instructor) = &self.instructor {
            class.instructor = instructor.clone();
        }
        if let Some(location) = &self.location {
            class.location = location.clone();
        }
        if let Some(schedule) = &self.schedule {
            class.schedule = schedule.clone();
        }
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Kind of calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Lecture,
    Lab,
    Exam,
    OfficeHours,
    StudySession,
}

/// A dated calendar entry belonging to a class. Notes taken during the
/// event are embedded, owned by the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub class_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub event_type: EventType,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// Partial update for an [`Event`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub class_id: Option<String>,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub event_type: Option<EventType>,
    pub notes: Option<Vec<Note>>,
}

impl EventPatch {
    /// Shallow-merge present fields onto `event`.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(class_id) = &self.class_id {
            event.class_id = class_id.clone();
        }
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(start_time) = &self.start_time {
            event.start_time = start_time.clone();
        }
        if let Some(end_time) = &self.end_time {
            event.end_time = end_time.clone();
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(notes) = &self.notes {
            event.notes = notes.clone();
        }
    }
}

// =============================================================================
// NOTES
// =============================================================================

/// Kind of note content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Text,
    Audio,
    File,
}

/// A note attached to an event/class, with optional audio artifacts and
/// AI-derived topic/keyword tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub event_id: String,
    pub class_id: String,
    pub owner_id: String,
    pub note_type: NoteType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a [`Note`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotePatch {
    pub content: Option<String>,
    pub audio_url: Option<String>,
    pub transcription: Option<String>,
    pub topics: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
}

impl NotePatch {
    /// Shallow-merge present fields onto `note`.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(audio_url) = &self.audio_url {
            note.audio_url = Some(audio_url.clone());
        }
        if let Some(transcription) = &self.transcription {
            note.transcription = Some(transcription.clone());
        }
        if let Some(topics) = &self.topics {
            note.topics = topics.clone();
        }
        if let Some(keywords) = &self.keywords {
            note.keywords = keywords.clone();
        }
    }
}

// =============================================================================
// ASSIGNMENTS
// =============================================================================

/// Assignment priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Assignment completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Todo,
    InProgress,
    Completed,
}

/// A manually created piece of coursework with a due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub class_id: String,
    pub title: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: AssignmentStatus,
}

/// Partial update for an [`Assignment`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentPatch {
    pub class_id: Option<String>,
    pub title: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<AssignmentStatus>,
}

impl AssignmentPatch {
    /// Shallow-merge present fields onto `assignment`.
    pub fn apply_to(&self, assignment: &mut Assignment) {
        if let Some(class_id) = &self.class_id {
            assignment.class_id = class_id.clone();
        }
        if let Some(title) = &self.title {
            assignment.title = title.clone();
        }
        if let Some(due_date) = self.due_date {
            assignment.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            assignment.priority = priority;
        }
        if let Some(status) = self.status {
            assignment.status = status;
        }
    }
}

// =============================================================================
// EXTRACTED TO-DOS
// =============================================================================

/// A task record produced by AI parsing of a recorded note, distinct
/// from a manually created [`Assignment`]. Lives in the remote
/// collaborator; `transferred` flags whether it has been turned into an
/// Assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTodo {
    pub id: String,
    pub owner_id: String,
    pub note_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: AssignmentStatus,
    pub transferred: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SEARCH FILTERS
// =============================================================================

/// UI-only query object for the search panel. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub query: String,
    pub class_ids: Vec<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub note_types: Vec<NoteType>,
    pub topics: Vec<String>,
}

/// Shallow-merge patch for [`SearchFilters`]. An empty patch is a no-op;
/// `date_range: Some(None)` clears the range.
#[derive(Debug, Clone, Default)]
pub struct SearchFilterPatch {
    pub query: Option<String>,
    pub class_ids: Option<Vec<String>>,
    pub date_range: Option<Option<(NaiveDate, NaiveDate)>>,
    pub note_types: Option<Vec<NoteType>>,
    pub topics: Option<Vec<String>>,
}

impl SearchFilterPatch {
    /// Shallow-merge present fields onto `filters`.
    pub fn apply_to(&self, filters: &mut SearchFilters) {
        if let Some(query) = &self.query {
            filters.query = query.clone();
        }
        if let Some(class_ids) = &self.class_ids {
            filters.class_ids = class_ids.clone();
        }
        if let Some(date_range) = self.date_range {
            filters.date_range = date_range;
        }
        if let Some(note_types) = &self.note_types {
            filters.note_types = note_types.clone();
        }
        if let Some(topics) = &self.topics {
            filters.topics = topics.clone();
        }
    }
}

// =============================================================================
// CALENDAR
// =============================================================================

/// Calendar view granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
}

// =============================================================================
// ACCOUNT / PROFILE
// =============================================================================

/// Subscription and storage metadata for the signed-in user, as stored
/// in the remote profiles table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub owner_id: String,
    pub plan: String,
    pub storage_used_bytes: u64,
    pub storage_limit_bytes: u64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            owner_id: String::new(),
            plan: "free".to_string(),
            storage_used_bytes: 0,
            storage_limit_bytes: crate::defaults::FREE_STORAGE_LIMIT_BYTES,
        }
    }
}
