//! Structured logging field name constants for the Forward client.
//!
//! All crates use these constants for consistent structured logging
//! fields, so log queries work across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Remote call failed and a user-facing notification was raised |
//! | WARN  | Recoverable issue, fallback applied (e.g. extraction fallback) |
//! | INFO  | Lifecycle events (session changes, watch start/stop) |
//! | DEBUG | Decision points, fetch completions, config choices |
//! | TRACE | Per-record iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "store", "sync", "extract", "rest"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "todo_list", "account_info", "syllabus_upload", "change_feed"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "refetch", "update_status", "parse_syllabus", "upload"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Owner (authenticated user) id scoping a remote call.
pub const OWNER_ID: &str = "owner_id";

/// Record id being operated on.
pub const RECORD_ID: &str = "record_id";

/// Remote table affected.
pub const TABLE: &str = "table";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of records returned by a fetch.
pub const RESULT_COUNT: &str = "result_count";

/// Byte length of an uploaded or extracted payload.
pub const PAYLOAD_LEN: &str = "payload_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
