//! Centralized default constants for the Forward client.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their
//! own magic numbers.

// =============================================================================
// SYLLABUS EXTRACTION
// =============================================================================

/// Minimum cleaned length for a PDF `stream` region to be kept.
pub const STREAM_REGION_MIN_CHARS: usize = 50;

/// Minimum extracted text length below which the document is treated as
/// unreadable (image-scanned PDF) and the user is directed to manual entry.
pub const EXTRACTED_TEXT_FLOOR_CHARS: usize = 100;

/// Maximum characters of extracted text sent to the remote parse function.
pub const PARSE_TEXT_LIMIT_CHARS: usize = 30_000;

/// Maximum characters kept by the whole-document fallback path.
pub const FALLBACK_TEXT_LIMIT_CHARS: usize = 50_000;

// =============================================================================
// REMOTE TABLES
// =============================================================================

/// Remote table holding AI-extracted to-dos.
pub const TODO_TABLE: &str = "extracted_todos";

/// Remote table holding profile/storage metadata.
pub const PROFILE_TABLE: &str = "profiles";

// =============================================================================
// CHANGE FEED
// =============================================================================

/// Broadcast buffer capacity for the change feed.
///
/// Recommended: 256 for production, 32 for tests.
pub const CHANGE_FEED_CAPACITY: usize = 256;

// =============================================================================
// STATE STORE
// =============================================================================

/// Broadcast buffer capacity for store field-change notifications.
pub const STORE_NOTIFY_CAPACITY: usize = 64;

// =============================================================================
// REMOTE CLIENT
// =============================================================================

/// Request timeout for remote collaborator calls (seconds).
pub const REMOTE_TIMEOUT_SECS: u64 = 30;

/// Named remote function for AI syllabus parsing.
pub const PARSE_SYLLABUS_FN: &str = "parse-syllabus";

// =============================================================================
// ACCOUNT
// =============================================================================

/// Storage quota for the free plan (bytes).
pub const FREE_STORAGE_LIMIT_BYTES: u64 = 500 * 1024 * 1024;
