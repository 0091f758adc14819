//! # forward-sync
//!
//! Remote-backed feature hooks for the Forward client.
//!
//! Each hook pairs remote data access with local reactive state and
//! follows one contract: a pending flag while a fetch is in flight,
//! results stored on success, prior data left untouched plus a
//! user-facing notification on failure. Mutations patch local state
//! only after the remote acknowledges them, so no rollback machinery
//! exists. The to-do hook additionally consumes the realtime change
//! feed, reacting to every event with a full refetch.

pub mod account;
pub mod auth;
pub mod config;
pub mod extract;
pub mod mock;
pub mod rest;
pub mod syllabus;
pub mod todos;

pub use account::{AccountInfo, AccountState};
pub use auth::{AuthGate, Session};
pub use config::RemoteConfig;
pub use extract::{clip_for_parse, extract_syllabus_text};
pub use mock::{MockRemote, RecordingNotifier};
pub use rest::RestRemote;
pub use syllabus::SyllabusUpload;
pub use todos::{TodoList, TodoListState, WatchGuard};
