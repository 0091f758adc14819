//! # forward-core
//!
//! Core types, traits, and contracts for the Forward client.
//!
//! This crate provides the domain model, error taxonomy, change feed,
//! and remote-collaborator trait definitions that the other Forward
//! crates depend on.

pub mod defaults;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use events::{ChangeEvent, ChangeFeed, ChangeKind};
pub use models::*;
pub use traits::*;
