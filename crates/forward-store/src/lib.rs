//! # forward-store
//!
//! The application state store and flat local preferences for the
//! Forward client. The store is the single source of truth for
//! in-memory domain collections and transient UI state; preferences
//! (theme, landing page) live outside it in a small TOML file.

pub mod prefs;
pub mod state;

pub use prefs::{LandingPage, Preferences, Theme};
pub use state::{AppState, CalendarState, StateField, Store, UiState};
