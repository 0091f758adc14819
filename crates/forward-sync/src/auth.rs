//! Auth gating for actions that require a signed-in user.
//!
//! Two routes are reachable unauthenticated; everything else goes
//! through [`AuthGate::require_auth`]: with a resolved session the
//! action runs immediately, without one the action is never invoked and
//! the sign-up prompt flag is raised for the view layer to render.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use tracing::info;

/// A resolved authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

/// Holds the current session and the sign-up prompt visibility flag.
pub struct AuthGate {
    session: RwLock<Option<Session>>,
    prompt_visible: AtomicBool,
}

impl AuthGate {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
            prompt_visible: AtomicBool::new(false),
        }
    }

    /// Install a resolved session and clear any pending prompt.
    pub fn set_session(&self, session: Session) {
        info!(user_id = %session.user_id, "session resolved");
        *self.session.write().expect("session lock poisoned") = Some(session);
        self.prompt_visible.store(false, Ordering::SeqCst);
    }

    /// Drop the session (sign-out). Dependent hook state is reset by the
    /// caller, not here.
    pub fn clear_session(&self) {
        info!("session cleared");
        *self.session.write().expect("session lock poisoned") = None;
    }

    /// Current session, if any.
    pub fn session(&self) -> Option<Session> {
        self.session.read().expect("session lock poisoned").clone()
    }

    /// Current user id, if signed in.
    pub fn user_id(&self) -> Option<String> {
        self.session().map(|s| s.user_id)
    }

    /// Run `action` immediately when a session is present; otherwise
    /// leave it uninvoked and raise the prompt flag. Returns whether the
    /// action ran.
    ///
    /// The session lock is released before `action` runs, so the action
    /// may call back into the gate (sign-out, token-refresh re-install).
    pub fn require_auth(&self, action: impl FnOnce(&Session)) -> bool {
        match self.session() {
            Some(session) => {
                action(&session);
                true
            }
            None => {
                self.prompt_visible.store(true, Ordering::SeqCst);
                false
            }
        }
    }

    /// Whether the sign-up prompt should be shown.
    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible.load(Ordering::SeqCst)
    }

    /// Dismiss the sign-up prompt.
    pub fn dismiss_prompt(&self) {
        self.prompt_visible.store(false, Ordering::SeqCst);
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}
