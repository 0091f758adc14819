//! Account info hook.
//!
//! Fetches the signed-in user's subscription plan and storage usage
//! from the remote profiles table. Follows the shared hook contract:
//! default data while loading, prior data kept plus a notification on
//! failure, and a silent reset to defaults when unauthenticated.

use std::sync::{Arc, Mutex};

use tracing::{debug, error};

use forward_core::{Notification, Notifier, Profile, ProfileStore};

/// Loading/data pair exposed to views.
#[derive(Debug, Clone, Default)]
pub struct AccountState {
    pub profile: Profile,
    pub is_loading: bool,
}

/// The account info hook.
pub struct AccountInfo {
    remote: Arc<dyn ProfileStore>,
    notifier: Arc<dyn Notifier>,
    owner_id: Option<String>,
    state: Mutex<AccountState>,
}

impl AccountInfo {
    pub fn new(
        remote: Arc<dyn ProfileStore>,
        notifier: Arc<dyn Notifier>,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            remote,
            notifier,
            owner_id,
            state: Mutex::new(AccountState::default()),
        }
    }

    pub fn profile(&self) -> Profile {
        self.state.lock().expect("state lock poisoned").profile.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().expect("state lock poisoned").is_loading
    }

    /// Fraction of the storage quota in use, 0.0–1.0.
    pub fn storage_fraction(&self) -> f64 {
        let profile = self.profile();
        if profile.storage_limit_bytes == 0 {
            return 0.0;
        }
        (profile.storage_used_bytes as f64 / profile.storage_limit_bytes as f64).min(1.0)
    }

    /// Load the profile record for the current owner.
    pub async fn load(&self) {
        let Some(owner_id) = self.owner_id.clone() else {
            *self.state.lock().expect("state lock poisoned") = AccountState::default();
            return;
        };

        self.state.lock().expect("state lock poisoned").is_loading = true;

        match self.remote.fetch(&owner_id).await {
            Ok(profile) => {
                debug!(owner_id = %owner_id, plan = %profile.plan, "account info loaded");
                let mut state = self.state.lock().expect("state lock poisoned");
                state.profile = profile;
                state.is_loading = false;
            }
            Err(e) => {
                error!(owner_id = %owner_id, error = %e, "account info load failed");
                self.notifier
                    .notify(Notification::error("Failed to load account info"));
                self.state.lock().expect("state lock poisoned").is_loading = false;
            }
        }
    }
}
