//! Remote collaborator configuration.
//!
//! Loaded from `FORWARD_*` environment variables, optionally seeded
//! from a `.env` file.

use forward_core::defaults::REMOTE_TIMEOUT_SECS;
use forward_core::{Error, Result};

/// Connection settings for the managed backend.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the remote collaborator (rest/storage/functions root).
    pub base_url: String,
    /// Anonymous API key sent with every request.
    pub anon_key: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Create a config with the default timeout.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            timeout_secs: REMOTE_TIMEOUT_SECS,
        }
    }

    /// Load from environment variables.
    ///
    /// - `FORWARD_REMOTE_URL` (required)
    /// - `FORWARD_REMOTE_KEY` (required)
    /// - `FORWARD_REMOTE_TIMEOUT_SECS` (optional)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("FORWARD_REMOTE_URL")
            .map_err(|_| Error::Config("missing FORWARD_REMOTE_URL".to_string()))?;
        let anon_key = std::env::var("FORWARD_REMOTE_KEY")
            .map_err(|_| Error::Config("missing FORWARD_REMOTE_KEY".to_string()))?;
        let timeout_secs = std::env::var("FORWARD_REMOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(REMOTE_TIMEOUT_SECS);

        let config = Self {
            base_url,
            anon_key,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a `.env` file into the process environment, then read the
    /// config from it. Existing environment variables win over the
    /// file's values.
    pub fn from_env_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        dotenvy::from_path(path.as_ref())
            .map_err(|e| Error::Config(format!("failed to load env file: {e}")))?;
        Self::from_env()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url cannot be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        if self.anon_key.is_empty() {
            return Err(Error::Config("anon_key cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn trimmed_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_timeout() {
        let config = RemoteConfig::new("https://remote.example", "anon");
        assert_eq!(config.timeout_secs, REMOTE_TIMEOUT_SECS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = RemoteConfig::new("ftp://remote.example", "anon");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let config = RemoteConfig::new("https://remote.example", "");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_trimmed_base() {
        let config = RemoteConfig::new("https://remote.example/", "anon");
        assert_eq!(config.trimmed_base(), "https://remote.example");
    }

    #[test]
    fn test_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");
        std::fs::write(
            &env_path,
            "FORWARD_REMOTE_URL=https://remote.example\nFORWARD_REMOTE_KEY=file-key\n",
        )
        .unwrap();

        let config = RemoteConfig::from_env_file(&env_path).unwrap();
        assert_eq!(config.base_url, "https://remote.example");
        assert_eq!(config.anon_key, "file-key");
    }
}
