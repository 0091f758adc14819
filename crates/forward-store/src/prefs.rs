//! Local preferences — flat key-value settings kept outside the store.
//!
//! Two independent preferences survive restarts: the theme choice and
//! the preferred landing page. They are read once at startup and
//! written on change. A missing or unparseable file degrades to
//! defaults rather than failing startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use forward_core::Result;

/// Theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

/// Preferred landing page after sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandingPage {
    #[default]
    Dashboard,
    Calendar,
    Todos,
}

/// Persisted local preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub landing_page: LandingPage,
}

impl Preferences {
    /// Load preferences from `path`, falling back to defaults when the
    /// file is missing or unparseable.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&contents) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unparseable preferences file, using defaults");
                Self::default()
            }
        }
    }

    /// Write preferences to `path`, creating parent directories as needed.
    ///
    /// Writes a sibling temp file and renames it over `path`, so a crash
    /// mid-write leaves the previous file intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| forward_core::Error::Serialization(e.to_string()))?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("absent.toml"));
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_load_unparseable_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "theme = [not toml").unwrap();
        let prefs = Preferences::load(&path);
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");

        let prefs = Preferences {
            theme: Theme::Dark,
            landing_page: LandingPage::Calendar,
        };
        prefs.save(&path).unwrap();

        assert_eq!(Preferences::load(&path), prefs);
    }

    #[test]
    fn test_save_replaces_existing_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        Preferences::default().save(&path).unwrap();
        let updated = Preferences {
            theme: Theme::Light,
            landing_page: LandingPage::Todos,
        };
        updated.save(&path).unwrap();

        assert_eq!(Preferences::load(&path), updated);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "theme = \"light\"\n").unwrap();

        let prefs = Preferences::load(&path);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.landing_page, LandingPage::Dashboard);
    }
}
