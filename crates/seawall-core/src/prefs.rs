//! Small on-disk preference store.
//!
//! Display taste only: the theme and each character's accent color.
//! Read once at startup, written on change, and deliberately forgiving:
//! a missing or corrupt file yields the defaults instead of an error.

use crate::board::Mark;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default Rat accent
pub const DEFAULT_RAT_COLOR: &str = "#b87dc7";

/// Default Octopus accent
pub const DEFAULT_OCTOPUS_COLOR: &str = "#e85b9a";

/// Errors that can occur when persisting preferences
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Persisted display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub rat_color: String,
    pub octopus_color: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            rat_color: DEFAULT_RAT_COLOR.to_string(),
            octopus_color: DEFAULT_OCTOPUS_COLOR.to_string(),
        }
    }
}

impl Preferences {
    /// Load from `path`, falling back to defaults when the file is
    /// missing or unreadable as JSON.
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Write to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Accent color for a character
    pub fn accent_for(&self, mark: Mark) -> &str {
        match mark {
            Mark::Rat => &self.rat_color,
            Mark::Octopus => &self.octopus_color,
        }
    }

    /// Replace a character's accent color
    pub fn set_accent(&mut self, mark: Mark, color: String) {
        match mark {
            Mark::Rat => self.rat_color = color,
            Mark::Octopus => self.octopus_color = color,
        }
    }

    /// Flip between light and dark
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}
