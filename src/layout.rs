//! Serializable key layout profiles.
//!
//! A [`LayoutProfile`] maps unified key numbers to named actions so that a
//! deck's layout can live in a TOML or JSON file next to the firmware
//! config instead of in code. Profiles know nothing about scanning; they
//! are resolved against the [`PadEvent`]s the queue delivers.
//!
//! # Examples
//! ```
//! use padmux::{LayoutProfile, PadEvent};
//!
//! let profile = LayoutProfile::from_toml(
//!     r#"
//! name = "stream deck"
//!
//! [[bindings]]
//! key_number = 3
//! action = "scene:gameplay"
//! "#,
//! )
//! .unwrap();
//!
//! let press = PadEvent {
//!     key_number: 3,
//!     pressed: true,
//!     ..Default::default()
//! };
//! assert_eq!(profile.resolve(&press), Some("scene:gameplay"));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::PadEvent;

/// Errors from loading, saving or validating a [`LayoutProfile`].
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("key {key_number} is out of range for a {key_count}-key setup")]
    KeyOutOfRange { key_number: u16, key_count: u16 },
    #[error("failed to read or write profile: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML profile: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("could not serialize profile to TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("invalid JSON profile: {0}")]
    Json(#[from] serde_json::Error),
}

/// Maps one key to a named action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key number in the delivered (unified) namespace.
    pub key_number: u16,
    /// Free-form action name interpreted by the application.
    pub action: String,
    /// Fire on the release edge instead of the press edge.
    #[serde(default)]
    pub on_release: bool,
}

/// Serializable profile of key bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutProfile {
    pub name: String,
    pub description: Option<String>,
    pub bindings: Vec<KeyBinding>,
}

impl LayoutProfile {
    /// An empty profile with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            bindings: Vec::new(),
        }
    }

    /// Parses a profile from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(text)?)
    }

    /// Renders the profile as TOML text.
    pub fn to_toml(&self) -> Result<String, ProfileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parses a profile from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Renders the profile as JSON text.
    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a profile from a file, picking the format by extension:
    /// `.json` is JSON, everything else is TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        if has_json_extension(path) {
            Self::from_json(&text)
        } else {
            Self::from_toml(&text)
        }
    }

    /// Saves the profile to a file, picking the format by extension like
    /// [`load`](Self::load).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProfileError> {
        let path = path.as_ref();
        let text = if has_json_extension(path) {
            self.to_json()?
        } else {
            self.to_toml()?
        };
        fs::write(path, text)?;
        Ok(())
    }

    /// Checks every binding against the deck's total key count.
    ///
    /// Errors on the first binding whose key number does not exist.
    pub fn validate(&self, key_count: u16) -> Result<(), ProfileError> {
        for binding in &self.bindings {
            if binding.key_number >= key_count {
                return Err(ProfileError::KeyOutOfRange {
                    key_number: binding.key_number,
                    key_count,
                });
            }
        }
        Ok(())
    }

    /// Looks up the action bound to `event`, matching both the key number
    /// and the edge (press or release). First matching binding wins.
    pub fn resolve(&self, event: &PadEvent) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| {
                binding.key_number == event.key_number && binding.on_release == event.released()
            })
            .map(|binding| binding.action.as_str())
    }
}

fn has_json_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
