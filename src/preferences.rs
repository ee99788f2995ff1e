use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CardError;

/// Association-wide settings the host injects into every document.
#[derive(Debug, Clone, Deserialize)]
pub struct Preferences {
    /// Display name of the association.
    pub name: String,
    /// Postal address block, one component per line.
    #[serde(default)]
    pub postal_address: String,
}

impl Preferences {
    pub fn from_path(path: &Path) -> Result<Self, CardError> {
        let content = fs::read_to_string(path).map_err(|e| CardError::PreferencesFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| CardError::PreferencesFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
