use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CardError;

/// Translation catalog mapping source strings to translated ones.
///
/// The host resolves its strings through gettext domains; a flat JSON map
/// stands in here. Lookups fall back to the source string, so rendering
/// with an empty catalog produces the untranslated card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn from_path(path: &Path) -> Result<Self, CardError> {
        let content = fs::read_to_string(path).map_err(|e| CardError::CatalogFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| CardError::CatalogFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Translation of `msgid`, or `msgid` itself when the catalog has none.
    pub fn tr<'a>(&'a self, msgid: &'a str) -> &'a str {
        self.entries.get(msgid).map(String::as_str).unwrap_or(msgid)
    }
}
