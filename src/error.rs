use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between loading the inputs and writing
/// the finished card.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("Failed to create PDF: {0}")]
    Pdf(String),

    #[error("Failed to load member record from {}: {reason}", .path.display())]
    MemberFile { path: PathBuf, reason: String },

    #[error("Failed to load preferences from {}: {reason}", .path.display())]
    PreferencesFile { path: PathBuf, reason: String },

    #[error("Failed to load translation catalog from {}: {reason}", .path.display())]
    CatalogFile { path: PathBuf, reason: String },

    #[error("Failed to load logo: {0}")]
    Logo(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
