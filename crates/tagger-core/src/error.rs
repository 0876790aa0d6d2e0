//! Error types for tagger-core

/// Result type for tagger-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tagger-core operations
///
/// Per-file problems never show up here; they become [`crate::Outcome`]s.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Policy loaded but failed validation
    #[error("Invalid policy: {message}")]
    InvalidPolicy { message: String },

    /// Unknown preset name
    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },

    /// Filesystem error from tagger-fs
    #[error(transparent)]
    Fs(#[from] tagger_fs::Error),

    /// Engine error from tagger-content
    #[error(transparent)]
    Content(#[from] tagger_content::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
