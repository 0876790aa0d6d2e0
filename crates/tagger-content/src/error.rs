//! Error types for tagger-content

/// Result type for tagger-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tagger-content operations
///
/// The line engine never fails: structures it cannot follow are copied
/// through. Only the parsed `.tf.json` path reports errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }
}
