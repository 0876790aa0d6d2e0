//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path with a forward-slash rendering for matching and display.
///
/// The native path given by the caller is kept verbatim for I/O, so file
/// names containing backslashes on Unix are never rewritten. Matching
/// (extensions, exclusion substrings) uses the normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
    native: PathBuf,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let native = path.as_ref().to_path_buf();
        let inner = native.to_string_lossy().replace('\\', "/");
        Self { inner, native }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// The path as the caller supplied it, for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        self.native.clone()
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Case-insensitive check of the file name suffix (e.g. `.tf.json`).
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.file_name()
            .is_some_and(|name| name.to_lowercase().ends_with(&suffix.to_lowercase()))
    }

    /// Case-insensitive substring search over the whole normalized path.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.inner.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        &self.native
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
