//! Filesystem access for the compliance tagger
//!
//! Provides path normalization, UTF-8 reads, atomic locked writes and
//! format-agnostic policy loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
