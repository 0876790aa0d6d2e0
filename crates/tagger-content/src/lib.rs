//! Format-preserving tag injection for infrastructure templates
//!
//! The engine works on lines, not syntax trees. It finds resource bodies
//! by indentation or delimiter depth, resolves each body's declared type,
//! and inserts the required tag entries that are missing, leaving every
//! other line byte-identical.
//!
//! Three dialects share one engine:
//!
//! - [`dialect::YamlDialect`]: indentation-structured CloudFormation YAML
//! - [`dialect::JsonDialect`]: bracket-delimited CloudFormation JSON
//! - [`dialect::HclDialect`]: brace-delimited Terraform configuration
//!
//! Terraform JSON (`.tf.json`) goes through [`parsed`] instead, which
//! edits a parsed `serde_json` value.

pub mod diff;
pub mod dialect;
pub mod document;
pub mod engine;
pub mod error;
pub mod parsed;
pub mod rules;
pub mod scanner;

mod collection;
mod replicas;
mod resolve;

pub use dialect::{Dialect, DialectKind, HclDialect, JsonDialect, YamlDialect};
pub use document::{Document, LineEnding};
pub use engine::{Engine, PatchStats, TextOutcome};
pub use error::{Error, Result};
pub use rules::{Eligibility, RequiredTag, ResourceRules};
