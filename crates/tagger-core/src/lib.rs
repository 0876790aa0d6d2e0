//! Policy model and batch runner for the compliance tag injector
//!
//! `tagger-core` sits between the CLI and the lower crates:
//!
//! ```text
//!          tagger-cli
//!              |
//!         tagger-core
//!          /        \
//!   tagger-fs    tagger-content
//! ```
//!
//! - **Policy**: required tags, per-family allow-lists and path exclusions,
//!   from a built-in [`Preset`] or a policy file
//! - **Dispatch**: [`DocumentKind`] picks the engine from the file name
//! - **Runner**: processes files one at a time and never aborts a batch;
//!   every file ends up with a [`FileReport`]

pub mod error;
pub mod kind;
pub mod policy;
pub mod report;
pub mod runner;

pub use error::{Error, Result};
pub use kind::{DocumentKind, Family};
pub use policy::{Policy, Preset};
pub use report::{BatchReport, FileReport, Outcome};
pub use runner::{RunMode, Runner};
