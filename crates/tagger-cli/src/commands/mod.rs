//! Command implementations for tagger-cli

pub mod patch;
pub mod policy;

pub use patch::{run_check, run_patch};
pub use policy::run_policy;

use tagger_core::{Policy, Preset};
use tagger_fs::NormalizedPath;

use crate::cli::PolicyArgs;
use crate::error::Result;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Done,
    /// `check` found files that still need tags
    ChangesPending,
}

/// Resolve the effective policy from `--preset` / `--policy`.
pub fn load_policy(args: &PolicyArgs) -> Result<Policy> {
    let file = args.policy.as_ref().map(NormalizedPath::new);
    Ok(Policy::resolve(Preset::from(args.preset), file.as_ref())?)
}
