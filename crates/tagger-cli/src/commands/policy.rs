//! Policy command implementation

use crate::cli::PolicyArgs;
use crate::error::Result;

use super::{Completion, load_policy};

/// Print the effective policy as TOML.
pub fn run_policy(args: &PolicyArgs) -> Result<Completion> {
    let policy = load_policy(args)?;
    print!("{}", policy.to_toml()?);
    Ok(Completion::Done)
}
