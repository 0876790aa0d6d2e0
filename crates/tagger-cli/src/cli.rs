//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tagger_core::Preset;

/// Tagger - add required data-governance tags to infrastructure templates
#[derive(Parser, Debug)]
#[command(name = "tagger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add missing tags to the given templates
    ///
    /// Supported files: .yaml/.yml and .json (CloudFormation),
    /// .tf and .tf.json (Terraform). Other files are reported and skipped.
    ///
    /// Examples:
    ///   tagger patch stacks/*.yaml
    ///   tagger patch --dry-run main.tf
    ///   tagger patch --preset governance --json infra/*.json
    Patch {
        /// Template files to patch
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Show a diff instead of writing files
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Exit with status 1 if any template is missing tags
    Check {
        /// Template files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Output the report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the effective policy as TOML
    Policy {
        #[command(flatten)]
        policy: PolicyArgs,
    },
}

/// Policy selection shared by all commands
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PolicyArgs {
    /// Built-in policy to apply
    #[arg(long, value_enum, default_value_t = PresetArg::Categorisation)]
    pub preset: PresetArg,

    /// Policy file (TOML, JSON or YAML); overrides --preset
    #[arg(long, env = "TAGGER_POLICY")]
    pub policy: Option<PathBuf>,
}

/// Built-in policy names
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetArg {
    Categorisation,
    Governance,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Categorisation => Preset::Categorisation,
            PresetArg::Governance => Preset::Governance,
        }
    }
}
