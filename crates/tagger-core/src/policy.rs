//! Tagging policy: required tags, allow-lists and path exclusions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tagger_content::{RequiredTag, ResourceRules};
use tagger_fs::{ConfigStore, NormalizedPath};
use tracing::debug;

use crate::error::{Error, Result};
use crate::kind::{DocumentKind, Family};

/// Built-in policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// SSM-resolved placeholder values, no path exclusions
    #[default]
    Categorisation,
    /// Plain placeholders, replicated global tables, skips test paths
    Governance,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Categorisation, Preset::Governance];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Categorisation => "categorisation",
            Preset::Governance => "governance",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownPreset { name: s.to_string() })
    }
}

pub const CLASSIFICATION_KEY: &str = "data_classification";
pub const CATEGORY_KEY: &str = "data_category";

const CLOUDFORMATION_TYPES: [&str; 4] = [
    "AWS::S3::Bucket",
    "AWS::DynamoDB::Table",
    "AWS::RDS::DBInstance",
    "AWS::RDS::DBCluster",
];

const TERRAFORM_TYPES: [&str; 4] = ["aws_s3_bucket", "aws_dynamodb_table", "aws_db_instance", "aws_rds_cluster"];

/// Effective tagging policy
///
/// Fields missing from a policy file take their value from the
/// categorisation preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Lower-cased substrings; a file whose path contains one is skipped
    pub exclude_paths: Vec<String>,
    /// Tags to ensure, in insertion order
    pub tags: Vec<RequiredTag>,
    pub cloudformation: ResourceRules,
    pub terraform: ResourceRules,
}

impl Default for Policy {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl Policy {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Categorisation => Self {
                exclude_paths: Vec::new(),
                tags: vec![
                    RequiredTag::new(CLASSIFICATION_KEY, "{{resolve:ssm:/DataClassification/CHANGE_ME}}"),
                    RequiredTag::new(CATEGORY_KEY, "{{resolve:ssm:/DataCategory/CHANGE_ME}}"),
                ],
                cloudformation: ResourceRules::new(CLOUDFORMATION_TYPES),
                terraform: ResourceRules::new(TERRAFORM_TYPES),
            },
            Preset::Governance => Self {
                exclude_paths: vec!["test".to_string()],
                tags: vec![
                    RequiredTag::new(CLASSIFICATION_KEY, "CHANGE_ME"),
                    RequiredTag::new(CATEGORY_KEY, "CHANGE_ME"),
                ],
                cloudformation: ResourceRules::new(CLOUDFORMATION_TYPES)
                    .with_replicated(["AWS::DynamoDB::GlobalTable"]),
                terraform: ResourceRules::new(TERRAFORM_TYPES),
            },
        }
    }

    /// Load and validate a policy file (TOML, JSON or YAML by extension).
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let policy: Policy = ConfigStore::new().load(path)?;
        policy.validate()?;
        debug!(path = %path, tags = policy.tags.len(), "loaded policy file");
        Ok(policy)
    }

    /// A policy file when given, the preset otherwise.
    pub fn resolve(preset: Preset, file: Option<&NormalizedPath>) -> Result<Self> {
        match file {
            Some(path) => Self::load(path),
            None => Ok(Self::preset(preset)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tags.is_empty() {
            return Err(Error::InvalidPolicy {
                message: "at least one tag is required".into(),
            });
        }
        let mut seen = HashSet::new();
        for tag in &self.tags {
            if tag.key.trim().is_empty() {
                return Err(Error::InvalidPolicy {
                    message: "tag keys must not be empty".into(),
                });
            }
            if !seen.insert(tag.key.as_str()) {
                return Err(Error::InvalidPolicy {
                    message: format!("duplicate tag key '{}'", tag.key),
                });
            }
        }
        Ok(())
    }

    pub fn rules_for(&self, kind: DocumentKind) -> &ResourceRules {
        match kind.family() {
            Family::CloudFormation => &self.cloudformation,
            Family::Terraform => &self.terraform,
        }
    }

    /// The exclusion substring matching `path`, if any.
    pub fn excluded_by(&self, path: &NormalizedPath) -> Option<&str> {
        self.exclude_paths
            .iter()
            .map(String::as_str)
            .filter(|needle| !needle.is_empty())
            .find(|needle| path.contains_ignore_case(needle))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(ConfigStore::new().render_toml(self)?)
    }
}
