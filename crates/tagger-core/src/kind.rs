//! Document kind dispatch by file name

use serde::Serialize;
use std::fmt;
use tagger_content::DialectKind;
use tagger_fs::NormalizedPath;

/// Template family a document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    CloudFormation,
    Terraform,
}

/// Supported document kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentKind {
    #[serde(rename = "cloudformation-yaml")]
    CloudFormationYaml,
    #[serde(rename = "cloudformation-json")]
    CloudFormationJson,
    #[serde(rename = "terraform")]
    Terraform,
    #[serde(rename = "terraform-json")]
    TerraformJson,
}

impl DocumentKind {
    /// Detect the kind from the file name, case-insensitively.
    ///
    /// `.tf.json` is checked before `.json`.
    pub fn detect(path: &NormalizedPath) -> Option<Self> {
        if path.has_suffix(".tf.json") {
            Some(Self::TerraformJson)
        } else if path.has_suffix(".tf") {
            Some(Self::Terraform)
        } else if path.has_suffix(".json") {
            Some(Self::CloudFormationJson)
        } else if path.has_suffix(".yaml") || path.has_suffix(".yml") {
            Some(Self::CloudFormationYaml)
        } else {
            None
        }
    }

    pub fn family(self) -> Family {
        match self {
            Self::CloudFormationYaml | Self::CloudFormationJson => Family::CloudFormation,
            Self::Terraform | Self::TerraformJson => Family::Terraform,
        }
    }

    /// Line-engine dialect, or `None` for the parsed `.tf.json` path.
    pub fn dialect(self) -> Option<DialectKind> {
        match self {
            Self::CloudFormationYaml => Some(DialectKind::Yaml),
            Self::CloudFormationJson => Some(DialectKind::Json),
            Self::Terraform => Some(DialectKind::Hcl),
            Self::TerraformJson => None,
        }
    }

    /// Short label used in status lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::CloudFormationYaml => "YAML",
            Self::CloudFormationJson => "JSON",
            Self::Terraform => "TF",
            Self::TerraformJson => "TF.JSON",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
