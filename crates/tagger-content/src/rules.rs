//! Required tags and resource eligibility rules

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A tag every eligible resource must carry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequiredTag {
    pub key: String,
    pub value: String,
}

impl RequiredTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// How a resource type is treated by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Not on the allow-list, or the type could not be resolved
    Ineligible,
    /// Tags live directly in the resource body
    Direct,
    /// Tags live in every element of the resource's replicas list
    Replicated,
}

impl Eligibility {
    pub fn is_eligible(self) -> bool {
        !matches!(self, Eligibility::Ineligible)
    }
}

/// Allow-lists for one template family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceRules {
    pub eligible_types: BTreeSet<String>,
    pub replicated_types: BTreeSet<String>,
}

impl ResourceRules {
    pub fn new<I, S>(eligible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            eligible_types: eligible.into_iter().map(Into::into).collect(),
            replicated_types: BTreeSet::new(),
        }
    }

    pub fn with_replicated<I, S>(mut self, replicated: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replicated_types
            .extend(replicated.into_iter().map(Into::into));
        self
    }

    /// Classify a resolved type. Replicated wins over direct when a type
    /// appears in both lists.
    pub fn classify(&self, resource_type: Option<&str>) -> Eligibility {
        match resource_type {
            Some(ty) if self.replicated_types.contains(ty) => Eligibility::Replicated,
            Some(ty) if self.eligible_types.contains(ty) => Eligibility::Direct,
            _ => Eligibility::Ineligible,
        }
    }
}
