// aivis-core/src/domain/scoring/descriptor.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::dimension::Dimension;
use crate::domain::page::PageCategory;

/// Whether a rule scores a single page or aggregates across a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionScope {
    #[default]
    Page,
    Domain,
}

impl ExecutionScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Domain => "domain",
        }
    }
}

impl fmt::Display for ExecutionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicabilityScope {
    #[default]
    All,
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Applicability {
    pub scope: ApplicabilityScope,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub categories: BTreeSet<PageCategory>,
}

impl Applicability {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn categories(categories: impl IntoIterator<Item = PageCategory>) -> Self {
        Self {
            scope: ApplicabilityScope::Category,
            categories: categories.into_iter().collect(),
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            ApplicabilityScope::All => write!(f, "all"),
            ApplicabilityScope::Category => {
                let names: Vec<&str> = self.categories.iter().map(|c| c.as_str()).collect();
                write!(f, "category[{}]", names.join(", "))
            }
        }
    }
}

/// Static identity and scoring policy of a rule. Never mutated after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub dimension: Dimension,
    /// Fraction of the dimension's nominal total (0..1).
    pub weight: f64,
    /// Higher runs first. Ordering only, never used to skip a rule.
    pub priority: i32,
    pub applicability: Applicability,
    pub execution_scope: ExecutionScope,
    #[serde(default)]
    pub llm_eligible: bool,
}

impl RuleDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, dimension: Dimension) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            dimension,
            weight: 0.0,
            priority: 0,
            applicability: Applicability::all(),
            execution_scope: ExecutionScope::Page,
            llm_eligible: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }

    pub fn execution_scope(mut self, scope: ExecutionScope) -> Self {
        self.execution_scope = scope;
        self
    }

    pub fn llm_eligible(mut self) -> Self {
        self.llm_eligible = true;
        self
    }
}
