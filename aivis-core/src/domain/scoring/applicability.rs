// aivis-core/src/domain/scoring/applicability.rs

use super::descriptor::{Applicability, ApplicabilityScope, RuleDescriptor};
use crate::domain::page::PageCategory;

/// Decides whether `rule` may run for a page of the given category.
/// Must be checked before the rule is invoked.
pub fn matches(rule: &RuleDescriptor, category: PageCategory) -> bool {
    rule.applicability.matches(category)
}

impl Applicability {
    pub fn matches(&self, category: PageCategory) -> bool {
        match self.scope {
            ApplicabilityScope::All => true,
            // Unclassified pages only ever see `all`-scoped rules.
            ApplicabilityScope::Category => {
                category != PageCategory::Uncategorized && self.categories.contains(&category)
            }
        }
    }
}
