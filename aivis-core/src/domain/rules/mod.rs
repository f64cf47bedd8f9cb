// aivis-core/src/domain/rules/mod.rs

// Built-in rule catalogue. Each dimension registers a baseline rule plus its
// heuristic checks; weights are fractions of the dimension's nominal total.

pub mod authority;
pub mod common;
pub mod constants;
pub mod freshness;
pub mod site;
pub mod structure;
pub mod technical;

pub use common::BaseRule;
pub use constants::RuleConstants;

use crate::domain::error::DomainError;
use crate::domain::scoring::{Dimension, ExecutionScope, RuleRegistry};

use authority::{AuthorPresenceRule, CitationQualityRule};
use freshness::{ContentAgeRule, DateSignalsRule, TemporalReferencesRule};
use site::{
    SiteAuthorCoverageRule, SiteDiscoveryRule, SiteHttpsCoverageRule, SiteTrustPagesRule,
    SiteUpdateCadenceRule,
};
use structure::{ContentDepthRule, FaqContentRule, HeadingHierarchyRule, ScannabilityRule};
use technical::{
    CrawlabilityRule, ImageAccessibilityRule, MetadataRule, PerformanceRule, StructuredDataRule,
};

/// Builds the registry of every built-in rule, configured with `constants`.
pub fn default_registry(constants: &RuleConstants) -> Result<RuleRegistry, DomainError> {
    RuleRegistry::builder()
        // --- Authority ---
        .register(BaseRule::new(Dimension::Authority, 0.2))
        .register(AuthorPresenceRule::new(constants.author.clone()))
        .register(CitationQualityRule::new(constants.citation.clone()))
        // Remainder reserved for a backlink-profile rule.
        .reserve(Dimension::Authority, ExecutionScope::Page, 0.1)
        .register(SiteAuthorCoverageRule::new())
        .register(SiteTrustPagesRule::new())
        // --- Freshness ---
        .register(BaseRule::new(Dimension::Freshness, 0.15))
        .register(DateSignalsRule::new())
        .register(ContentAgeRule::new(constants.content_age.clone()))
        .register(TemporalReferencesRule::new())
        .register(SiteUpdateCadenceRule::new())
        // --- Structure ---
        .register(BaseRule::new(Dimension::Structure, 0.1))
        .register(HeadingHierarchyRule::new())
        .register(ContentDepthRule::new(constants.content_depth.clone()))
        .register(ScannabilityRule::new())
        .register(FaqContentRule::new())
        .reserve(Dimension::Structure, ExecutionScope::Page, 0.05)
        // --- Technical ---
        .register(BaseRule::new(Dimension::Technical, 0.1))
        .register(MetadataRule::new(constants.metadata.clone()))
        .register(StructuredDataRule::new())
        .register(CrawlabilityRule::new())
        .register(PerformanceRule::new(constants.performance.clone()))
        .register(ImageAccessibilityRule::new())
        .register(SiteDiscoveryRule::new())
        .register(SiteHttpsCoverageRule::new())
        .build()
}
