// aivis-core/src/domain/rules/site.rs

// Domain-scope rules: they read the site aggregates attached to the context
// and run once per site, never per page.

use async_trait::async_trait;

use super::common::Tally;
use crate::domain::error::RuleError;
use crate::domain::page::{RuleContext, SiteSignals};
use crate::domain::scoring::{
    Dimension, ExecutionScope, Issue, Rule, RuleDescriptor, RuleResult,
};

fn site_descriptor(id: &str, name: &str, dimension: Dimension, weight: f64) -> RuleDescriptor {
    RuleDescriptor::new(id, name, dimension)
        .weight(weight)
        .priority(50)
        .execution_scope(ExecutionScope::Domain)
}

/// Returns the site aggregates, or a zero result explaining their absence.
fn site_or_zero(ctx: &RuleContext) -> Result<&SiteSignals, RuleResult> {
    ctx.site.as_ref().ok_or_else(|| {
        let mut tally = Tally::new();
        tally.note("Site signals unavailable");
        tally.finish()
    })
}

/// `part / page_count` as a percentage, rejecting impossible counts.
fn coverage(site: &SiteSignals, part: u32, what: &str) -> Result<Option<f64>, RuleError> {
    if part > site.page_count {
        return Err(RuleError::MalformedContext(format!(
            "{} {} exceeds page count {}",
            part, what, site.page_count
        )));
    }
    if site.page_count == 0 {
        return Ok(None);
    }
    Ok(Some(100.0 * f64::from(part) / f64::from(site.page_count)))
}

pub struct SiteAuthorCoverageRule {
    descriptor: RuleDescriptor,
}

impl SiteAuthorCoverageRule {
    pub fn new() -> Self {
        Self {
            descriptor: site_descriptor(
                "authority.site_author_coverage",
                "Site Author Coverage",
                Dimension::Authority,
                0.5,
            )
            .description("Share of pages attributing an author"),
        }
    }
}

impl Default for SiteAuthorCoverageRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for SiteAuthorCoverageRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let site = match site_or_zero(ctx) {
            Ok(site) => site,
            Err(zero) => return Ok(zero),
        };
        let mut tally = Tally::new();
        match coverage(site, site.pages_with_author, "pages with author")? {
            None => tally.note("No crawled pages"),
            Some(pct) => {
                tally.add(
                    pct,
                    format!("{} of {} pages attribute an author", site.pages_with_author, site.page_count),
                );
                if pct < 50.0 {
                    tally.issue(Issue::medium(
                        "Most pages lack author attribution",
                        "Add bylines across the site, starting with editorial content.",
                    ));
                }
            }
        }
        Ok(tally.finish())
    }
}

pub struct SiteTrustPagesRule {
    descriptor: RuleDescriptor,
}

impl SiteTrustPagesRule {
    pub fn new() -> Self {
        Self {
            descriptor: site_descriptor(
                "authority.site_trust_pages",
                "Trust Pages",
                Dimension::Authority,
                0.5,
            )
            .description("About and contact pages identifying the publisher"),
        }
    }
}

impl Default for SiteTrustPagesRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for SiteTrustPagesRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let site = match site_or_zero(ctx) {
            Ok(site) => site,
            Err(zero) => return Ok(zero),
        };
        let mut tally = Tally::new();
        if site.has_about_page {
            tally.add(50.0, "About page found");
        } else {
            tally.issue(Issue::medium(
                "No about page",
                "Publish an about page describing who runs the site.",
            ));
        }
        if site.has_contact_page {
            tally.add(50.0, "Contact page found");
        } else {
            tally.issue(Issue::low(
                "No contact page",
                "Publish a contact page with a reachable address.",
            ));
        }
        Ok(tally.finish())
    }
}

pub struct SiteUpdateCadenceRule {
    descriptor: RuleDescriptor,
}

impl SiteUpdateCadenceRule {
    pub fn new() -> Self {
        Self {
            descriptor: site_descriptor(
                "freshness.site_update_cadence",
                "Update Cadence",
                Dimension::Freshness,
                1.0,
            )
            .description("Share of pages updated in the last year"),
        }
    }
}

impl Default for SiteUpdateCadenceRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for SiteUpdateCadenceRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let site = match site_or_zero(ctx) {
            Ok(site) => site,
            Err(zero) => return Ok(zero),
        };
        let mut tally = Tally::new();
        match coverage(site, site.pages_updated_last_year, "recently updated pages")? {
            None => tally.note("No crawled pages"),
            Some(pct) => {
                tally.add(
                    pct,
                    format!(
                        "{} of {} pages updated in the last year",
                        site.pages_updated_last_year, site.page_count
                    ),
                );
                if pct < 25.0 {
                    tally.issue(Issue::medium(
                        "Site content is rarely updated",
                        "Schedule reviews of high-traffic pages at least yearly.",
                    ));
                }
            }
        }
        Ok(tally.finish())
    }
}

/// robots.txt, XML sitemap and llms.txt.
pub struct SiteDiscoveryRule {
    descriptor: RuleDescriptor,
}

impl SiteDiscoveryRule {
    pub fn new() -> Self {
        Self {
            descriptor: site_descriptor(
                "technical.site_discovery",
                "Site Discovery",
                Dimension::Technical,
                0.6,
            )
            .description("Files crawlers and AI agents use to discover content"),
        }
    }
}

impl Default for SiteDiscoveryRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for SiteDiscoveryRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let site = match site_or_zero(ctx) {
            Ok(site) => site,
            Err(zero) => return Ok(zero),
        };
        let mut tally = Tally::new();
        if site.has_robots_txt {
            tally.add(30.0, "robots.txt present");
        } else {
            tally.issue(Issue::medium("No robots.txt", "Serve a robots.txt at the site root."));
        }
        if site.has_sitemap {
            tally.add(40.0, "XML sitemap present");
        } else {
            tally.issue(Issue::high(
                "No XML sitemap",
                "Publish a sitemap and reference it from robots.txt.",
            ));
        }
        if site.has_llms_txt {
            tally.add(30.0, "llms.txt present");
        } else {
            tally.issue(Issue::low(
                "No llms.txt",
                "Publish an llms.txt pointing AI agents at your key pages.",
            ));
        }
        Ok(tally.finish())
    }
}

pub struct SiteHttpsCoverageRule {
    descriptor: RuleDescriptor,
}

impl SiteHttpsCoverageRule {
    pub fn new() -> Self {
        Self {
            descriptor: site_descriptor(
                "technical.site_https_coverage",
                "HTTPS Coverage",
                Dimension::Technical,
                0.4,
            )
            .description("Share of pages served over HTTPS"),
        }
    }
}

impl Default for SiteHttpsCoverageRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for SiteHttpsCoverageRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let site = match site_or_zero(ctx) {
            Ok(site) => site,
            Err(zero) => return Ok(zero),
        };
        let mut tally = Tally::new();
        match coverage(site, site.https_pages, "HTTPS pages")? {
            None => tally.note("No crawled pages"),
            Some(pct) => {
                tally.add(pct, format!("{} of {} pages served over HTTPS", site.https_pages, site.page_count));
                if site.https_pages < site.page_count {
                    tally.issue(Issue::high(
                        format!("{} page(s) served over HTTP", site.page_count - site.https_pages),
                        "Redirect every URL to HTTPS.",
                    ));
                }
            }
        }
        Ok(tally.finish())
    }
}
