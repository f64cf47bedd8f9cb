// aivis-core/src/domain/rules/technical.rs

use async_trait::async_trait;

use super::common::Tally;
use super::constants::{MetadataConstants, PerformanceConstants};
use crate::domain::error::RuleError;
use crate::domain::page::{PageCategory, RuleContext};
use crate::domain::scoring::{Dimension, Issue, Rule, RuleDescriptor, RuleResult};

/// Title and meta description presence and length. LLM analysis checks that
/// both actually describe the content.
pub struct MetadataRule {
    descriptor: RuleDescriptor,
    constants: MetadataConstants,
}

impl MetadataRule {
    pub fn new(constants: MetadataConstants) -> Self {
        Self {
            descriptor: RuleDescriptor::new("technical.metadata", "Metadata", Dimension::Technical)
                .description("Title tag and meta description")
                .weight(0.25)
                .priority(60)
                .llm_eligible(),
            constants,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[async_trait]
impl Rule for MetadataRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let c = &self.constants;
        let mut tally = Tally::new();

        match non_empty(&ctx.signals.title) {
            Some(title) => {
                let len = title.chars().count();
                if (c.title_min_chars..=c.title_max_chars).contains(&len) {
                    tally.add(40.0, format!("Title length {} characters", len));
                } else {
                    tally.add(20.0, format!("Title present ({} characters)", len));
                    tally.issue(Issue::low(
                        "Title length outside recommended range",
                        format!(
                            "Keep the title between {} and {} characters.",
                            c.title_min_chars, c.title_max_chars
                        ),
                    ));
                }
            }
            None => {
                tally.note("No title tag");
                tally.issue(Issue::high(
                    "Missing title tag",
                    "Give every page a unique, descriptive title.",
                ));
            }
        }

        match non_empty(&ctx.signals.meta_description) {
            Some(description) => {
                let len = description.chars().count();
                if (c.description_min_chars..=c.description_max_chars).contains(&len) {
                    tally.add(40.0, format!("Meta description length {} characters", len));
                } else {
                    tally.add(20.0, format!("Meta description present ({} characters)", len));
                    tally.issue(Issue::low(
                        "Meta description length outside recommended range",
                        format!(
                            "Keep the meta description between {} and {} characters.",
                            c.description_min_chars, c.description_max_chars
                        ),
                    ));
                }
            }
            None => {
                tally.note("No meta description");
                tally.issue(Issue::medium(
                    "Missing meta description",
                    "Write a meta description summarizing the page in one or two sentences.",
                ));
            }
        }

        if let Some(analysis) = ctx.llm.technical.available() {
            if analysis.title_matches_content {
                tally.add(10.0, "LLM analysis: title reflects the content");
            } else {
                tally.issue(Issue::low(
                    "Title does not reflect the content",
                    "Rewrite the title around the page's actual topic.",
                ));
            }
            if analysis.description_matches_content {
                tally.add(10.0, "LLM analysis: meta description reflects the content");
            } else {
                tally.issue(Issue::low(
                    "Meta description does not reflect the content",
                    "Summarize what the page actually covers.",
                ));
            }
            tally.detail("llm_enhanced", true);
        }

        Ok(tally.finish())
    }
}

/// schema.org types a page of each category is expected to carry.
pub fn expected_schema_types(category: PageCategory) -> &'static [&'static str] {
    match category {
        PageCategory::Homepage => &["Organization", "WebSite"],
        PageCategory::BlogArticle => &["Article", "BlogPosting", "NewsArticle"],
        PageCategory::ProductPage => &["Product"],
        PageCategory::CategoryPage => &["CollectionPage", "ItemList"],
        PageCategory::LandingPage => &["WebPage", "Product", "Service"],
        PageCategory::Documentation => &["TechArticle", "Article"],
        PageCategory::Guide => &["HowTo", "Article", "TechArticle"],
        PageCategory::Faq => &["FAQPage"],
        PageCategory::AboutPage => &["AboutPage", "Organization"],
        PageCategory::ContactPage => &["ContactPage", "Organization"],
        PageCategory::Uncategorized => &[],
    }
}

pub struct StructuredDataRule {
    descriptor: RuleDescriptor,
}

impl StructuredDataRule {
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "technical.structured_data",
                "Structured Data",
                Dimension::Technical,
            )
            .description("schema.org markup matching the page type")
            .weight(0.25)
            .priority(50),
        }
    }
}

impl Default for StructuredDataRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for StructuredDataRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let mut tally = Tally::new();
        let types = &ctx.signals.schema_types;

        if types.is_empty() {
            tally.note("No structured data found");
            tally.issue(Issue::medium(
                "No structured data",
                "Add JSON-LD schema.org markup describing the page.",
            ));
            return Ok(tally.finish());
        }
        tally.add(50.0, format!("Structured data types: {}", types.join(", ")));

        let expected = expected_schema_types(ctx.category);
        if expected.is_empty() {
            tally.add(50.0, "Structured data present for an uncategorized page");
        } else if let Some(found) = expected.iter().find(|t| ctx.signals.has_schema_type(t)) {
            tally.add(50.0, format!("Includes {} schema expected for {}", found, ctx.category));
        } else {
            tally.issue(Issue::medium(
                format!("Missing {} schema", expected.join(" or ")),
                format!("Add {} markup suited to a {} page.", expected[0], ctx.category),
            ));
        }

        Ok(tally.finish())
    }
}

/// HTTPS, canonical URL, indexability and mobile viewport.
pub struct CrawlabilityRule {
    descriptor: RuleDescriptor,
}

impl CrawlabilityRule {
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "technical.crawlability",
                "Crawlability",
                Dimension::Technical,
            )
            .description("Page can be fetched, indexed and rendered")
            .weight(0.2)
            .priority(45),
        }
    }
}

impl Default for CrawlabilityRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for CrawlabilityRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let signals = &ctx.signals;
        let mut tally = Tally::new();

        if ctx.is_https() {
            tally.add(30.0, "Served over HTTPS");
        } else {
            tally.issue(Issue::high("Page served over HTTP", "Redirect all traffic to HTTPS."));
        }
        if signals.canonical_url.as_deref().is_some_and(|c| !c.trim().is_empty()) {
            tally.add(25.0, "Canonical URL declared");
        } else {
            tally.issue(Issue::low(
                "No canonical URL",
                "Declare a canonical link to consolidate duplicate URLs.",
            ));
        }
        if signals.noindex {
            tally.note("Page carries a noindex directive");
            tally.issue(Issue::critical(
                "Page is excluded from indexing (noindex)",
                "Remove the noindex directive if the page should be discoverable.",
            ));
        } else {
            tally.add(30.0, "Page is indexable");
        }
        if signals.has_viewport_meta {
            tally.add(15.0, "Mobile viewport configured");
        } else {
            tally.issue(Issue::low(
                "No viewport meta tag",
                "Add <meta name=\"viewport\"> for mobile rendering.",
            ));
        }

        Ok(tally.finish())
    }
}

pub struct PerformanceRule {
    descriptor: RuleDescriptor,
    constants: PerformanceConstants,
}

impl PerformanceRule {
    pub fn new(constants: PerformanceConstants) -> Self {
        Self {
            descriptor: RuleDescriptor::new("technical.performance", "Performance", Dimension::Technical)
                .description("Page load time")
                .weight(0.1)
                .priority(40),
            constants,
        }
    }
}

#[async_trait]
impl Rule for PerformanceRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let c = &self.constants;
        let mut tally = Tally::new();

        let Some(ms) = ctx.signals.load_time_ms else {
            tally.add(50.0, "Load time not measured; neutral score");
            tally.detail("measured", false);
            return Ok(tally.finish());
        };
        tally.detail("load_time_ms", ms);

        if ms <= c.fast_ms {
            tally.add(100.0, format!("Fast load: {} ms", ms));
        } else if ms <= c.acceptable_ms {
            tally.add(70.0, format!("Acceptable load: {} ms", ms));
        } else if ms <= c.slow_ms {
            tally.add(40.0, format!("Slow load: {} ms", ms));
            tally.issue(Issue::medium(
                "Slow page load",
                format!("Bring load time under {} ms.", c.acceptable_ms),
            ));
        } else {
            tally.add(10.0, format!("Very slow load: {} ms", ms));
            tally.issue(Issue::high(
                "Very slow page load",
                "Crawlers may time out; reduce payload and server response time.",
            ));
        }

        Ok(tally.finish())
    }
}

pub struct ImageAccessibilityRule {
    descriptor: RuleDescriptor,
}

impl ImageAccessibilityRule {
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "technical.image_accessibility",
                "Image Accessibility",
                Dimension::Technical,
            )
            .description("Alt text on images")
            .weight(0.1)
            .priority(30),
        }
    }
}

impl Default for ImageAccessibilityRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for ImageAccessibilityRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let total = ctx.signals.image_count;
        let missing = ctx.signals.images_missing_alt;
        if missing > total {
            return Err(RuleError::MalformedContext(format!(
                "{} images missing alt text but only {} images on the page",
                missing, total
            )));
        }

        let mut tally = Tally::new();
        if total == 0 {
            tally.add(100.0, "No images to describe");
            return Ok(tally.finish());
        }

        let described = total - missing;
        tally.add(
            100.0 * f64::from(described) / f64::from(total),
            format!("{} of {} images have alt text", described, total),
        );
        if missing > 0 {
            tally.issue(Issue::low(
                format!("{} image(s) missing alt text", missing),
                "Describe every meaningful image with alt text.",
            ));
        }

        Ok(tally.finish())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::page::{Availability, LlmSignals, PageSignals, TechnicalAnalysis};

    fn ctx(url: &str, category: PageCategory, signals: PageSignals) -> RuleContext {
        RuleContext::new(url, category).with_signals(signals)
    }

    #[tokio::test]
    async fn test_metadata_ranges_and_llm() {
        let rule = MetadataRule::new(MetadataConstants::default());
        let base = ctx(
            "https://example.com/",
            PageCategory::Homepage,
            PageSignals {
                title: Some("Acme: project management software for teams".into()),
                meta_description: Some("Short".into()),
                ..Default::default()
            },
        );
        let heuristic = rule.evaluate(&base).await.unwrap();
        assert_eq!(heuristic.score, 60.0);
        assert_eq!(heuristic.issues.len(), 1);

        let enhanced = rule
            .evaluate(&base.with_llm(LlmSignals {
                technical: Availability::Available(TechnicalAnalysis {
                    title_matches_content: true,
                    description_matches_content: false,
                }),
                ..LlmSignals::none()
            }))
            .await
            .unwrap();
        assert_eq!(enhanced.score, 70.0);
        assert!(enhanced.evidence.starts_with(&heuristic.evidence));
        assert_eq!(enhanced.issues.len(), 2);
    }

    #[tokio::test]
    async fn test_structured_data_expected_type() {
        let rule = StructuredDataRule::new();
        let matching = ctx(
            "https://example.com/p/1",
            PageCategory::ProductPage,
            PageSignals {
                schema_types: vec!["BreadcrumbList".into(), "Product".into()],
                ..Default::default()
            },
        );
        assert_eq!(rule.evaluate(&matching).await.unwrap().score, 100.0);

        let generic = ctx(
            "https://example.com/p/1",
            PageCategory::ProductPage,
            PageSignals {
                schema_types: vec!["BreadcrumbList".into()],
                ..Default::default()
            },
        );
        let result = rule.evaluate(&generic).await.unwrap();
        assert_eq!(result.score, 50.0);
        assert_eq!(result.issues[0].title, "Missing Product schema");
    }

    #[tokio::test]
    async fn test_crawlability_noindex_over_http() {
        let rule = CrawlabilityRule::new();
        let result = rule
            .evaluate(&ctx(
                "http://example.com/",
                PageCategory::Homepage,
                PageSignals {
                    noindex: true,
                    has_viewport_meta: true,
                    ..Default::default()
                },
            ))
            .await
            .unwrap();
        assert_eq!(result.score, 15.0);
        assert!(result.issues.iter().any(|i| i.severity == crate::domain::scoring::Severity::Critical));
    }

    #[tokio::test]
    async fn test_performance_tiers() {
        let rule = PerformanceRule::new(PerformanceConstants::default());
        for (ms, expected) in [(Some(800), 100.0), (Some(2_000), 70.0), (Some(3_000), 40.0), (Some(9_000), 10.0), (None, 50.0)] {
            let signals = PageSignals {
                load_time_ms: ms,
                ..Default::default()
            };
            let result = rule
                .evaluate(&ctx("https://example.com/", PageCategory::Homepage, signals))
                .await
                .unwrap();
            assert_eq!(result.score, expected, "load time {:?}", ms);
        }
    }

    #[tokio::test]
    async fn test_image_alt_ratio() {
        let rule = ImageAccessibilityRule::new();
        let signals = PageSignals {
            image_count: 4,
            images_missing_alt: 1,
            ..Default::default()
        };
        let result = rule
            .evaluate(&ctx("https://example.com/", PageCategory::Guide, signals))
            .await
            .unwrap();
        assert_eq!(result.score, 75.0);
    }

    #[tokio::test]
    async fn test_image_counts_inconsistent() {
        let rule = ImageAccessibilityRule::new();
        let signals = PageSignals {
            image_count: 1,
            images_missing_alt: 3,
            ..Default::default()
        };
        let err = rule
            .evaluate(&ctx("https://example.com/", PageCategory::Guide, signals))
            .await
            .unwrap_err();
        assert!(matches!(err, RuleError::MalformedContext(_)));
    }
}
