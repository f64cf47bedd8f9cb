// aivis-core/src/domain/rules/structure.rs

use async_trait::async_trait;

use super::common::Tally;
use super::constants::ContentDepthConstants;
use crate::domain::error::RuleError;
use crate::domain::page::{GuideDepth, PageCategory, RuleContext};
use crate::domain::scoring::{Applicability, Dimension, Issue, Rule, RuleDescriptor, RuleResult};

/// One H1, H2 sections and no skipped levels.
pub struct HeadingHierarchyRule {
    descriptor: RuleDescriptor,
}

impl HeadingHierarchyRule {
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "structure.heading_hierarchy",
                "Heading Hierarchy",
                Dimension::Structure,
            )
            .description("Single H1 and a sequential heading outline")
            .weight(0.3)
            .priority(60),
        }
    }
}

impl Default for HeadingHierarchyRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for HeadingHierarchyRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let headings = &ctx.signals.headings;
        if let Some(bad) = headings.iter().find(|h| !(1..=6).contains(&h.level)) {
            return Err(RuleError::MalformedContext(format!(
                "heading level {} out of range 1..=6 ('{}')",
                bad.level, bad.text
            )));
        }

        let mut tally = Tally::new();
        if headings.is_empty() {
            tally.note("No headings found");
            tally.issue(Issue::high(
                "Page has no heading structure",
                "Organize the content under an H1 and descriptive H2 sections.",
            ));
            return Ok(tally.finish());
        }

        let h1: Vec<&str> = ctx.signals.headings_at(1).map(|h| h.text.as_str()).collect();
        match h1.len() {
            0 => tally.issue(Issue::high(
                "Missing H1",
                "Give the page exactly one H1 stating its main topic.",
            )),
            1 => tally.add(40.0, format!("Single H1: {}", h1[0])),
            n => {
                tally.add(20.0, format!("{} H1 headings found", n));
                tally.issue(Issue::medium(
                    "Multiple H1 headings",
                    "Keep a single H1 and demote the others to H2.",
                ));
            }
        }

        let h2 = ctx.signals.headings_at(2).count();
        if h2 > 0 {
            tally.add(30.0, format!("{} H2 section heading(s)", h2));
        } else {
            tally.issue(Issue::low(
                "No H2 sections",
                "Split the content into sections with H2 headings.",
            ));
        }

        let skipped = headings
            .windows(2)
            .filter(|w| w[1].level > w[0].level + 1)
            .count();
        if skipped == 0 {
            tally.add(30.0, "Heading levels are sequential");
        } else {
            tally.note(format!("{} skipped heading level(s)", skipped));
            tally.issue(Issue::medium(
                "Skipped heading levels",
                "Do not jump from H2 to H4; nest headings one level at a time.",
            ));
        }
        tally.detail("heading_count", headings.len());

        Ok(tally.finish())
    }
}

/// Word-count depth. LLM analysis judges guide depth and whether the page
/// answers its query directly.
pub struct ContentDepthRule {
    descriptor: RuleDescriptor,
    constants: ContentDepthConstants,
}

impl ContentDepthRule {
    pub fn new(constants: ContentDepthConstants) -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "structure.content_depth",
                "Content Depth",
                Dimension::Structure,
            )
            .description("Substantive, in-depth content")
            .weight(0.3)
            .priority(50)
            .llm_eligible(),
            constants,
        }
    }
}

#[async_trait]
impl Rule for ContentDepthRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let c = &self.constants;
        let mut tally = Tally::new();
        let words = ctx.signals.word_count;

        match c.tiers.iter().find(|tier| words >= tier.min_words) {
            Some(tier) => tally.add(tier.points, format!("{} words of content", words)),
            None => tally.note(format!("{} words of content", words)),
        }
        if words == 0 {
            tally.issue(Issue::high(
                "Page has no indexable text",
                "Serve the main content as HTML text rather than images or scripts.",
            ));
        } else if words < c.thin_content_words {
            tally.issue(Issue::medium(
                "Thin content",
                "Expand the page to cover the topic in more depth.",
            ));
        }
        tally.detail("word_count", words);

        if let Some(analysis) = ctx.llm.structure.available() {
            match analysis.guide_depth {
                GuideDepth::Comprehensive => {
                    tally.add(c.comprehensive_bonus, "LLM analysis: comprehensive coverage")
                }
                GuideDepth::Moderate => {
                    tally.add(c.moderate_bonus, "LLM analysis: moderate coverage")
                }
                GuideDepth::Shallow => tally.note("LLM analysis: shallow coverage"),
            }
            if analysis.answers_query_directly {
                tally.add(c.direct_answer_bonus, "LLM analysis: answers the query directly");
            }
            tally.detail("llm_enhanced", true);
        }

        Ok(tally.finish())
    }
}

/// Lists, tables and section length.
pub struct ScannabilityRule {
    descriptor: RuleDescriptor,
}

impl ScannabilityRule {
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "structure.scannability",
                "Scannability",
                Dimension::Structure,
            )
            .description("Content broken into lists, tables and short sections")
            .weight(0.15)
            .priority(40)
            .applicability(Applicability::categories([
                PageCategory::BlogArticle,
                PageCategory::Documentation,
                PageCategory::Guide,
                PageCategory::Faq,
            ])),
        }
    }
}

impl Default for ScannabilityRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for ScannabilityRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let signals = &ctx.signals;
        let mut tally = Tally::new();

        if signals.list_count > 0 {
            tally.add(35.0, format!("{} list(s)", signals.list_count));
        } else {
            tally.issue(Issue::low(
                "No lists",
                "Use bullet or numbered lists for steps and enumerations.",
            ));
        }
        if signals.table_count > 0 {
            tally.add(15.0, format!("{} table(s)", signals.table_count));
        }

        if signals.word_count > 0 {
            let sections = (signals.headings_at(2).count() + signals.headings_at(3).count()).max(1);
            let per_section = signals.word_count as usize / sections;
            tally.detail("words_per_section", per_section);
            if per_section <= 300 {
                tally.add(50.0, format!("~{} words per section", per_section));
            } else if per_section <= 600 {
                tally.add(25.0, format!("~{} words per section", per_section));
            } else {
                tally.note(format!("~{} words per section", per_section));
                tally.issue(Issue::medium(
                    "Long unbroken sections",
                    "Add subheadings roughly every 300 words.",
                ));
            }
        } else {
            tally.note("No body text to segment");
        }

        Ok(tally.finish())
    }
}

/// FAQPage markup and question-style headings.
pub struct FaqContentRule {
    descriptor: RuleDescriptor,
}

impl FaqContentRule {
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new("structure.faq_content", "FAQ Content", Dimension::Structure)
                .description("Question-and-answer content engines can quote")
                .weight(0.1)
                .priority(30)
                .applicability(Applicability::categories([
                    PageCategory::Faq,
                    PageCategory::BlogArticle,
                    PageCategory::ProductPage,
                    PageCategory::Guide,
                ])),
        }
    }
}

impl Default for FaqContentRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for FaqContentRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let mut tally = Tally::new();
        let has_schema = ctx.signals.has_schema_type("FAQPage");
        let questions = ctx.signals.headings.iter().filter(|h| h.is_question()).count();

        if has_schema {
            tally.add(60.0, "FAQPage structured data present");
        }
        match questions {
            0 => {}
            1 | 2 => tally.add(20.0, format!("{} question heading(s)", questions)),
            n => tally.add(40.0, format!("{} question headings", n)),
        }
        if !has_schema && questions == 0 {
            tally.note("No FAQ content found");
            tally.issue(Issue::low(
                "No FAQ content",
                "Answer common questions under question-style headings with FAQPage markup.",
            ));
        } else if !has_schema {
            tally.issue(Issue::low(
                "FAQ without FAQPage markup",
                "Mark up the questions with FAQPage structured data.",
            ));
        }
        tally.detail("question_headings", questions);

        Ok(tally.finish())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::page::{Availability, Heading, LlmSignals, PageSignals, StructureAnalysis};

    fn ctx(signals: PageSignals) -> RuleContext {
        RuleContext::new("https://example.com/guide", PageCategory::Guide).with_signals(signals)
    }

    #[tokio::test]
    async fn test_clean_outline_scores_full() {
        let rule = HeadingHierarchyRule::new();
        let signals = PageSignals {
            headings: vec![
                Heading::new(1, "Setting up"),
                Heading::new(2, "Install"),
                Heading::new(3, "Linux"),
                Heading::new(2, "Configure"),
            ],
            ..Default::default()
        };
        let result = rule.evaluate(&ctx(signals)).await.unwrap();
        assert_eq!(result.score, 100.0);
        assert!(result.issues.is_empty());
    }

    #[tokio::test]
    async fn test_skipped_levels_and_missing_h1() {
        let rule = HeadingHierarchyRule::new();
        let signals = PageSignals {
            headings: vec![Heading::new(2, "Intro"), Heading::new(4, "Detail")],
            ..Default::default()
        };
        let result = rule.evaluate(&ctx(signals)).await.unwrap();
        assert_eq!(result.score, 30.0);
        let titles: Vec<&str> = result.issues.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Missing H1", "Skipped heading levels"]);
    }

    #[tokio::test]
    async fn test_invalid_heading_level_is_malformed() {
        let rule = HeadingHierarchyRule::new();
        let signals = PageSignals {
            headings: vec![Heading::new(9, "Nope")],
            ..Default::default()
        };
        let err = rule.evaluate(&ctx(signals)).await.unwrap_err();
        assert!(matches!(err, RuleError::MalformedContext(_)));
    }

    #[tokio::test]
    async fn test_content_depth_with_llm() {
        let rule = ContentDepthRule::new(ContentDepthConstants::default());
        let base = ctx(PageSignals {
            word_count: 2_000,
            ..Default::default()
        });
        let heuristic = rule.evaluate(&base).await.unwrap();
        assert_eq!(heuristic.score, 70.0);

        let enhanced = rule
            .evaluate(&base.with_llm(LlmSignals {
                structure: Availability::Available(StructureAnalysis {
                    guide_depth: GuideDepth::Comprehensive,
                    answers_query_directly: true,
                    has_summary: false,
                }),
                ..LlmSignals::none()
            }))
            .await
            .unwrap();
        assert_eq!(enhanced.score, 100.0);
        assert!(enhanced.evidence.starts_with(&heuristic.evidence));
    }

    #[tokio::test]
    async fn test_thin_content_flagged() {
        let rule = ContentDepthRule::new(ContentDepthConstants::default());
        let result = rule
            .evaluate(&ctx(PageSignals {
                word_count: 120,
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(result.score, 15.0);
        assert_eq!(result.issues[0].title, "Thin content");
    }

    #[tokio::test]
    async fn test_scannability_sections() {
        let rule = ScannabilityRule::new();
        let signals = PageSignals {
            word_count: 1_200,
            list_count: 2,
            headings: (0..5).map(|i| Heading::new(2, format!("Part {}", i))).collect(),
            ..Default::default()
        };
        let result = rule.evaluate(&ctx(signals)).await.unwrap();
        // 35 for lists, 50 for 240 words per section, no tables
        assert_eq!(result.score, 85.0);
        assert_eq!(result.details["words_per_section"], 240);
    }

    #[tokio::test]
    async fn test_faq_schema_and_questions() {
        let rule = FaqContentRule::new();
        let signals = PageSignals {
            schema_types: vec!["faqpage".into()],
            headings: vec![
                Heading::new(2, "What is it?"),
                Heading::new(2, "How much does it cost?"),
                Heading::new(2, "Is there a trial?"),
            ],
            ..Default::default()
        };
        let result = rule.evaluate(&ctx(signals)).await.unwrap();
        assert_eq!(result.score, 100.0);
        assert!(result.issues.is_empty());
    }
}
