// aivis-core/src/domain/rules/freshness.rs

use async_trait::async_trait;
use chrono::{Datelike, Duration};
use std::collections::BTreeSet;

use super::common::{Tally, years_in};
use super::constants::ContentAgeConstants;
use crate::domain::error::RuleError;
use crate::domain::page::{PageCategory, RuleContext};
use crate::domain::scoring::{Applicability, Dimension, Issue, Rule, RuleDescriptor, RuleResult};

// Crawler and server clocks drift; a timestamp this far ahead is still accepted.
const CLOCK_SKEW_TOLERANCE_HOURS: i64 = 24;

pub struct DateSignalsRule {
    descriptor: RuleDescriptor,
}

impl DateSignalsRule {
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "freshness.date_signals",
                "Date Signals",
                Dimension::Freshness,
            )
            .description("Machine-readable publication and modification dates")
            .weight(0.25)
            .priority(60),
        }
    }
}

impl Default for DateSignalsRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for DateSignalsRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let mut tally = Tally::new();
        match ctx.signals.published_at {
            Some(published) => {
                tally.add(60.0, format!("Publication date: {}", published.format("%Y-%m-%d")))
            }
            None => tally.issue(Issue::medium(
                "No publication date exposed",
                "Expose datePublished in structured data and visibly on the page.",
            )),
        }
        match ctx.signals.modified_at {
            Some(modified) => {
                tally.add(40.0, format!("Last modified: {}", modified.format("%Y-%m-%d")))
            }
            None => tally.issue(Issue::low(
                "No modification date exposed",
                "Expose dateModified whenever the content is revised.",
            )),
        }
        if tally.points() == 0.0 {
            tally.note("No date signals found");
        }
        Ok(tally.finish())
    }
}

/// Age of the most recent update relative to the evaluation instant.
pub struct ContentAgeRule {
    descriptor: RuleDescriptor,
    constants: ContentAgeConstants,
}

impl ContentAgeRule {
    pub fn new(constants: ContentAgeConstants) -> Self {
        Self {
            descriptor: RuleDescriptor::new("freshness.content_age", "Content Age", Dimension::Freshness)
                .description("Time since the content was last updated")
                .weight(0.4)
                .priority(50),
            constants,
        }
    }
}

#[async_trait]
impl Rule for ContentAgeRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let mut tally = Tally::new();

        let Some(updated) = ctx.signals.last_updated() else {
            tally.note("Content age unknown: no dates available");
            tally.issue(Issue::high(
                "Content age cannot be determined",
                "Publish datePublished/dateModified so engines can judge freshness.",
            ));
            return Ok(tally.finish());
        };

        if updated > ctx.evaluated_at + Duration::hours(CLOCK_SKEW_TOLERANCE_HOURS) {
            return Err(RuleError::MalformedContext(format!(
                "last update {} is after evaluation time {}",
                updated.to_rfc3339(),
                ctx.evaluated_at.to_rfc3339()
            )));
        }

        let age_days = (ctx.evaluated_at - updated).num_days().max(0);
        let points = self
            .constants
            .tiers
            .iter()
            .find(|tier| age_days <= tier.max_days)
            .map(|tier| tier.points)
            .unwrap_or(self.constants.stale_points);

        tally.add(points, format!("Content last updated {} day(s) ago", age_days));
        tally.detail("age_days", age_days);
        if age_days > 365 {
            tally.issue(Issue::medium(
                "Content is over a year old",
                "Review the page and refresh outdated sections.",
            ));
        }
        Ok(tally.finish())
    }
}

/// Year mentions in title and headings. LLM analysis adds current-events and
/// outdated-claim judgments.
pub struct TemporalReferencesRule {
    descriptor: RuleDescriptor,
}

impl TemporalReferencesRule {
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "freshness.temporal_references",
                "Temporal References",
                Dimension::Freshness,
            )
            .description("Explicit references to the current period")
            .weight(0.2)
            .priority(40)
            .applicability(Applicability::categories([
                PageCategory::BlogArticle,
                PageCategory::Documentation,
                PageCategory::Guide,
                PageCategory::ProductPage,
                PageCategory::Faq,
            ]))
            .llm_eligible(),
        }
    }
}

impl Default for TemporalReferencesRule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rule for TemporalReferencesRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        let mut tally = Tally::new();
        let current = ctx.evaluated_at.year();

        let texts = ctx
            .signals
            .title
            .iter()
            .map(String::as_str)
            .chain(ctx.signals.headings.iter().map(|h| h.text.as_str()));
        let years: BTreeSet<i32> = texts.flat_map(years_in).collect();

        match years.last().copied() {
            Some(latest) if latest >= current => {
                tally.add(60.0, format!("References the current year ({})", current))
            }
            Some(latest) if latest == current - 1 => {
                tally.add(40.0, format!("References last year ({})", latest))
            }
            Some(latest) => {
                tally.add(10.0, format!("Most recent year referenced: {}", latest));
                tally.issue(Issue::medium(
                    "Dated year references",
                    "Update year mentions in the title and headings, or remove them.",
                ));
            }
            None => tally.add(30.0, "No explicit year references in title or headings"),
        }
        tally.detail("years", years.iter().copied().collect::<Vec<_>>());

        if let Some(analysis) = ctx.llm.freshness.available() {
            if analysis.references_current_events {
                tally.add(25.0, "LLM analysis: content references current events");
            }
            if analysis.outdated_claims == 0 {
                tally.add(15.0, "LLM analysis found no outdated claims");
            } else {
                tally.note(format!(
                    "LLM analysis flagged {} outdated claim(s)",
                    analysis.outdated_claims
                ));
                tally.issue(Issue::medium(
                    format!("{} outdated claim(s) detected", analysis.outdated_claims),
                    "Revise statements that no longer hold.",
                ));
            }
            tally.detail("llm_enhanced", true);
        }

        Ok(tally.finish())
    }
}
