// aivis-core/src/application/scorer.rs

use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::evaluator::RuleEvaluator;
use crate::domain::configuration::EngineConfig;
use crate::domain::page::RuleContext;
use crate::domain::scoring::{ExecutionScope, OverallPolicy, PageScoreReport, RuleRegistry};
use crate::ports::llm::LlmAnalysisSource;

/// Page and site scoring use case: LLM enrichment, rule evaluation per
/// dimension, then the overall combination.
pub struct PageScorer {
    evaluator: RuleEvaluator,
    policy: OverallPolicy,
    page_concurrency: usize,
    llm_timeout: Duration,
    llm_source: Option<Arc<dyn LlmAnalysisSource>>,
}

impl PageScorer {
    pub fn new(registry: Arc<RuleRegistry>, config: &EngineConfig) -> Self {
        Self {
            evaluator: RuleEvaluator::new(registry)
                .with_rule_concurrency(config.engine.rule_concurrency),
            policy: config.overall.clone(),
            page_concurrency: config.engine.page_concurrency.max(1),
            llm_timeout: config.engine.llm_timeout(),
            llm_source: None,
        }
    }

    pub fn with_llm_source(mut self, source: Arc<dyn LlmAnalysisSource>) -> Self {
        self.llm_source = Some(source);
        self
    }

    pub fn evaluator(&self) -> &RuleEvaluator {
        &self.evaluator
    }

    #[instrument(skip(self, ctx), fields(url = %ctx.url, category = %ctx.category))]
    pub async fn score_page(&self, ctx: RuleContext) -> PageScoreReport {
        let ctx = self.enrich(ctx).await;
        let dimensions = self.evaluator.evaluate(&ctx, ExecutionScope::Page).await;
        let report = PageScoreReport::assemble(&ctx, ExecutionScope::Page, dimensions, &self.policy);
        info!(
            overall = report.overall_score,
            issues = report.issue_count(),
            "Page scored"
        );
        report
    }

    /// Scores pages concurrently; reports come back in input order.
    pub async fn score_pages(&self, contexts: Vec<RuleContext>) -> Vec<PageScoreReport> {
        info!(pages = contexts.len(), concurrency = self.page_concurrency, "Scoring pages");
        futures::stream::iter(contexts.into_iter().map(|ctx| self.score_page(ctx)))
            .buffered(self.page_concurrency)
            .collect()
            .await
    }

    /// Domain pass over the site aggregates in `ctx.site`. Only dimensions
    /// owning domain-scoped rules appear in the report.
    #[instrument(skip(self, ctx), fields(url = %ctx.url))]
    pub async fn score_site(&self, ctx: RuleContext) -> PageScoreReport {
        if ctx.site.is_none() {
            warn!("No site signals attached; domain rules will score zero");
        }
        let dimensions = self.evaluator.evaluate(&ctx, ExecutionScope::Domain).await;
        let report =
            PageScoreReport::assemble(&ctx, ExecutionScope::Domain, dimensions, &self.policy);
        info!(overall = report.overall_score, "Site scored");
        report
    }

    /// Fills missing LLM slots from the configured source. Any failure or
    /// timeout leaves the context as it was.
    async fn enrich(&self, mut ctx: RuleContext) -> RuleContext {
        let Some(source) = &self.llm_source else {
            return ctx;
        };
        if ctx.llm.is_complete() {
            return ctx;
        }

        match tokio::time::timeout(self.llm_timeout, source.analyze(&ctx)).await {
            Ok(Ok(signals)) => {
                ctx.llm.fill_missing(signals);
                debug!(
                    source = source.name(),
                    available = ctx.llm.available_count(),
                    "LLM analysis merged"
                );
            }
            Ok(Err(err)) => {
                warn!(source = source.name(), error = %err, "LLM analysis failed, using heuristics only")
            }
            Err(_) => warn!(
                source = source.name(),
                timeout_ms = self.llm_timeout.as_millis() as u64,
                "LLM analysis timed out, using heuristics only"
            ),
        }
        ctx
    }
}
