// aivis-core/src/application/evaluator.rs

use futures::FutureExt;
use futures::StreamExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::error::RuleError;
use crate::domain::page::{PageCategory, RuleContext};
use crate::domain::scoring::{
    Dimension, DimensionScore, ExecutionScope, Rule, RuleDescriptor, RuleEvaluation, RuleRegistry,
    RuleResult, aggregate_dimension, matches,
};

pub const DEFAULT_RULE_CONCURRENCY: usize = 4;

/// Runs the applicable rules of a dimension and isolates their failures.
pub struct RuleEvaluator {
    registry: Arc<RuleRegistry>,
    rule_concurrency: usize,
}

impl RuleEvaluator {
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self {
            registry,
            rule_concurrency: DEFAULT_RULE_CONCURRENCY,
        }
    }

    pub fn with_rule_concurrency(mut self, rule_concurrency: usize) -> Self {
        self.rule_concurrency = rule_concurrency.max(1);
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Rules of `dimension` and `scope` matching `category`, in canonical order.
    pub fn applicable_rules(
        &self,
        dimension: Dimension,
        scope: ExecutionScope,
        category: PageCategory,
    ) -> Vec<&Arc<dyn Rule>> {
        self.registry
            .rules_for(dimension)
            .filter(|rule| {
                let descriptor = rule.descriptor();
                descriptor.execution_scope == scope && matches(descriptor, category)
            })
            .collect()
    }

    #[instrument(skip(self, ctx), fields(url = %ctx.url))]
    pub async fn evaluate_dimension(
        &self,
        ctx: &RuleContext,
        dimension: Dimension,
        scope: ExecutionScope,
    ) -> DimensionScore {
        let rules = self.applicable_rules(dimension, scope, ctx.category);
        debug!(applicable = rules.len(), "Evaluating dimension");

        let futures = rules.into_iter().enumerate().map(|(index, rule)| async move {
            let outcome = AssertUnwindSafe(rule.evaluate(ctx)).catch_unwind().await;
            (index, record(rule.descriptor(), outcome))
        });

        // Completion order is arbitrary; the index restores canonical order.
        let mut evaluations: Vec<(usize, RuleEvaluation)> = futures::stream::iter(futures)
            .buffer_unordered(self.rule_concurrency)
            .collect()
            .await;
        evaluations.sort_by_key(|(index, _)| *index);

        aggregate_dimension(
            dimension,
            evaluations.into_iter().map(|(_, evaluation)| evaluation).collect(),
        )
    }

    /// Every dimension that owns rules of `scope`, in dimension order.
    pub async fn evaluate(&self, ctx: &RuleContext, scope: ExecutionScope) -> Vec<DimensionScore> {
        let mut scores = Vec::new();
        for dimension in self.registry.dimensions_for(scope) {
            scores.push(self.evaluate_dimension(ctx, dimension, scope).await);
        }
        scores
    }
}

fn record(
    descriptor: &RuleDescriptor,
    outcome: Result<Result<RuleResult, RuleError>, Box<dyn Any + Send>>,
) -> RuleEvaluation {
    match outcome {
        Ok(Ok(result)) => {
            debug!(rule = %descriptor.id, score = result.score, "Rule evaluated");
            RuleEvaluation::scored(descriptor.clone(), result)
        }
        Ok(Err(err)) => {
            warn!(rule = %descriptor.id, error = %err, "Rule failed, scoring zero");
            RuleEvaluation::failed(descriptor.clone(), err.to_string())
        }
        Err(payload) => {
            let reason = format!("panicked: {}", panic_message(payload.as_ref()));
            warn!(rule = %descriptor.id, %reason, "Rule panicked, scoring zero");
            RuleEvaluation::failed(descriptor.clone(), reason)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::page::{Author, PageSignals};
    use crate::domain::rules::{RuleConstants, default_registry};
    use crate::domain::scoring::{Applicability, EvaluationStatus, Severity};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    enum Behavior {
        Score(f64),
        Fail,
        Panic,
        Slow(u64, f64),
    }

    struct ScriptedRule {
        descriptor: RuleDescriptor,
        behavior: Behavior,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedRule {
        fn new(id: &str, weight: f64, behavior: Behavior) -> Self {
            Self {
                descriptor: RuleDescriptor::new(id, id, Dimension::Structure).weight(weight),
                behavior,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn applicability(mut self, applicability: Applicability) -> Self {
            self.descriptor = self.descriptor.applicability(applicability);
            self
        }
    }

    #[async_trait]
    impl Rule for ScriptedRule {
        fn descriptor(&self) -> &RuleDescriptor {
            &self.descriptor
        }

        async fn evaluate(&self, _ctx: &RuleContext) -> Result<RuleResult, RuleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Score(score) => Ok(RuleResult::new(score).with_evidence(&self.descriptor.id)),
                Behavior::Fail => Err(RuleError::MalformedContext("bad signals".into())),
                Behavior::Panic => panic!("boom"),
                Behavior::Slow(ms, score) => {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    Ok(RuleResult::new(score).with_evidence(&self.descriptor.id))
                }
            }
        }
    }

    fn evaluator(rules: Vec<ScriptedRule>) -> RuleEvaluator {
        let registry = rules
            .into_iter()
            .fold(RuleRegistry::builder(), |builder, rule| builder.register(rule))
            .build()
            .unwrap();
        RuleEvaluator::new(Arc::new(registry))
    }

    fn guide() -> RuleContext {
        RuleContext::new("https://example.com/guide", PageCategory::Guide)
    }

    #[tokio::test]
    async fn test_failing_rule_is_isolated() {
        let evaluator = evaluator(vec![
            ScriptedRule::new("ok", 0.5, Behavior::Score(100.0)),
            ScriptedRule::new("broken", 0.5, Behavior::Fail),
        ]);
        let score = evaluator
            .evaluate_dimension(&guide(), Dimension::Structure, ExecutionScope::Page)
            .await;

        assert_eq!(score.score, 50.0);
        assert_eq!(score.rules.len(), 2);
        let broken = &score.rules[1];
        assert!(broken.is_failed());
        assert_eq!(broken.result.score, 0.0);
        assert!(
            score
                .issues
                .iter()
                .any(|i| i.severity == Severity::High && i.title == "Analysis failed: broken")
        );
    }

    #[tokio::test]
    async fn test_panicking_rule_is_isolated() {
        let evaluator = evaluator(vec![
            ScriptedRule::new("panics", 0.4, Behavior::Panic),
            ScriptedRule::new("ok", 0.6, Behavior::Score(50.0)),
        ]);
        let score = evaluator
            .evaluate_dimension(&guide(), Dimension::Structure, ExecutionScope::Page)
            .await;

        assert_eq!(score.score, 30.0);
        match &score.rules[0].status {
            EvaluationStatus::Failed { reason } => assert_eq!(reason, "panicked: boom"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_applicable_rule_never_invoked() {
        let spy = ScriptedRule::new("faq_only", 0.3, Behavior::Score(100.0))
            .applicability(Applicability::categories([PageCategory::Faq]));
        let calls = spy.calls.clone();
        let evaluator = evaluator(vec![ScriptedRule::new("all", 0.7, Behavior::Score(100.0)), spy]);

        let score = evaluator
            .evaluate_dimension(&guide(), Dimension::Structure, ExecutionScope::Page)
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        // Fixed denominator: the skipped rule's weight is not redistributed.
        assert_eq!(score.score, 70.0);
        assert_eq!(score.rules.len(), 1);

        let uncategorized = RuleContext::new("https://example.com/x", PageCategory::Uncategorized);
        evaluator
            .evaluate_dimension(&uncategorized, Dimension::Structure, ExecutionScope::Page)
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_results_kept_in_canonical_order() {
        let evaluator = evaluator(vec![
            ScriptedRule::new("first", 0.3, Behavior::Slow(40, 10.0)),
            ScriptedRule::new("second", 0.3, Behavior::Slow(5, 20.0)),
            ScriptedRule::new("third", 0.3, Behavior::Score(30.0)),
        ])
        .with_rule_concurrency(3);
        let score = evaluator
            .evaluate_dimension(&guide(), Dimension::Structure, ExecutionScope::Page)
            .await;

        insta::assert_yaml_snapshot!(score.evidence, @r"
        - first
        - second
        - third
        ");
    }

    #[tokio::test]
    async fn test_homepage_without_author_scores_twenty_authority() {
        let registry = default_registry(&RuleConstants::default()).unwrap();
        let evaluator = RuleEvaluator::new(Arc::new(registry));
        let ctx = RuleContext::new("https://example.com/", PageCategory::Homepage);

        let applicable: Vec<String> = evaluator
            .applicable_rules(Dimension::Authority, ExecutionScope::Page, PageCategory::Homepage)
            .iter()
            .map(|rule| rule.descriptor().id.clone())
            .collect();
        assert_eq!(applicable, vec!["authority.base", "authority.author_presence"]);

        let score = evaluator
            .evaluate_dimension(&ctx, Dimension::Authority, ExecutionScope::Page)
            .await;
        assert_eq!(score.score, 20.0);
    }

    #[tokio::test]
    async fn test_blog_article_with_author_uses_citation_rule() {
        let registry = default_registry(&RuleConstants::default()).unwrap();
        let evaluator = RuleEvaluator::new(Arc::new(registry));
        let ctx = RuleContext::new("https://example.com/blog/a", PageCategory::BlogArticle)
            .with_signals(PageSignals {
                author: Some(Author {
                    name: "Ada".into(),
                    has_bio: true,
                    has_profile_link: true,
                }),
                outbound_links: vec!["https://www.nih.gov/study".into()],
                ..Default::default()
            });

        let score = evaluator
            .evaluate_dimension(&ctx, Dimension::Authority, ExecutionScope::Page)
            .await;
        // 0.2*100 + 0.4*80 + 0.3*30
        assert_eq!(score.score, 61.0);
    }

    #[tokio::test]
    async fn test_domain_scope_only_reports_domain_dimensions() {
        let registry = default_registry(&RuleConstants::default()).unwrap();
        let evaluator = RuleEvaluator::new(Arc::new(registry));
        let ctx = RuleContext::new("https://example.com", PageCategory::Homepage);
        let dimensions: Vec<Dimension> = evaluator
            .evaluate(&ctx, ExecutionScope::Domain)
            .await
            .into_iter()
            .map(|d| d.dimension)
            .collect();
        assert_eq!(
            dimensions,
            vec![Dimension::Authority, Dimension::Freshness, Dimension::Technical]
        );
    }
}
