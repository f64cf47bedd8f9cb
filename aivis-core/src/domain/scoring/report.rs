// aivis-core/src/domain/scoring/report.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use super::aggregate::{DimensionScore, round_score};
use super::descriptor::ExecutionScope;
use super::dimension::Dimension;
use super::issue::{Issue, Severity};
use crate::domain::page::{PageCategory, RuleContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverallMode {
    #[default]
    Mean,
    Weighted,
}

impl std::str::FromStr for OverallMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(Self::Mean),
            "weighted" => Ok(Self::Weighted),
            _ => Err(format!("Unknown overall mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DimensionWeights {
    #[validate(range(min = 0.0))]
    pub authority: f64,
    #[validate(range(min = 0.0))]
    pub freshness: f64,
    #[validate(range(min = 0.0))]
    pub structure: f64,
    #[validate(range(min = 0.0))]
    pub technical: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            authority: 0.3,
            freshness: 0.2,
            structure: 0.25,
            technical: 0.25,
        }
    }
}

impl DimensionWeights {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Authority => self.authority,
            Dimension::Freshness => self.freshness,
            Dimension::Structure => self.structure,
            Dimension::Technical => self.technical,
        }
    }
}

/// How dimension scores fold into the overall page score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct OverallPolicy {
    pub mode: OverallMode,
    #[validate(nested)]
    pub weights: DimensionWeights,
}

impl OverallPolicy {
    pub fn mean() -> Self {
        Self {
            mode: OverallMode::Mean,
            weights: DimensionWeights::default(),
        }
    }

    pub fn weighted(weights: DimensionWeights) -> Self {
        Self {
            mode: OverallMode::Weighted,
            weights,
        }
    }

    pub fn combine(&self, dimensions: &[DimensionScore]) -> f64 {
        if dimensions.is_empty() {
            return 0.0;
        }
        let overall = match self.mode {
            OverallMode::Mean => {
                dimensions.iter().map(|d| d.score).sum::<f64>() / dimensions.len() as f64
            }
            OverallMode::Weighted => {
                let total: f64 = dimensions.iter().map(|d| self.weights.get(d.dimension)).sum();
                if total <= 0.0 {
                    0.0
                } else {
                    dimensions
                        .iter()
                        .map(|d| d.score * self.weights.get(d.dimension))
                        .sum::<f64>()
                        / total
                }
            }
        };
        round_score(overall).clamp(0.0, 100.0)
    }
}

/// Final, self-contained outcome of one page (or site) evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageScoreReport {
    pub url: String,
    pub category: PageCategory,
    pub scope: ExecutionScope,
    pub evaluated_at: DateTime<Utc>,
    /// The input carried no timestamp; `evaluated_at` is the run time.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub clock_defaulted: bool,
    pub overall_score: f64,
    pub dimensions: Vec<DimensionScore>,
    /// Issues merged across dimensions, grouped per dimension.
    pub issues: BTreeMap<Dimension, Vec<Issue>>,
}

impl PageScoreReport {
    pub fn assemble(
        ctx: &RuleContext,
        scope: ExecutionScope,
        mut dimensions: Vec<DimensionScore>,
        policy: &OverallPolicy,
    ) -> Self {
        dimensions.sort_by_key(|d| d.dimension);
        let overall_score = policy.combine(&dimensions);
        let issues = dimensions
            .iter()
            .filter(|d| !d.issues.is_empty())
            .map(|d| (d.dimension, d.issues.clone()))
            .collect();

        Self {
            url: ctx.url.clone(),
            category: ctx.category,
            scope,
            evaluated_at: ctx.evaluated_at,
            clock_defaulted: ctx.clock_defaulted,
            overall_score,
            dimensions,
            issues,
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    pub fn issue_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Issues across all dimensions, most severe first; dimension order
    /// is kept among equal severities.
    pub fn prioritized_issues(&self) -> Vec<(Dimension, &Issue)> {
        let mut issues: Vec<(Dimension, &Issue)> = self
            .issues
            .iter()
            .flat_map(|(dimension, issues)| issues.iter().map(move |issue| (*dimension, issue)))
            .collect();
        issues.sort_by(|a, b| b.1.severity.cmp(&a.1.severity));
        issues
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.issues.values().flatten().map(|i| i.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension(dimension: Dimension, score: f64) -> DimensionScore {
        DimensionScore {
            dimension,
            score,
            rules: vec![],
            evidence: vec![],
            issues: vec![],
        }
    }

    #[test]
    fn test_default_policy_is_unweighted_mean() {
        let policy = OverallPolicy::default();
        assert_eq!(policy.mode, OverallMode::Mean);
        assert_eq!(policy, OverallPolicy::mean());
        let overall = policy.combine(&[
            dimension(Dimension::Authority, 80.0),
            dimension(Dimension::Technical, 40.0),
        ]);
        assert_eq!(overall, 60.0);
    }

    #[test]
    fn test_mean_policy() {
        let overall = OverallPolicy::mean().combine(&[
            dimension(Dimension::Authority, 80.0),
            dimension(Dimension::Technical, 40.0),
        ]);
        assert_eq!(overall, 60.0);
    }

    #[test]
    fn test_weighted_policy_renormalizes_over_present_dimensions() {
        let policy = OverallPolicy::weighted(DimensionWeights::default());
        // authority 0.3, technical 0.25 -> (0.3*80 + 0.25*40) / 0.55
        let overall = policy.combine(&[
            dimension(Dimension::Authority, 80.0),
            dimension(Dimension::Technical, 40.0),
        ]);
        assert!((overall - 61.82).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weights_yield_zero() {
        let policy = OverallPolicy {
            mode: OverallMode::Weighted,
            weights: DimensionWeights {
                authority: 0.0,
                freshness: 0.0,
                structure: 0.0,
                technical: 0.0,
            },
        };
        assert_eq!(policy.combine(&[dimension(Dimension::Authority, 90.0)]), 0.0);
        assert_eq!(policy.combine(&[]), 0.0);
    }

    #[test]
    fn test_prioritized_issues_sorted_by_severity() {
        let ctx = RuleContext::new("https://example.com", PageCategory::Homepage);
        let mut authority = dimension(Dimension::Authority, 10.0);
        authority.issues = vec![Issue::low("a", "a")];
        let mut technical = dimension(Dimension::Technical, 10.0);
        technical.issues = vec![Issue::critical("t", "t")];

        let report = PageScoreReport::assemble(
            &ctx,
            ExecutionScope::Page,
            vec![technical, authority],
            &OverallPolicy::default(),
        );

        assert_eq!(report.dimensions[0].dimension, Dimension::Authority);
        assert_eq!(report.issue_count(), 2);
        assert_eq!(report.highest_severity(), Some(Severity::Critical));
        let prioritized = report.prioritized_issues();
        assert_eq!(prioritized[0].0, Dimension::Technical);
        assert_eq!(prioritized[1].1.title, "a");
    }
}
