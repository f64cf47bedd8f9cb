// aivis-core/src/domain/scoring/aggregate.rs

use serde::{Deserialize, Serialize};

use super::descriptor::RuleDescriptor;
use super::dimension::Dimension;
use super::issue::Issue;
use super::result::RuleResult;

/// Fixed denominator of every dimension. Rules that did not run leave their
/// weight unscored instead of shrinking the base.
pub const NOMINAL_TOTAL_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvaluationStatus {
    Scored,
    Failed { reason: String },
}

/// One `(rule, result)` pair produced by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEvaluation {
    pub descriptor: RuleDescriptor,
    pub result: RuleResult,
    pub status: EvaluationStatus,
}

impl RuleEvaluation {
    pub fn scored(descriptor: RuleDescriptor, result: RuleResult) -> Self {
        Self {
            descriptor,
            result: result.clamped(),
            status: EvaluationStatus::Scored,
        }
    }

    pub fn failed(descriptor: RuleDescriptor, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let result = RuleResult::failed(&descriptor.name, &reason);
        Self {
            descriptor,
            result,
            status: EvaluationStatus::Failed { reason },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, EvaluationStatus::Failed { .. })
    }

    /// Weighted share of the nominal total, in 0..weight.
    pub fn contribution(&self) -> f64 {
        self.descriptor.weight * self.result.fraction()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub score: f64,
    pub rules: Vec<RuleEvaluation>,
    pub evidence: Vec<String>,
    pub issues: Vec<Issue>,
}

impl DimensionScore {
    pub fn failed_rules(&self) -> impl Iterator<Item = &RuleEvaluation> {
        self.rules.iter().filter(|evaluation| evaluation.is_failed())
    }
}

/// Combines a dimension's evaluations, already in canonical order, into a
/// 0..100 score over the fixed nominal weight.
pub fn aggregate_dimension(dimension: Dimension, rules: Vec<RuleEvaluation>) -> DimensionScore {
    let weighted: f64 = rules.iter().map(RuleEvaluation::contribution).sum();
    let score = round_score(weighted / NOMINAL_TOTAL_WEIGHT * 100.0).clamp(0.0, 100.0);

    let evidence = rules
        .iter()
        .flat_map(|evaluation| evaluation.result.evidence.iter().cloned())
        .collect();
    let issues = rules
        .iter()
        .flat_map(|evaluation| evaluation.result.issues.iter().cloned())
        .collect();

    DimensionScore {
        dimension,
        score,
        rules,
        evidence,
        issues,
    }
}

/// Two decimals keep reports stable across platforms.
pub(crate) fn round_score(value: f64) -> f64 {
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}
