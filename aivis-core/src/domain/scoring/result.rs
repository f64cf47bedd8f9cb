// aivis-core/src/domain/scoring/result.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::issue::Issue;

/// Normalization denominator used by every built-in rule.
pub const DEFAULT_MAX_SCORE: f64 = 100.0;

/// Output of a single rule evaluation. Built fresh for every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub score: f64,
    pub max_score: f64,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub details: Map<String, Value>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl RuleResult {
    /// A result on the conventional 0..100 scale. Out of range scores are clamped.
    pub fn new(score: f64) -> Self {
        Self::with_max(score, DEFAULT_MAX_SCORE)
    }

    pub fn with_max(score: f64, max_score: f64) -> Self {
        Self {
            score,
            max_score,
            evidence: Vec::new(),
            details: Map::new(),
            issues: Vec::new(),
        }
        .clamped()
    }

    /// Zero-score result recorded when a rule body fails or panics.
    pub fn failed(rule_name: &str, reason: &str) -> Self {
        let mut result = Self::new(0.0);
        result
            .evidence
            .push(format!("Analysis failed for '{}': {}", rule_name, reason));
        result
            .details
            .insert("failure".to_string(), Value::String(reason.to_string()));
        result.issues.push(Issue::high(
            format!("Analysis failed: {}", rule_name),
            "Check the extracted page signals for this URL and re-run the analysis.",
        ));
        result
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence.push(evidence.into());
        self
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    /// Score normalized to 0..1.
    pub fn fraction(&self) -> f64 {
        if self.max_score > 0.0 {
            self.score / self.max_score
        } else {
            0.0
        }
    }

    /// Enforces `0 <= score <= max_score` with a positive, finite `max_score`.
    pub fn clamped(mut self) -> Self {
        if !self.max_score.is_finite() || self.max_score <= 0.0 {
            self.max_score = DEFAULT_MAX_SCORE;
        }
        self.score = if self.score.is_nan() {
            0.0
        } else {
            self.score.clamp(0.0, self.max_score)
        };
        self
    }
}
