// aivis-core/src/domain/rules/common.rs

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::domain::error::RuleError;
use crate::domain::page::RuleContext;
use crate::domain::scoring::{DEFAULT_MAX_SCORE, Dimension, Issue, Rule, RuleDescriptor, RuleResult};

fn re_host() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*[a-z][a-z0-9+.\-]*://(?:[^@/?#]*@)?([^/:?#\s]+)").unwrap_or_else(|_| {
            // Hardcoded pattern: a failure here means a typo, not bad input.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

fn re_year() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b((?:19|20)\d{2})\b")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// Lowercased host of an absolute URL, `None` for relative links.
pub(crate) fn host_of(url: &str) -> Option<String> {
    re_host()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_lowercase())
}

/// Four-digit years (1900..2099) mentioned in `text`.
pub(crate) fn years_in(text: &str) -> impl Iterator<Item = i32> + '_ {
    re_year()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse().ok()))
}

/// Running total of points, evidence and issues for one rule evaluation.
///
/// The heuristic branch of a rule fills the tally first; the LLM branch only
/// appends to it, so heuristic evidence always stays a prefix.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    points: f64,
    evidence: Vec<String>,
    issues: Vec<Issue>,
    details: Map<String, Value>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, points: f64, evidence: impl Into<String>) {
        self.points += points;
        self.evidence.push(evidence.into());
    }

    pub fn note(&mut self, evidence: impl Into<String>) {
        self.evidence.push(evidence.into());
    }

    pub fn issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn detail(&mut self, key: &str, value: impl Into<Value>) {
        self.details.insert(key.to_string(), value.into());
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    pub fn finish(self) -> RuleResult {
        RuleResult {
            score: self.points,
            max_score: DEFAULT_MAX_SCORE,
            evidence: self.evidence,
            details: self.details,
            issues: self.issues,
        }
        .clamped()
    }
}

/// Unconditional floor credited to every published page.
pub struct BaseRule {
    descriptor: RuleDescriptor,
}

impl BaseRule {
    pub fn new(dimension: Dimension, weight: f64) -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                format!("{}.base", dimension),
                format!("{} Baseline", capitalize(dimension.as_str())),
                dimension,
            )
            .description("Floor credit for a published, reachable page")
            .weight(weight)
            .priority(100),
        }
    }
}

#[async_trait]
impl Rule for BaseRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    async fn evaluate(&self, _ctx: &RuleContext) -> Result<RuleResult, RuleError> {
        Ok(RuleResult::new(DEFAULT_MAX_SCORE).with_evidence("Page is published and reachable"))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
