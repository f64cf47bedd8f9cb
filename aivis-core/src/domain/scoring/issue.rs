// aivis-core/src/domain/scoring/issue.rs

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An actionable finding attached to a rule result. Purely descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub title: String,
    pub recommendation: String,
}

impl Issue {
    pub fn new(
        severity: Severity,
        title: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            title: title.into(),
            recommendation: recommendation.into(),
        }
    }

    pub fn critical(title: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self::new(Severity::Critical, title, recommendation)
    }

    pub fn high(title: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self::new(Severity::High, title, recommendation)
    }

    pub fn medium(title: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self::new(Severity::Medium, title, recommendation)
    }

    pub fn low(title: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self::new(Severity::Low, title, recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_serializes_snake_case() -> anyhow::Result<()> {
        let issue = Issue::high("No author", "Add a byline");
        let json = serde_json::to_string(&issue)?;
        assert!(json.contains("\"severity\":\"high\""));
        Ok(())
    }
}
