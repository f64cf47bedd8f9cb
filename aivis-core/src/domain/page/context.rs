// aivis-core/src/domain/page/context.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::PageCategory;
use super::llm::LlmSignals;
use super::signals::{PageSignals, SiteSignals};

/// Read-only input of every rule evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RuleContextDocument")]
pub struct RuleContext {
    pub url: String,
    #[serde(default)]
    pub category: PageCategory,
    #[serde(default)]
    pub signals: PageSignals,
    #[serde(default)]
    pub llm: LlmSignals,
    /// Present only for domain-scope evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteSignals>,
    /// Reference instant for age computations.
    pub evaluated_at: DateTime<Utc>,
    /// `evaluated_at` was not supplied and fell back to the current time, so
    /// age-based scores are not reproducible across runs.
    #[serde(skip)]
    pub clock_defaulted: bool,
}

/// Wire shape of a page input; only `url` is required.
#[derive(Deserialize)]
struct RuleContextDocument {
    url: String,
    #[serde(default)]
    category: PageCategory,
    #[serde(default)]
    signals: PageSignals,
    #[serde(default)]
    llm: LlmSignals,
    #[serde(default)]
    site: Option<SiteSignals>,
    #[serde(default)]
    evaluated_at: Option<DateTime<Utc>>,
}

impl From<RuleContextDocument> for RuleContext {
    fn from(doc: RuleContextDocument) -> Self {
        Self {
            url: doc.url,
            category: doc.category,
            signals: doc.signals,
            llm: doc.llm,
            site: doc.site,
            clock_defaulted: doc.evaluated_at.is_none(),
            evaluated_at: doc.evaluated_at.unwrap_or_else(Utc::now),
        }
    }
}

impl RuleContext {
    pub fn new(url: impl Into<String>, category: PageCategory) -> Self {
        Self {
            url: url.into(),
            category,
            signals: PageSignals::default(),
            llm: LlmSignals::default(),
            site: None,
            evaluated_at: Utc::now(),
            clock_defaulted: true,
        }
    }

    pub fn with_signals(mut self, signals: PageSignals) -> Self {
        self.signals = signals;
        self
    }

    pub fn with_llm(mut self, llm: LlmSignals) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_site(mut self, site: SiteSignals) -> Self {
        self.site = Some(site);
        self
    }

    pub fn at(mut self, evaluated_at: DateTime<Utc>) -> Self {
        self.evaluated_at = evaluated_at;
        self.clock_defaulted = false;
        self
    }

    pub fn is_https(&self) -> bool {
        self.url.trim_start().to_lowercase().starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_context_deserializes() -> anyhow::Result<()> {
        let json = r#"{ "url": "https://example.com/blog/post", "category": "blog" }"#;
        let ctx: RuleContext = serde_json::from_str(json)?;
        assert_eq!(ctx.category, PageCategory::BlogArticle);
        assert_eq!(ctx.signals, PageSignals::default());
        assert!(ctx.site.is_none());
        assert!(ctx.is_https());
        assert!(ctx.clock_defaulted);
        Ok(())
    }

    #[test]
    fn test_explicit_timestamp_is_kept() -> anyhow::Result<()> {
        let yaml = "url: https://example.com/\nevaluated_at: 2025-01-15T00:00:00Z\n";
        let ctx: RuleContext = serde_yaml::from_str(yaml)?;
        assert!(!ctx.clock_defaulted);
        assert_eq!(ctx.evaluated_at.to_rfc3339(), "2025-01-15T00:00:00+00:00");

        let round_trip: RuleContext = serde_json::from_str(&serde_json::to_string(&ctx)?)?;
        assert_eq!(round_trip, ctx);
        Ok(())
    }

    #[test]
    fn test_http_url_is_not_https() {
        let ctx = RuleContext::new("http://example.com", PageCategory::Homepage);
        assert!(!ctx.is_https());
    }
}
