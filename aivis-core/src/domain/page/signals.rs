// aivis-core/src/domain/page/signals.rs

// Raw signals as produced by the crawler/content extractor. Nothing here is
// re-derived from HTML; missing values are left empty, not guessed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn is_question(&self) -> bool {
        self.text.trim_end().ends_with('?')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub has_bio: bool,
    #[serde(default)]
    pub has_profile_link: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PageSignals {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub word_count: u32,
    pub paragraph_count: u32,
    pub list_count: u32,
    pub table_count: u32,
    pub headings: Vec<Heading>,
    pub author: Option<Author>,
    pub outbound_links: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    /// schema.org types found in JSON-LD / microdata (e.g. "Article").
    pub schema_types: Vec<String>,
    pub canonical_url: Option<String>,
    pub has_viewport_meta: bool,
    pub noindex: bool,
    pub load_time_ms: Option<u32>,
    pub image_count: u32,
    pub images_missing_alt: u32,
}

impl PageSignals {
    pub fn headings_at(&self, level: u8) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(move |h| h.level == level)
    }

    /// Most recent of the published and modified timestamps.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        match (self.published_at, self.modified_at) {
            (Some(published), Some(modified)) => Some(published.max(modified)),
            (published, modified) => published.or(modified),
        }
    }

    pub fn has_schema_type(&self, wanted: &str) -> bool {
        self.schema_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(wanted))
    }
}

/// Site-wide aggregates consumed by domain-scope rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteSignals {
    pub page_count: u32,
    pub pages_with_author: u32,
    pub pages_updated_last_year: u32,
    pub https_pages: u32,
    pub has_robots_txt: bool,
    pub has_sitemap: bool,
    pub has_llms_txt: bool,
    pub has_about_page: bool,
    pub has_contact_page: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_last_updated_prefers_latest_timestamp() {
        let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single();
        let modified = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).single();
        let signals = PageSignals {
            published_at: published,
            modified_at: modified,
            ..Default::default()
        };
        assert_eq!(signals.last_updated(), modified);

        let only_published = PageSignals {
            published_at: published,
            ..Default::default()
        };
        assert_eq!(only_published.last_updated(), published);
        assert_eq!(PageSignals::default().last_updated(), None);
    }

    #[test]
    fn test_question_heading_detection() {
        assert!(Heading::new(2, "What is GEO? ").is_question());
        assert!(!Heading::new(2, "Pricing").is_question());
    }

    #[test]
    fn test_schema_type_lookup_is_case_insensitive() {
        let signals = PageSignals {
            schema_types: vec!["FAQPage".to_string()],
            ..Default::default()
        };
        assert!(signals.has_schema_type("faqpage"));
        assert!(!signals.has_schema_type("Product"));
    }

    #[test]
    fn test_partial_signals_deserialize_with_defaults() -> anyhow::Result<()> {
        let yaml = r#"
title: "Hello"
word_count: 420
headings:
  - { level: 1, text: "Hello" }
"#;
        let signals: PageSignals = serde_yaml::from_str(yaml)?;
        assert_eq!(signals.word_count, 420);
        assert_eq!(signals.headings.len(), 1);
        assert!(signals.author.is_none());
        assert!(!signals.noindex);
        Ok(())
    }
}
