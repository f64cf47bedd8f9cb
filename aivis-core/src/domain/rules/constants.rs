// aivis-core/src/domain/rules/constants.rs

// Scoring constants injected into rules at construction time. Loaded from the
// `rules:` section of aivis.yaml; defaults reproduce the built-in policy.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConstants {
    #[validate(nested)]
    pub author: AuthorConstants,
    #[validate(nested)]
    pub citation: CitationConstants,
    #[validate(nested)]
    pub content_depth: ContentDepthConstants,
    #[validate(nested)]
    pub content_age: ContentAgeConstants,
    #[validate(nested)]
    pub metadata: MetadataConstants,
    #[validate(nested)]
    pub performance: PerformanceConstants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorConstants {
    #[validate(range(min = 0.0, max = 100.0))]
    pub byline_points: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub bio_points: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub profile_points: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub credentials_bonus: f64,
}

impl Default for AuthorConstants {
    fn default() -> Self {
        Self {
            byline_points: 50.0,
            bio_points: 20.0,
            profile_points: 10.0,
            credentials_bonus: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct CitationConstants {
    #[validate(range(min = 0.0, max = 100.0))]
    pub points_per_citation: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub max_citation_points: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub points_per_authoritative: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub max_authoritative_points: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub primary_source_bonus: f64,
    /// Host suffixes treated as authoritative (".gov") or exact hosts ("who.int").
    pub authoritative_domains: Vec<String>,
}

impl Default for CitationConstants {
    fn default() -> Self {
        Self {
            points_per_citation: 10.0,
            max_citation_points: 60.0,
            points_per_authoritative: 20.0,
            max_authoritative_points: 40.0,
            primary_source_bonus: 15.0,
            authoritative_domains: [".gov", ".edu", ".int", "wikipedia.org", "arxiv.org", "nature.com"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WordTier {
    pub min_words: u32,
    #[validate(range(min = 0.0, max = 100.0))]
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct ContentDepthConstants {
    /// Checked top-down; the first tier whose `min_words` is reached wins.
    #[validate(nested)]
    #[validate(custom(function = "validate_word_tiers"))]
    pub tiers: Vec<WordTier>,
    /// Below this word count the page gets a thin-content issue.
    pub thin_content_words: u32,
    #[validate(range(min = 0.0, max = 100.0))]
    pub comprehensive_bonus: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub moderate_bonus: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub direct_answer_bonus: f64,
}

impl Default for ContentDepthConstants {
    fn default() -> Self {
        Self {
            tiers: vec![
                WordTier { min_words: 1500, points: 70.0 },
                WordTier { min_words: 800, points: 55.0 },
                WordTier { min_words: 300, points: 35.0 },
                WordTier { min_words: 1, points: 15.0 },
            ],
            thin_content_words: 300,
            comprehensive_bonus: 20.0,
            moderate_bonus: 10.0,
            direct_answer_bonus: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AgeTier {
    pub max_days: i64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct ContentAgeConstants {
    /// Checked in order; the first tier with `age <= max_days` wins.
    #[validate(nested)]
    #[validate(custom(function = "validate_age_tiers"))]
    pub tiers: Vec<AgeTier>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub stale_points: f64,
}

impl Default for ContentAgeConstants {
    fn default() -> Self {
        Self {
            tiers: vec![
                AgeTier { max_days: 90, points: 100.0 },
                AgeTier { max_days: 180, points: 80.0 },
                AgeTier { max_days: 365, points: 60.0 },
                AgeTier { max_days: 730, points: 30.0 },
            ],
            stale_points: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct MetadataConstants {
    #[validate(range(min = 1))]
    pub title_min_chars: usize,
    #[validate(range(min = 1))]
    pub title_max_chars: usize,
    #[validate(range(min = 1))]
    pub description_min_chars: usize,
    #[validate(range(min = 1))]
    pub description_max_chars: usize,
}

impl Default for MetadataConstants {
    fn default() -> Self {
        Self {
            title_min_chars: 30,
            title_max_chars: 60,
            description_min_chars: 70,
            description_max_chars: 160,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConstants {
    #[validate(range(min = 1))]
    pub fast_ms: u32,
    #[validate(range(min = 1))]
    pub acceptable_ms: u32,
    #[validate(range(min = 1))]
    pub slow_ms: u32,
}

impl Default for PerformanceConstants {
    fn default() -> Self {
        Self {
            fast_ms: 1_000,
            acceptable_ms: 2_500,
            slow_ms: 4_000,
        }
    }
}

fn validate_word_tiers(tiers: &[WordTier]) -> Result<(), ValidationError> {
    if tiers.windows(2).all(|w| w[0].min_words > w[1].min_words) {
        Ok(())
    } else {
        Err(ValidationError::new("word_tiers_not_descending"))
    }
}

fn validate_age_tiers(tiers: &[AgeTier]) -> Result<(), ValidationError> {
    if tiers.windows(2).all(|w| w[0].max_days < w[1].max_days) {
        Ok(())
    } else {
        Err(ValidationError::new("age_tiers_not_ascending"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RuleConstants::default().validate().is_ok());
    }

    #[test]
    fn test_unordered_word_tiers_rejected() {
        let constants = ContentDepthConstants {
            tiers: vec![
                WordTier { min_words: 300, points: 30.0 },
                WordTier { min_words: 800, points: 60.0 },
            ],
            ..Default::default()
        };
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_points_above_hundred_rejected() {
        let constants = AuthorConstants {
            byline_points: 150.0,
            ..Default::default()
        };
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_partial_rules_section_parses() -> anyhow::Result<()> {
        let yaml = r#"
citation:
  points_per_citation: 5
  authoritative_domains: [".gov"]
"#;
        let constants: RuleConstants = serde_yaml::from_str(yaml)?;
        assert_eq!(constants.citation.points_per_citation, 5.0);
        assert_eq!(constants.citation.max_citation_points, 60.0);
        assert_eq!(constants.citation.authoritative_domains, vec![".gov".to_string()]);
        Ok(())
    }
}
