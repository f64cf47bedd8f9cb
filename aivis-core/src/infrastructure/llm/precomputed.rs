// aivis-core/src/infrastructure/llm/precomputed.rs

// Adapter for analyses produced ahead of time by the external LLM service:
// a JSON or YAML map from page URL to per-dimension judgments.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::domain::page::{LlmSignals, RuleContext};
use crate::error::AivisError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::input::load_document;
use crate::ports::llm::LlmAnalysisSource;

#[derive(Debug, Clone, Default)]
pub struct PrecomputedLlmSource {
    analyses: BTreeMap<String, LlmSignals>,
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_lowercase()
}

impl PrecomputedLlmSource {
    pub fn from_file(path: &Path) -> Result<Self, InfrastructureError> {
        let raw: BTreeMap<String, LlmSignals> = load_document(path)?;
        info!(path = ?path, pages = raw.len(), "Loaded precomputed LLM analyses");
        Ok(Self::from_map(raw))
    }

    pub fn from_map(analyses: BTreeMap<String, LlmSignals>) -> Self {
        Self {
            analyses: analyses
                .into_iter()
                .map(|(url, signals)| (normalize(&url), signals))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.analyses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }
}

#[async_trait]
impl LlmAnalysisSource for PrecomputedLlmSource {
    fn name(&self) -> &str {
        "precomputed"
    }

    async fn analyze(&self, ctx: &RuleContext) -> Result<LlmSignals, AivisError> {
        match self.analyses.get(&normalize(&ctx.url)) {
            Some(signals) => Ok(signals.clone()),
            None => {
                debug!(url = %ctx.url, "No precomputed analysis for page");
                Ok(LlmSignals::none())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::page::PageCategory;
    use anyhow::Result;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_lookup_ignores_trailing_slash_and_case() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("llm.yaml");
        std::fs::write(
            &path,
            r#"
"https://Example.com/blog/post/":
  authority:
    has_author: true
    citation_count: 4
  structure: null
"#,
        )?;
        let source = PrecomputedLlmSource::from_file(&path)?;
        assert_eq!(source.len(), 1);

        let ctx = RuleContext::new("https://example.com/blog/post", PageCategory::BlogArticle);
        let signals = source.analyze(&ctx).await?;
        assert_eq!(signals.authority.available().unwrap().citation_count, 4);
        assert!(!signals.structure.is_available());
        assert_eq!(signals.available_count(), 1);

        let other = RuleContext::new("https://example.com/other", PageCategory::Guide);
        assert_eq!(source.analyze(&other).await?, LlmSignals::none());
        Ok(())
    }
}
