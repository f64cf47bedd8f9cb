// aivis-core/src/domain/configuration.rs

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::domain::rules::RuleConstants;
use crate::domain::scoring::OverallPolicy;

/// Root of `aivis.yaml`. Every section is optional.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate, Default)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    #[validate(nested)]
    pub engine: EngineSettings,
    #[validate(nested)]
    pub overall: OverallPolicy,
    #[validate(nested)]
    pub rules: RuleConstants,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Pages evaluated concurrently in a batch.
    #[validate(range(min = 1, max = 256))]
    pub page_concurrency: usize,
    /// Rules of one dimension evaluated concurrently.
    #[validate(range(min = 1, max = 64))]
    pub rule_concurrency: usize,
    /// Upper bound on waiting for the LLM analysis source.
    #[validate(range(min = 1))]
    pub llm_timeout_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            page_concurrency: 8,
            rule_concurrency: 4,
            llm_timeout_ms: 5_000,
        }
    }
}

impl EngineSettings {
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_millis(self.llm_timeout_ms)
    }
}
