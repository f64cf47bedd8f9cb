// aivis-core/src/ports/llm.rs

// What the scorer needs from an LLM analysis provider, without knowing
// whether the judgments come from a live model, a cache or a file.

use crate::domain::page::{LlmSignals, RuleContext};
use crate::error::AivisError;
use async_trait::async_trait;

#[async_trait]
pub trait LlmAnalysisSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Returns whatever dimension analyses are available for the page.
    /// Slots the provider cannot fill stay `NotAvailable`; an `Err` means the
    /// provider itself failed and the page falls back to heuristics.
    async fn analyze(&self, ctx: &RuleContext) -> Result<LlmSignals, AivisError>;
}
