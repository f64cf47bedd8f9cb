// aivis-core/src/domain/scoring/rule.rs

// The scoring capability. Every concrete rule, built-in or injected, goes
// through this single contract; the registry never looks past it.

use async_trait::async_trait;

use super::descriptor::RuleDescriptor;
use super::result::RuleResult;
use crate::domain::error::RuleError;
use crate::domain::page::RuleContext;

#[async_trait]
pub trait Rule: Send + Sync {
    fn descriptor(&self) -> &RuleDescriptor;

    /// Pure function of `ctx`. Missing signals or absent LLM analysis must
    /// degrade to a heuristic score; only malformed input returns `Err`.
    async fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, RuleError>;
}
