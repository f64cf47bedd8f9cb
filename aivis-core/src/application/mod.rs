// aivis-core/src/application/mod.rs

pub mod evaluator;
pub mod ports;
pub mod scorer;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI peut faire `use aivis_core::application::{PageScorer, RuleEvaluator};`

pub use evaluator::RuleEvaluator;
pub use scorer::PageScorer;
