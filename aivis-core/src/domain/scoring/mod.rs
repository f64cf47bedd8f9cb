// aivis-core/src/domain/scoring/mod.rs

pub mod aggregate;
pub mod applicability;
pub mod descriptor;
pub mod dimension;
pub mod issue;
pub mod registry;
pub mod report;
pub mod result;
pub mod rule;

// Re-exports
pub use aggregate::{
    DimensionScore, EvaluationStatus, NOMINAL_TOTAL_WEIGHT, RuleEvaluation, aggregate_dimension,
};
pub use applicability::matches;
pub use descriptor::{Applicability, ApplicabilityScope, ExecutionScope, RuleDescriptor};
pub use dimension::Dimension;
pub use issue::{Issue, Severity};
pub use registry::{RuleRegistry, RuleRegistryBuilder, WeightAudit};
pub use report::{DimensionWeights, OverallMode, OverallPolicy, PageScoreReport};
pub use result::{DEFAULT_MAX_SCORE, RuleResult};
pub use rule::Rule;
