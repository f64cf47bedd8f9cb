// aivis-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::scoring::{Dimension, ExecutionScope};

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Rule '{0}' is registered more than once")]
    #[diagnostic(
        code(aivis::domain::duplicate_rule),
        help("Rule ids must be unique across all dimensions.")
    )]
    DuplicateRule(String),

    #[error("Rule '{rule_id}' declares weight {weight}, expected a fraction in [0, 1]")]
    #[diagnostic(code(aivis::domain::invalid_weight))]
    InvalidWeight { rule_id: String, weight: f64 },

    #[error("Weights for {dimension} ({scope}) sum to {total:.3}, which exceeds the nominal total of 1.0")]
    #[diagnostic(
        code(aivis::domain::weight_overflow),
        help("Lower a rule weight or the reserved remainder for this dimension.")
    )]
    WeightOverflow {
        dimension: Dimension,
        scope: ExecutionScope,
        total: f64,
    },

    #[error("Reserved weight {weight} for {dimension} is outside [0, 1]")]
    #[diagnostic(code(aivis::domain::invalid_reservation))]
    InvalidReservation { dimension: Dimension, weight: f64 },
}

/// Failure raised by a rule body. Only malformed input is expected here:
/// missing signals and absent LLM analysis degrade inside the rule instead.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum RuleError {
    #[error("Malformed context: {0}")]
    #[diagnostic(code(aivis::rule::malformed_context))]
    MalformedContext(String),

    #[error("Rule failed: {0}")]
    #[diagnostic(code(aivis::rule::internal))]
    Internal(String),
}
