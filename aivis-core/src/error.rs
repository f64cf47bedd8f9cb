// aivis-core/src/error.rs

use crate::domain::error::{DomainError, RuleError};
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AivisError {
    // --- ERREURS DU DOMAINE (Registry, Rules) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, Templates) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS D'ADAPTATEURS EXTERNES ---
    #[error("LLM analysis unavailable: {0}")]
    LlmUnavailable(String),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for AivisError {
    fn from(err: std::io::Error) -> Self {
        AivisError::Infrastructure(InfrastructureError::Io(err))
    }
}
