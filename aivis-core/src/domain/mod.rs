pub mod configuration;
pub mod error;
pub mod page;
pub mod rules;
pub mod scoring;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use configuration::{EngineConfig, EngineSettings};
pub use error::{DomainError, RuleError};
pub use page::{PageCategory, PageSignals, RuleContext, SiteSignals};
pub use scoring::{Dimension, Issue, RuleResult, Severity};
