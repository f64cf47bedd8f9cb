// aivis-core/src/domain/page/mod.rs

pub mod category;
pub mod context;
pub mod llm;
pub mod signals;

pub use category::PageCategory;
pub use context::RuleContext;
pub use llm::{
    AuthorityAnalysis, Availability, FreshnessAnalysis, GuideDepth, LlmSignals, StructureAnalysis,
    TechnicalAnalysis,
};
pub use signals::{Author, Heading, PageSignals, SiteSignals};
