// aivis-core/src/ports/mod.rs

pub mod llm;

pub use llm::LlmAnalysisSource;
