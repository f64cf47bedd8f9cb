// aivis-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contracts with external collaborators (LLM analysis adapter).
pub mod ports;

// 2. Domain (Cœur du métier)
// Rules, applicability, registry, aggregation. Depends on nothing else.
pub mod domain;

// 3. Infrastructure (Adapters)
// Config files, page inputs, precomputed LLM results, report rendering.
pub mod infrastructure;

// 4. Application (Use Cases)
// Rule evaluation orchestration and page scoring.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::{PageScorer, RuleEvaluator};
pub use domain::rules::default_registry;
pub use error::AivisError;
