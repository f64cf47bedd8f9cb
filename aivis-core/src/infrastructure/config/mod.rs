pub mod engine;

pub use crate::domain::configuration::{EngineConfig, EngineSettings};
pub use engine::{apply_env_overrides, load_engine_config, parse_engine_config};
