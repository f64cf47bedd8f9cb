// aivis-core/src/infrastructure/config/engine.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::configuration::EngineConfig;
use crate::domain::scoring::OverallMode;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["aivis.yaml", "aivis_config.yaml"];

// --- LOADER ---

/// Loads `aivis.yaml` from `dir`, falling back to defaults when no file
/// exists, then applies `AIVIS_*` environment overrides and validates.
#[instrument(skip(dir))]
pub fn load_engine_config(dir: &Path) -> Result<EngineConfig, InfrastructureError> {
    let mut config = match find_config(dir) {
        Some(path) => {
            info!(path = ?path, "Loading engine configuration");
            let content = fs::read_to_string(&path)?;
            parse_engine_config(&content)?
        }
        None => {
            info!("No aivis.yaml found, using built-in defaults");
            EngineConfig::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Parses and validates a configuration document. An empty document yields defaults.
pub fn parse_engine_config(content: &str) -> Result<EngineConfig, InfrastructureError> {
    let config: EngineConfig = if content.trim().is_empty() {
        EngineConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };
    config.validate()?;
    Ok(config)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
}

/// Layering: `AIVIS_OVERALL_MODE=mean aivis score ...`. The lookup is injected
/// so callers (and tests) control where variables come from.
pub fn apply_env_overrides<F>(config: &mut EngineConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("AIVIS_OVERALL_MODE") {
        let mode: OverallMode = val.parse().map_err(InfrastructureError::ConfigError)?;
        info!(old = ?config.overall.mode, new = ?mode, "Overriding overall mode via ENV");
        config.overall.mode = mode;
    }
    if let Some(val) = lookup("AIVIS_PAGE_CONCURRENCY") {
        let value: usize = parse_number("AIVIS_PAGE_CONCURRENCY", &val)?;
        info!(old = config.engine.page_concurrency, new = value, "Overriding page concurrency via ENV");
        config.engine.page_concurrency = value;
    }
    if let Some(val) = lookup("AIVIS_LLM_TIMEOUT_MS") {
        let value: u64 = parse_number("AIVIS_LLM_TIMEOUT_MS", &val)?;
        info!(old = config.engine.llm_timeout_ms, new = value, "Overriding LLM timeout via ENV");
        config.engine.llm_timeout_ms = value;
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, InfrastructureError> {
    raw.trim().parse().map_err(|_| {
        warn!(key, value = raw, "Rejected environment override");
        InfrastructureError::ConfigError(format!("{} must be a positive integer, got '{}'", key, raw))
    })
}
