// aivis-core/src/infrastructure/input/pages.rs

// Page inputs are RuleContext documents written by the crawler, one page per
// file, in JSON or YAML.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::domain::page::RuleContext;
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> Option<DocumentFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(DocumentFormat::Json),
        "yaml" | "yml" => Some(DocumentFormat::Yaml),
        _ => None,
    }
}

/// Deserializes a JSON or YAML document, picking the parser from the extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let format = format_of(path)
        .ok_or_else(|| InfrastructureError::UnsupportedInput(path.display().to_string()))?;
    if !path.is_file() {
        return Err(InfrastructureError::InputNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    let document = match format {
        DocumentFormat::Json => serde_json::from_str(&content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    Ok(document)
}

pub fn load_context(path: &Path) -> Result<RuleContext, InfrastructureError> {
    let ctx: RuleContext = load_document(path)?;
    debug!(path = ?path, url = %ctx.url, category = %ctx.category, "Page input loaded");
    if ctx.clock_defaulted {
        warn!(
            path = ?path,
            evaluated_at = %ctx.evaluated_at.to_rfc3339(),
            "No evaluated_at in page input; age-based scores use the current time"
        );
    }
    Ok(ctx)
}

/// A single file, or every JSON/YAML file under a directory, sorted by path.
pub fn discover_inputs(root: &Path) -> Result<Vec<PathBuf>, InfrastructureError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.is_dir() {
        return Err(InfrastructureError::InputNotFound(root.display().to_string()));
    }

    let mut inputs: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && format_of(entry.path()).is_some())
        .map(|entry| entry.into_path())
        .collect();
    inputs.sort();
    Ok(inputs)
}

#[instrument(skip(root), fields(root = %root.display()))]
pub fn load_contexts(root: &Path) -> Result<Vec<RuleContext>, InfrastructureError> {
    let inputs = discover_inputs(root)?;
    info!(files = inputs.len(), "Loading page inputs");
    inputs.iter().map(|path| load_context(path)).collect()
}
