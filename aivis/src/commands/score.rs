// aivis/src/commands/score.rs
//
// USE CASE: Score page inputs (page pass).

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

use aivis_core::infrastructure::input::load_contexts;

use super::{build_scorer, emit_reports};
use crate::cli::OutputFormat;

pub async fn execute(
    config_dir: &Path,
    input: PathBuf,
    llm: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let scorer = build_scorer(config_dir, llm.as_deref())?;
    let contexts = load_contexts(&input)
        .with_context(|| format!("Failed to load page inputs from {}", input.display()))?;
    if contexts.is_empty() {
        anyhow::bail!("No JSON or YAML page inputs found under {}", input.display());
    }

    let start = std::time::Instant::now();
    let reports = scorer.score_pages(contexts).await;
    info!(pages = reports.len(), elapsed = ?start.elapsed(), "Scoring finished");

    emit_reports(&reports, format, output.as_deref())
}
