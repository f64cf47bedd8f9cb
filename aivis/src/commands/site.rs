// aivis/src/commands/site.rs
//
// USE CASE: Score site-wide aggregates (domain pass).

use anyhow::Context;
use std::path::{Path, PathBuf};

use aivis_core::infrastructure::input::load_context;

use super::{build_scorer, emit_reports};
use crate::cli::OutputFormat;

pub async fn execute(
    config_dir: &Path,
    input: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let scorer = build_scorer(config_dir, None)?;
    let ctx = load_context(&input)
        .with_context(|| format!("Failed to load site input from {}", input.display()))?;
    if ctx.site.is_none() {
        anyhow::bail!("{} has no `site:` section", input.display());
    }

    let report = scorer.score_site(ctx).await;
    emit_reports(&[report], format, output.as_deref())
}
