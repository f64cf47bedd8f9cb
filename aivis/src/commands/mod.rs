// aivis/src/commands/mod.rs

pub mod check;
pub mod rules;
pub mod score;
pub mod site;

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::Path;
use std::sync::Arc;

use aivis_core::PageScorer;
use aivis_core::domain::scoring::PageScoreReport;
use aivis_core::domain::{Dimension, EngineConfig};
use aivis_core::infrastructure::config::load_engine_config;
use aivis_core::infrastructure::fs::write_report;
use aivis_core::infrastructure::llm::PrecomputedLlmSource;
use aivis_core::infrastructure::report::ReportFormat;

use crate::cli::OutputFormat;

/// Wires config, registry and the optional LLM source into a scorer.
pub fn build_scorer(config_dir: &Path, llm: Option<&Path>) -> anyhow::Result<PageScorer> {
    let config: EngineConfig = load_engine_config(config_dir)
        .with_context(|| format!("Failed to load configuration from {}", config_dir.display()))?;
    let registry = aivis_core::default_registry(&config.rules)?;
    let mut scorer = PageScorer::new(Arc::new(registry), &config);

    if let Some(path) = llm {
        let source = PrecomputedLlmSource::from_file(path)
            .with_context(|| format!("Failed to load LLM analyses from {}", path.display()))?;
        scorer = scorer.with_llm_source(Arc::new(source));
    }
    Ok(scorer)
}

/// Prints reports to stdout in `format` and, with `output`, writes one
/// document per report.
pub fn emit_reports(
    reports: &[PageScoreReport],
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => println!("{}", summary_table(reports)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(reports)?),
        OutputFormat::Markdown => {
            let renderer = ReportFormat::Markdown.renderer()?;
            for report in reports {
                println!("{}", renderer.render(report)?);
            }
        }
    }

    if let Some(dir) = output {
        // The terminal table has no file form; write markdown instead.
        let file_format = match format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Yaml => ReportFormat::Yaml,
            OutputFormat::Table | OutputFormat::Markdown => ReportFormat::Markdown,
        };
        let renderer = file_format.renderer()?;
        for report in reports {
            let path = write_report(dir, report, renderer.as_ref())?;
            eprintln!("📄 Report written to {}", path.display());
        }
    }
    Ok(())
}

fn summary_table(reports: &[PageScoreReport]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["URL".to_string(), "Category".to_string(), "Overall".to_string()];
    header.extend(Dimension::ALL.iter().map(|d| d.to_string()));
    header.push("Issues".to_string());
    table.set_header(header);

    for report in reports {
        let mut row = vec![
            report.url.clone(),
            report.category.to_string(),
            format!("{:.1}", report.overall_score),
        ];
        row.extend(Dimension::ALL.iter().map(|d| {
            report
                .dimension(*d)
                .map_or_else(|| "-".to_string(), |score| format!("{:.1}", score.score))
        }));
        row.push(report.issue_count().to_string());
        table.add_row(row);
    }
    table
}
