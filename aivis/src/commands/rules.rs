// aivis/src/commands/rules.rs
//
// USE CASE: List the rule catalogue.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use std::path::Path;

use aivis_core::domain::Dimension;
use aivis_core::infrastructure::config::load_engine_config;

pub fn execute(config_dir: &Path, dimension: Option<Dimension>) -> anyhow::Result<()> {
    let config = load_engine_config(config_dir)?;
    let registry = aivis_core::default_registry(&config.rules)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Rule", "Dimension", "Scope", "Weight", "Priority", "Applies to", "LLM",
    ]);

    let dimensions = match dimension {
        Some(d) => vec![d],
        None => Dimension::ALL.to_vec(),
    };
    let mut count = 0;
    for d in dimensions {
        for rule in registry.rules_for(d) {
            let descriptor = rule.descriptor();
            table.add_row(vec![
                descriptor.id.clone(),
                descriptor.dimension.to_string(),
                descriptor.execution_scope.to_string(),
                format!("{:.2}", descriptor.weight),
                descriptor.priority.to_string(),
                descriptor.applicability.to_string(),
                if descriptor.llm_eligible { "yes" } else { "no" }.to_string(),
            ]);
            count += 1;
        }
    }

    println!("{table}");
    println!("{} rule(s)", count);
    Ok(())
}
