// aivis/src/commands/check.rs
//
// USE CASE: Pre-flight check of configuration and rule weights.

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use std::path::Path;

use aivis_core::infrastructure::config::load_engine_config;

pub fn execute(config_dir: &Path) -> anyhow::Result<()> {
    println!("🔍 Checking configuration in {}...", config_dir.display());
    let config = load_engine_config(config_dir)?;
    println!(
        "   Engine: {} page(s) x {} rule(s) in flight, LLM timeout {} ms",
        config.engine.page_concurrency, config.engine.rule_concurrency, config.engine.llm_timeout_ms
    );

    let registry = aivis_core::default_registry(&config.rules)?;
    let audits = registry.weight_audit();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Dimension", "Scope", "Rules", "Registered", "Reserved", "Unaccounted",
    ]);
    for audit in &audits {
        table.add_row(vec![
            audit.dimension.to_string(),
            audit.scope.to_string(),
            audit.rule_count.to_string(),
            format!("{:.2}", audit.registered),
            format!("{:.2}", audit.reserved),
            format!("{:.2}", audit.unaccounted),
        ]);
    }
    println!("{table}");

    let leaks: Vec<_> = audits.iter().filter(|a| !a.is_conserved()).collect();
    if !leaks.is_empty() {
        for audit in &leaks {
            eprintln!(
                "   ❌ {} ({}) leaves {:.2} of its weight undeclared",
                audit.dimension, audit.scope, audit.unaccounted
            );
        }
        anyhow::bail!("{} dimension(s) do not conserve weight", leaks.len());
    }

    println!("✅ Configuration valid, {} rules registered", registry.len());
    Ok(())
}
