// aivis/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use aivis_core::domain::Dimension;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aivis")]
#[command(about = "Rule-based AI visibility scoring for web pages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding aivis.yaml
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    Markdown,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📊 Scores a page input, or every JSON/YAML input under a directory
    Score {
        /// Page input file or directory
        #[arg(long, short)]
        input: PathBuf,

        /// Precomputed LLM analyses (URL -> per-dimension judgments)
        #[arg(long)]
        llm: Option<PathBuf>,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write one report per page into this directory
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// 🌐 Scores site-wide signals with the domain-scoped rules
    Site {
        /// Site input file (a page context carrying `site:` aggregates)
        #[arg(long, short)]
        input: PathBuf,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// 📜 Lists the registered rules
    Rules {
        /// Only rules of this dimension (authority, freshness, structure, technical)
        #[arg(long, short)]
        dimension: Option<Dimension>,
    },

    /// ✅ Validates aivis.yaml and audits rule weights
    Check,
}
