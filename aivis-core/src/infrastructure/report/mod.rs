// aivis-core/src/infrastructure/report/mod.rs

pub mod markdown;
pub mod structured;

pub use markdown::MarkdownRenderer;
pub use structured::{JsonRenderer, YamlRenderer};

use crate::application::ports::ReportRenderer;
use crate::error::AivisError;
use std::fmt;
use std::str::FromStr;

/// Document formats a report can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
    Yaml,
}

impl ReportFormat {
    pub fn renderer(self) -> Result<Box<dyn ReportRenderer>, AivisError> {
        Ok(match self {
            Self::Markdown => Box::new(MarkdownRenderer::new()?),
            Self::Json => Box::new(JsonRenderer),
            Self::Yaml => Box::new(YamlRenderer),
        })
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Yaml => "yaml",
        };
        write!(f, "{}", name)
    }
}
