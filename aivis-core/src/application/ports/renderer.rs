// aivis-core/src/application/ports/renderer.rs

use crate::domain::scoring::PageScoreReport;
use crate::error::AivisError;

/// Turns a finished report into a document (markdown, JSON, YAML...).
pub trait ReportRenderer: Send + Sync {
    /// File extension of the rendered document, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, report: &PageScoreReport) -> Result<String, AivisError>;
}
