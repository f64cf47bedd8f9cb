// aivis-core/src/infrastructure/report/structured.rs

use crate::application::ports::ReportRenderer;
use crate::domain::scoring::PageScoreReport;
use crate::error::AivisError;
use crate::infrastructure::error::InfrastructureError;

pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &PageScoreReport) -> Result<String, AivisError> {
        let mut out = serde_json::to_string_pretty(report).map_err(InfrastructureError::from)?;
        out.push('\n');
        Ok(out)
    }
}

pub struct YamlRenderer;

impl ReportRenderer for YamlRenderer {
    fn extension(&self) -> &'static str {
        "yaml"
    }

    fn render(&self, report: &PageScoreReport) -> Result<String, AivisError> {
        Ok(serde_yaml::to_string(report).map_err(InfrastructureError::from)?)
    }
}
