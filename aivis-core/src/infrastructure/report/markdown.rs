// aivis-core/src/infrastructure/report/markdown.rs

use minijinja::Environment;
use serde_json::json;

use crate::application::ports::ReportRenderer;
use crate::domain::scoring::{EvaluationStatus, PageScoreReport};
use crate::error::AivisError;
use crate::infrastructure::error::InfrastructureError;

const REPORT_TEMPLATE: &str = r#"# AI Visibility Report: {{ url }}

- **Category:** {{ category }}
- **Scope:** {{ scope }}
- **Evaluated at:** {{ evaluated_at }}{% if clock_defaulted %} (no timestamp in input; run time used){% endif %}
- **Overall score:** {{ overall_score | score }}/100

## Dimensions

| Dimension | Score | Rules run | Failed |
|---|---|---|---|
{% for d in dimensions %}
| {{ d.name | title }} | {{ d.score | score }} | {{ d.rules | length }} | {{ d.failed }} |
{% endfor %}
{% for d in dimensions %}

### {{ d.name | title }} ({{ d.score | score }})

{% for r in d.rules %}
- `{{ r.id }}` weight {{ r.weight }}: {{ r.score | score }}{% if r.failure %} (failed: {{ r.failure }}){% endif %}

{% endfor %}
{% if d.evidence %}

Evidence:
{% for e in d.evidence %}
- {{ e }}
{% endfor %}
{% endif %}
{% endfor %}

## Issues
{% if issues %}

{% for i in issues %}
- **[{{ i.severity | upper }}]** {{ i.title }} ({{ i.dimension }}): {{ i.recommendation }}
{% endfor %}
{% else %}

No issues found.
{% endif %}
"#;

fn format_score(value: f64) -> String {
    format!("{:.1}", value)
}

pub struct MarkdownRenderer {
    env: Environment<'static>,
}

impl MarkdownRenderer {
    pub fn new() -> Result<Self, InfrastructureError> {
        Self::with_template(REPORT_TEMPLATE)
    }

    /// Compiles `source` as the report template; syntax errors fail here.
    pub fn with_template(source: &'static str) -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("score", format_score);
        env.add_template("report.md", source)?;
        Ok(Self { env })
    }
}

impl ReportRenderer for MarkdownRenderer {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, report: &PageScoreReport) -> Result<String, AivisError> {
        let dimensions: Vec<_> = report
            .dimensions
            .iter()
            .map(|d| {
                let rules: Vec<_> = d
                    .rules
                    .iter()
                    .map(|r| {
                        let failure = match &r.status {
                            EvaluationStatus::Failed { reason } => Some(reason.clone()),
                            EvaluationStatus::Scored => None,
                        };
                        json!({
                            "id": r.descriptor.id,
                            "weight": r.descriptor.weight,
                            "score": r.result.score,
                            "failure": failure,
                        })
                    })
                    .collect();
                json!({
                    "name": d.dimension.as_str(),
                    "score": d.score,
                    "rules": rules,
                    "failed": d.failed_rules().count(),
                    "evidence": d.evidence,
                })
            })
            .collect();

        let issues: Vec<_> = report
            .prioritized_issues()
            .into_iter()
            .map(|(dimension, issue)| {
                json!({
                    "dimension": dimension.as_str(),
                    "severity": issue.severity.as_str(),
                    "title": issue.title,
                    "recommendation": issue.recommendation,
                })
            })
            .collect();

        let context = json!({
            "url": report.url,
            "category": report.category.as_str(),
            "scope": report.scope.as_str(),
            "evaluated_at": report.evaluated_at.to_rfc3339(),
            "clock_defaulted": report.clock_defaulted,
            "overall_score": report.overall_score,
            "dimensions": dimensions,
            "issues": issues,
        });

        let template = self
            .env
            .get_template("report.md")
            .map_err(InfrastructureError::TemplateError)?;
        Ok(template
            .render(&context)
            .map_err(InfrastructureError::TemplateError)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::page::{PageCategory, RuleContext};
    use crate::domain::scoring::{
        Dimension, ExecutionScope, Issue, OverallPolicy, RuleDescriptor, RuleEvaluation, RuleResult,
        aggregate_dimension,
    };
    use chrono::{TimeZone, Utc};

    fn report() -> PageScoreReport {
        let ctx = RuleContext::new("https://example.com/", PageCategory::Homepage)
            .at(Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap());
        let base = RuleDescriptor::new("authority.base", "Authority Baseline", Dimension::Authority)
            .weight(0.2);
        let author =
            RuleDescriptor::new("authority.author_presence", "Author Presence", Dimension::Authority)
                .weight(0.4);
        let authority = aggregate_dimension(
            Dimension::Authority,
            vec![
                RuleEvaluation::scored(base, RuleResult::new(100.0).with_evidence("Page is published")),
                RuleEvaluation::scored(
                    author,
                    RuleResult::new(0.0)
                        .with_evidence("No author byline found")
                        .with_issue(Issue::high("No author attribution", "Add a byline.")),
                ),
            ],
        );
        PageScoreReport::assemble(&ctx, ExecutionScope::Page, vec![authority], &OverallPolicy::default())
    }

    #[test]
    fn test_markdown_report_sections() -> anyhow::Result<()> {
        let rendered = MarkdownRenderer::new()?.render(&report())?;
        assert!(rendered.starts_with("# AI Visibility Report: https://example.com/\n"));
        assert!(rendered.contains("- **Overall score:** 20.0/100"));
        assert!(!rendered.contains("run time used"));
        assert!(rendered.contains("| Authority | 20.0 | 2 | 0 |"));
        assert!(rendered.contains("- `authority.author_presence` weight 0.4: 0.0"));
        assert!(rendered.contains("- **[HIGH]** No author attribution (authority): Add a byline."));
        Ok(())
    }

    #[test]
    fn test_empty_report_has_no_issues_line() -> anyhow::Result<()> {
        let ctx = RuleContext::new("https://example.com/", PageCategory::Homepage);
        let empty =
            PageScoreReport::assemble(&ctx, ExecutionScope::Page, Vec::new(), &OverallPolicy::default());
        let rendered = MarkdownRenderer::new()?.render(&empty)?;
        assert!(rendered.contains("No issues found."));
        assert!(rendered.contains("(no timestamp in input; run time used)"));
        Ok(())
    }

    #[test]
    fn test_broken_template_fails_at_construction() {
        let err = MarkdownRenderer::with_template("{% for d in dimensions %}{{ d.name }")
            .err()
            .unwrap();
        assert!(matches!(err, InfrastructureError::TemplateError(_)));
        assert!(!err.to_string().contains("template not found"));
    }
}
