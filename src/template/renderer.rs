// ABOUTME: Validated renderer producing one body and job name per parameter row
// ABOUTME: Free of filesystem side effects; callers decide where results are written

use serde::Serialize;
use tracing::{debug, warn};

use super::engine::Template;
use super::error::Result;
use super::naming::JobNaming;
use super::validation::{validate, validate_table, ValidationReport};
use crate::table::{ParameterTable, Row};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    pub index: usize,
    pub job_name: String,
    pub body: String,
}

/// A template that has already been checked against a table header
#[derive(Debug, Clone)]
pub struct Renderer {
    template: Template,
    naming: JobNaming,
    report: ValidationReport,
}

impl Renderer {
    /// Validate `template` against `headers`; fails with every problem found
    pub fn new<S: AsRef<str>>(
        template: Template,
        headers: &[S],
        naming: JobNaming,
    ) -> Result<Self> {
        let report = validate(&template, headers, &naming);
        Self::from_report(template, naming, report)
    }

    /// Like [`Renderer::new`], and also warns about job names repeated across rows
    pub fn for_table(
        template: Template,
        table: &ParameterTable,
        naming: JobNaming,
    ) -> Result<Self> {
        let report = validate_table(&template, table, &naming);
        Self::from_report(template, naming, report)
    }

    fn from_report(
        template: Template,
        naming: JobNaming,
        report: ValidationReport,
    ) -> Result<Self> {
        let report = report.into_result()?;

        for warning in &report.warnings {
            warn!("{}", warning);
        }
        debug!(
            "Template validated: {} token(s), job names from '{}'",
            report.tokens.len(),
            naming.column
        );

        Ok(Self {
            template,
            naming,
            report,
        })
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Render the row at position `index` of its table
    pub fn render(&self, row: &Row, index: usize) -> Result<RenderResult> {
        let body = self.template.render_row(row)?;
        let job_name = self.naming.job_name(row, index);
        debug!("Rendered job {} from line {}", job_name, row.line());

        Ok(RenderResult {
            index,
            job_name,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_demo_rows() {
        let table = ParameterTable::from_csv_str(
            "JOB_NAME,TARGET_ELSET\ndemo_case_01,ELEMENT_SET_A\ndemo_case_02,ELEMENT_SET_B\n",
        )
        .unwrap();
        let template = Template::new("*EL PRINT, ELSET={{TARGET_ELSET}}\nS, {{JOB_NAME}}");
        let renderer = Renderer::new(template, table.headers(), JobNaming::default()).unwrap();

        let first = renderer.render(&table.rows()[0], 0).unwrap();
        assert_eq!(first.job_name, "demo_case_01");
        assert_eq!(first.body, "*EL PRINT, ELSET=ELEMENT_SET_A\nS, demo_case_01");

        let second = renderer.render(&table.rows()[1], 1).unwrap();
        assert_eq!(second.job_name, "demo_case_02");
        assert_eq!(second.body, "*EL PRINT, ELSET=ELEMENT_SET_B\nS, demo_case_02");
        assert!(!second.body.contains("{{"));
    }

    #[test]
    fn test_construction_fails_on_missing_token() {
        let template = Template::new("{{MISSING_COL}}");
        let err = Renderer::new(template, &["JOB_NAME"], JobNaming::default()).unwrap_err();
        assert_eq!(err.missing_tokens(), vec!["MISSING_COL"]);
    }

    #[test]
    fn test_construction_fails_on_missing_job_column() {
        let template = Template::new("plain");
        let err = Renderer::new(template, &["CASE"], JobNaming::default()).unwrap_err();
        assert!(err.to_string().contains("job name column 'JOB_NAME'"));
    }

    #[test]
    fn test_unreferenced_columns_are_ignored() {
        let table = ParameterTable::from_csv_str("JOB_NAME,EXTRA\nj1,ignored\n").unwrap();
        let renderer =
            Renderer::new(Template::new("static"), table.headers(), JobNaming::default()).unwrap();
        let result = renderer.render(&table.rows()[0], 0).unwrap();
        assert_eq!(result.body, "static");
    }

    #[test]
    fn test_for_table_collects_duplicate_warnings() {
        let table = ParameterTable::from_csv_str("JOB_NAME\nj1\nj1\n").unwrap();
        let renderer =
            Renderer::for_table(Template::new("{{JOB_NAME}}"), &table, JobNaming::default())
                .unwrap();
        assert_eq!(renderer.report().warnings.len(), 1);
    }
}
