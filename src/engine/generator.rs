// ABOUTME: Generation run orchestration from template and parameter table to job files
// ABOUTME: Validates once up front, then renders and writes each row in table order

use std::path::PathBuf;
use tracing::{info, instrument, warn};

use super::error::{GenerationError, Result};
use super::result::{GenerationSummary, JobOutcome};
use crate::output::{DryRunWriter, FileWriter, JobWriter, OutputConfig};
use crate::table::{ParameterTable, TableLoader};
use crate::template::{JobNaming, Renderer, Template};

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub template: PathBuf,
    pub parameters: PathBuf,
    pub output: OutputConfig,
    pub naming: JobNaming,
    pub dry_run: bool,
}

impl GenerationRequest {
    pub fn new(template: impl Into<PathBuf>, parameters: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            parameters: parameters.into(),
            output: OutputConfig::default(),
            naming: JobNaming::default(),
            dry_run: false,
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_naming(mut self, naming: JobNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

pub struct Generator {
    loader: TableLoader,
    writer: Box<dyn JobWriter>,
}

impl Generator {
    /// Generator that writes job files to disk
    pub fn new() -> Self {
        Self::with_writer(Box::new(FileWriter::new()))
    }

    pub fn with_writer(writer: Box<dyn JobWriter>) -> Self {
        Self {
            loader: TableLoader::new(),
            writer,
        }
    }

    /// Pick the file writer or the dry-run writer for `request`
    pub fn for_request(request: &GenerationRequest) -> Self {
        if request.dry_run {
            Self::with_writer(Box::new(DryRunWriter::new()))
        } else {
            Self::new()
        }
    }

    /// Load both inputs, validate, and write one job file per row
    #[instrument(skip(self, request), fields(template = %request.template.display()))]
    pub async fn run(&self, request: &GenerationRequest) -> Result<GenerationSummary> {
        let (table, template) = tokio::join!(
            self.loader.load(&request.parameters),
            Template::load(&request.template)
        );
        let (table, template) = GenerationError::from_loads(table, template)?;

        let mut summary = self
            .generate(template, &table, &request.output, &request.naming)
            .await?;
        summary.template = Some(request.template.clone());
        summary.parameters = Some(request.parameters.clone());
        summary.dry_run = request.dry_run;
        Ok(summary)
    }

    /// Render `template` for every row of an already loaded table.
    ///
    /// Fails without writing anything if validation fails. Individual write
    /// failures are recorded in the summary and do not stop later rows.
    pub async fn generate(
        &self,
        template: Template,
        table: &ParameterTable,
        output: &OutputConfig,
        naming: &JobNaming,
    ) -> Result<GenerationSummary> {
        let renderer = Renderer::for_table(template, table, naming.clone())?;

        let mut summary = GenerationSummary::new(output.directory().to_path_buf());
        summary.warnings = renderer.report().warnings.clone();

        info!(
            "Generating {} job file(s) into {}",
            table.len(),
            output.directory().display()
        );

        for (index, row) in table.iter().enumerate() {
            let outcome = match renderer.render(row, index) {
                Ok(result) => match self.writer.write(&result, output).await {
                    Ok(path) => JobOutcome::written(index, row.line(), result.job_name, path),
                    Err(e) => {
                        warn!("Job {} failed: {}", result.job_name, e);
                        JobOutcome::failed(index, row.line(), result.job_name, e.to_string())
                    }
                },
                Err(e) => {
                    let job_name = naming.job_name(row, index);
                    warn!("Job {} failed to render: {}", job_name, e);
                    JobOutcome::failed(index, row.line(), job_name, e.to_string())
                }
            };
            summary.add_outcome(outcome);
        }

        summary.mark_completed();
        info!(
            "Generation finished: {} written, {} failed",
            summary.written_jobs, summary.failed_jobs
        );
        Ok(summary)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::result::RunStatus;
    use crate::output::OutputError;
    use crate::template::RenderResult;
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Fails for one job name, succeeds for the rest without touching disk
    struct FailingWriter {
        fail_on: &'static str,
    }

    #[async_trait]
    impl JobWriter for FailingWriter {
        async fn write(
            &self,
            result: &RenderResult,
            config: &OutputConfig,
        ) -> crate::output::Result<PathBuf> {
            let path = config.path_for(&result.job_name);
            if result.job_name == self.fail_on {
                Err(OutputError::Write {
                    path,
                    message: "disk full".to_string(),
                })
            } else {
                Ok(path)
            }
        }
    }

    fn demo_table() -> ParameterTable {
        ParameterTable::from_csv_str(
            "JOB_NAME,TARGET_ELSET\ndemo_case_01,ELEMENT_SET_A\ndemo_case_02,ELEMENT_SET_B\n",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_writes_every_row() {
        let temp_dir = TempDir::new().unwrap();
        let output = OutputConfig::new(temp_dir.path());
        let template = Template::new("*EL PRINT, ELSET={{TARGET_ELSET}}\nS, {{JOB_NAME}}");

        let summary = Generator::new()
            .generate(template, &demo_table(), &output, &JobNaming::default())
            .await
            .unwrap();

        assert_eq!(summary.written_jobs, 2);
        assert_eq!(summary.status, RunStatus::Success);
        let content = std::fs::read_to_string(temp_dir.path().join("demo_case_02.inp")).unwrap();
        assert_eq!(content, "*EL PRINT, ELSET=ELEMENT_SET_B\nS, demo_case_02");
    }

    #[tokio::test]
    async fn test_validation_failure_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let output = OutputConfig::new(temp_dir.path().join("jobs"));
        let template = Template::new("{{MISSING_COL}}");

        let err = Generator::new()
            .generate(template, &demo_table(), &output, &JobNaming::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("MISSING_COL"));
        assert!(!temp_dir.path().join("jobs").exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_isolated() {
        let generator = Generator::with_writer(Box::new(FailingWriter {
            fail_on: "demo_case_01",
        }));
        let template = Template::new("{{TARGET_ELSET}}");

        let summary = generator
            .generate(
                template,
                &demo_table(),
                &OutputConfig::new("jobs"),
                &JobNaming::default(),
            )
            .await
            .unwrap();

        assert_eq!(summary.total_jobs, 2);
        assert_eq!(summary.failed_jobs, 1);
        assert_eq!(summary.written_jobs, 1);
        assert_eq!(summary.status, RunStatus::PartialSuccess);

        let failure = summary.failures().next().unwrap();
        assert_eq!(failure.job_name, "demo_case_01");
        assert_eq!(failure.line, 2);
        assert!(failure.error.as_deref().unwrap().contains("disk full"));
    }
}
