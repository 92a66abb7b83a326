// ABOUTME: Command implementations for the inpgen CLI
// ABOUTME: Handles execution of generate, validate, and tokens commands

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use super::config::Config;
use crate::engine::{GenerationError, GenerationRequest, Generator};
use crate::table::TableLoader;
use crate::template::{validate_table, Template};

/// Options of the generate command after flag parsing
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub jobs_dir: Option<PathBuf>,
    pub job_column: Option<String>,
    pub suffix: Option<String>,
    pub no_sanitize: bool,
    pub no_overwrite: bool,
    pub dry_run: bool,
    pub summary: Option<PathBuf>,
}

/// Generate one job file per parameter row
pub async fn generate_jobs(
    template: PathBuf,
    params: PathBuf,
    options: GenerateOptions,
    config: &Config,
) -> Result<()> {
    info!(
        "Generating jobs from {} with {}",
        template.display(),
        params.display()
    );

    let mut naming = config.naming(options.job_column);
    if options.no_sanitize {
        naming = naming.with_sanitize(false);
    }

    let mut output = config.output(options.jobs_dir);
    if let Some(suffix) = options.suffix {
        output = output.with_suffix(suffix);
    }
    if options.no_overwrite {
        output = output.with_overwrite(false);
    }

    let request = GenerationRequest::new(template, params)
        .with_output(output)
        .with_naming(naming)
        .with_dry_run(options.dry_run);

    let summary = Generator::for_request(&request)
        .run(&request)
        .await
        .map_err(|e| anyhow::anyhow!("Generation failed: {}", e))?;

    if let Some(summary_path) = options.summary {
        let json_content = summary
            .to_json()
            .map_err(|e| anyhow::anyhow!("Failed to serialize summary to JSON: {}", e))?;

        std::fs::write(&summary_path, json_content).map_err(|e| {
            anyhow::anyhow!(
                "Failed to write summary file '{}': {}",
                summary_path.display(),
                e
            )
        })?;

        info!("Summary written to: {}", summary_path.display());
    }

    for warning in &summary.warnings {
        println!("warning: {}", warning);
    }

    if request.dry_run {
        println!(
            "Dry run: {} job file(s) would be generated in {}",
            summary.distinct_files(),
            summary.output_dir.display()
        );
    } else {
        println!(
            "Successfully generated {} job file(s).",
            summary.distinct_files()
        );
    }

    for failure in summary.failures() {
        println!(
            "  Job '{}' (line {}) failed: {}",
            failure.job_name,
            failure.line,
            failure.error.as_deref().unwrap_or("unknown error")
        );
    }

    // Non-zero exit when any row failed
    if summary.has_failures() {
        return Err(anyhow::anyhow!(
            "{} of {} job file(s) failed",
            summary.failed_jobs,
            summary.total_jobs
        ));
    }

    Ok(())
}

/// Validate a template against a parameter table
pub async fn validate_inputs(
    template_path: PathBuf,
    params: PathBuf,
    job_column: Option<String>,
    config: &Config,
) -> Result<()> {
    info!("Validating template: {}", template_path.display());

    let loader = TableLoader::new();
    let (table, template) = tokio::join!(
        loader.load(&params),
        Template::load(&template_path)
    );
    let (table, template) = GenerationError::from_loads(table, template)
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let naming = config.naming(job_column);
    let report = validate_table(&template, &table, &naming);

    println!("Template: {}", template_path.display());
    println!("  Tokens: {}", join_or_none(report.tokens.iter()));
    println!("  Columns: {}", join_or_none(table.headers().iter()));
    println!("  Rows: {}", table.len());
    println!("  Job name column: {}", naming.column);

    for warning in &report.warnings {
        println!("warning: {}", warning);
    }

    if !report.is_valid {
        for error in &report.errors {
            println!("error: {}", error);
        }
        return Err(anyhow::anyhow!(
            "Validation failed with {} error(s)",
            report.errors.len()
        ));
    }

    println!("✓ Template is valid for {} job(s)", table.len());
    info!("Validation completed successfully");

    Ok(())
}

/// Print the tokens referenced by a template, one per line
pub async fn list_tokens(template_path: PathBuf) -> Result<()> {
    let template = Template::load(&template_path).await?;
    let tokens = template.extract_tokens();

    info!(
        "Template {} references {} token(s)",
        template_path.display(),
        tokens.len()
    );

    for token in &tokens {
        println!("{}", token);
    }

    Ok(())
}

fn join_or_none<'a, I>(items: I) -> String
where
    I: Iterator<Item = &'a String>,
{
    let joined = items.map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}
