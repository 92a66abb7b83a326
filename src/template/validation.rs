// ABOUTME: One-shot validation of a template against a parameter table header
// ABOUTME: Collects every unresolved token and naming problem before any row is rendered

use std::collections::{BTreeSet, HashMap};

use super::engine::Template;
use super::error::{Result, TemplateError, ValidationError};
use super::naming::JobNaming;
use crate::table::ParameterTable;

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub tokens: BTreeSet<String>,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    pub is_valid: bool,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    /// Turn collected errors into a single `TemplateError::Validation`
    pub fn into_result(self) -> Result<Self> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(TemplateError::Validation {
                errors: self.errors,
            })
        }
    }
}

/// Check that every token and the job name column exist in `headers`
pub fn validate<S: AsRef<str>>(
    template: &Template,
    headers: &[S],
    naming: &JobNaming,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.tokens = template.extract_tokens();

    let columns: BTreeSet<&str> = headers.iter().map(AsRef::as_ref).collect();

    let missing: Vec<String> = report
        .tokens
        .iter()
        .filter(|token| !columns.contains(token.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        report
            .errors
            .push(ValidationError::MissingTokens { tokens: missing });
    }

    if !columns.contains(naming.column.as_str()) {
        report.errors.push(ValidationError::MissingJobName {
            column: naming.column.clone(),
        });
    }

    for column in headers.iter().map(AsRef::as_ref) {
        if column != naming.column && !report.tokens.contains(column) {
            report
                .warnings
                .push(format!("column '{}' is not referenced by the template", column));
        }
    }

    report.is_valid = report.errors.is_empty();
    report
}

/// Header validation plus row-level checks that need the whole table
pub fn validate_table(
    template: &Template,
    table: &ParameterTable,
    naming: &JobNaming,
) -> ValidationReport {
    let mut report = validate(template, table.headers(), naming);

    if report.is_valid {
        let mut seen: HashMap<String, u64> = HashMap::new();
        for (index, row) in table.iter().enumerate() {
            let name = naming.job_name(row, index);
            if let Some(first_line) = seen.get(&name) {
                report.warnings.push(format!(
                    "job name '{}' on line {} repeats line {} and will overwrite its output",
                    name,
                    row.line(),
                    first_line
                ));
            } else {
                seen.insert(name, row.line());
            }
        }
    }

    report
}
