// ABOUTME: Error types for template loading, validation, and rendering
// ABOUTME: Validation errors are collected so a run can report every problem at once

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found or unreadable: {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template validation failed: {}", join_errors(.errors))]
    Validation { errors: Vec<ValidationError> },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("template references unknown token(s): {}", .tokens.join(", "))]
    MissingTokens { tokens: Vec<String> },

    #[error("job name column '{column}' is not present in the parameter table")]
    MissingJobName { column: String },
}

impl TemplateError {
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            TemplateError::Validation { errors } => errors,
            _ => &[],
        }
    }

    /// Every token name reported as unresolved, across all validation errors
    pub fn missing_tokens(&self) -> Vec<&str> {
        self.validation_errors()
            .iter()
            .filter_map(|e| match e {
                ValidationError::MissingTokens { tokens } => Some(tokens),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

impl From<ValidationError> for TemplateError {
    fn from(error: ValidationError) -> Self {
        TemplateError::Validation {
            errors: vec![error],
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, TemplateError>;
