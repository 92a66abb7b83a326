// ABOUTME: Template body handling with flat {{NAME}} token substitution
// ABOUTME: Extraction and substitution share one compiled token pattern

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use super::error::{Result, TemplateError, ValidationError};
use crate::table::Row;

/// Token names are ASCII letters, digits and underscores, matched case-sensitively.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("token pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    body: String,
}

impl Template {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Read a template from disk
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading template from {}", path.display());

        let body = fs::read_to_string(path)
            .await
            .map_err(|source| TemplateError::NotFound {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self { body })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Unique token names referenced by the template
    pub fn extract_tokens(&self) -> BTreeSet<String> {
        TOKEN_PATTERN
            .captures_iter(&self.body)
            .map(|caps| caps[1].to_string())
            .collect()
    }

    pub fn has_tokens(&self) -> bool {
        TOKEN_PATTERN.is_match(&self.body)
    }

    /// Replace every token with the row's value for that column.
    ///
    /// Substitution is a single literal pass: values are inserted as-is and are
    /// never scanned for tokens themselves. Empty values are valid.
    pub fn render_row(&self, row: &Row) -> Result<String> {
        let missing: BTreeSet<String> = self
            .extract_tokens()
            .into_iter()
            .filter(|token| !row.contains(token))
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingTokens {
                tokens: missing.into_iter().collect(),
            }
            .into());
        }

        let rendered = TOKEN_PATTERN.replace_all(&self.body, |caps: &Captures| {
            row.get(&caps[1]).unwrap_or_default().to_string()
        });

        Ok(rendered.into_owned())
    }
}
