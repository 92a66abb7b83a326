// ABOUTME: Output job name selection from a designated parameter column
// ABOUTME: Sanitizes names for the filesystem and falls back to case_NNN for blank values

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::table::Row;

pub const DEFAULT_JOB_COLUMN: &str = "JOB_NAME";

static UNSAFE_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("job name pattern is a valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobNaming {
    #[serde(default = "default_column")]
    pub column: String,
    #[serde(default = "default_true")]
    pub sanitize: bool,
}

impl JobNaming {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            sanitize: true,
        }
    }

    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// Job name for the row at `index` (0-based position in the table)
    pub fn job_name(&self, row: &Row, index: usize) -> String {
        let value = row.get(&self.column).unwrap_or_default();

        if value.trim().is_empty() {
            return fallback_name(index);
        }

        if self.sanitize {
            sanitize_job_name(value.trim())
        } else {
            value.to_string()
        }
    }
}

impl Default for JobNaming {
    fn default() -> Self {
        Self::new(DEFAULT_JOB_COLUMN)
    }
}

/// Collapse every run of characters outside `[A-Za-z0-9_-]` into one underscore
pub fn sanitize_job_name(name: &str) -> String {
    let safe = UNSAFE_NAME_CHARS.replace_all(name, "_").into_owned();
    if safe.is_empty() {
        "case_000".to_string()
    } else {
        safe
    }
}

fn fallback_name(index: usize) -> String {
    format!("case_{:03}", index + 1)
}

fn default_column() -> String {
    DEFAULT_JOB_COLUMN.to_string()
}

fn default_true() -> bool {
    true
}
