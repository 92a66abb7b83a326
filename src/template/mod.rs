// ABOUTME: Template module for input deck rendering
// ABOUTME: Provides token extraction, header validation, and per-row substitution

pub mod engine;
pub mod error;
pub mod naming;
pub mod renderer;
pub mod validation;

pub use engine::Template;
pub use error::{Result, TemplateError, ValidationError};
pub use naming::{sanitize_job_name, JobNaming, DEFAULT_JOB_COLUMN};
pub use renderer::{RenderResult, Renderer};
pub use validation::{validate, validate_table, ValidationReport};
