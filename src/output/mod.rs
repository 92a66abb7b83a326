// ABOUTME: Output module for rendered job files
// ABOUTME: Maps render results to paths in the jobs directory and writes them

pub mod config;
pub mod error;
pub mod writer;

pub use config::{OutputConfig, DEFAULT_JOBS_DIR, DEFAULT_SUFFIX};
pub use error::{OutputError, Result};
pub use writer::{DryRunWriter, FileWriter, JobWriter};
