// ABOUTME: Generation engine module for inpgen
// ABOUTME: Drives validation, rendering, and writing for a whole parameter sweep

pub mod error;
pub mod generator;
pub mod result;

pub use error::{GenerationError, Result};
pub use generator::{GenerationRequest, Generator};
pub use result::{GenerationSummary, JobOutcome, JobStatus, RunStatus};
