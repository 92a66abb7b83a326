// ABOUTME: Main library module for the inpgen input deck generator
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod engine;
pub mod output;
pub mod table;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use engine::{GenerationRequest, GenerationSummary, Generator};
pub use output::{JobWriter, OutputConfig};
pub use table::{ParameterTable, Row, TableLoader};
pub use template::{JobNaming, RenderResult, Renderer, Template};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
