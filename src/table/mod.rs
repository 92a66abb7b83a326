// ABOUTME: Parameter table module for sweep definitions
// ABOUTME: Exports CSV loading, row records, and table error types

pub mod error;
pub mod loader;

pub use error::{Result, SchemaError, TableError};
pub use loader::{ParameterTable, Row, TableLoader};
