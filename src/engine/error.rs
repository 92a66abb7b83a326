// ABOUTME: Error types for whole-run generation failures
// ABOUTME: Anything here aborts the run before a single job file is written

use thiserror::Error;

use crate::table::TableError;
use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Neither input could be loaded
    #[error("{table}\n{template}")]
    Inputs {
        table: TableError,
        template: TemplateError,
    },
}

impl GenerationError {
    /// Combine the outcomes of loading both inputs, keeping every failure
    pub fn from_loads<T, U>(
        table: std::result::Result<T, TableError>,
        template: std::result::Result<U, TemplateError>,
    ) -> Result<(T, U)> {
        match (table, template) {
            (Ok(table), Ok(template)) => Ok((table, template)),
            (Err(table), Ok(_)) => Err(table.into()),
            (Ok(_), Err(template)) => Err(template.into()),
            (Err(table), Err(template)) => Err(GenerationError::Inputs { table, template }),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
