// ABOUTME: Error types for writing rendered job files
// ABOUTME: Write failures carry the target path so a row failure can be reported precisely

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("Refusing to overwrite existing file {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to create output directory {path}: {message}")]
    Directory { path: PathBuf, message: String },
}

impl OutputError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            OutputError::Write { path, .. }
            | OutputError::AlreadyExists { path }
            | OutputError::Directory { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
