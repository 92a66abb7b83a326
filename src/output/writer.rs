// ABOUTME: Job file writers for rendered input decks
// ABOUTME: FileWriter persists to the jobs directory; DryRunWriter only resolves target paths

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::config::OutputConfig;
use super::error::{OutputError, Result};
use crate::template::RenderResult;

#[async_trait]
pub trait JobWriter: Send + Sync {
    /// Persist one rendered job and return the path it was written to
    async fn write(&self, result: &RenderResult, config: &OutputConfig) -> Result<PathBuf>;
}

pub struct FileWriter;

pub struct DryRunWriter;

impl Default for FileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileWriter {
    pub fn new() -> Self {
        Self
    }

    async fn ensure_directory(&self, config: &OutputConfig) -> Result<()> {
        let directory = config.directory();
        if fs::metadata(directory).await.is_ok() {
            return Ok(());
        }

        if !config.create_dirs {
            return Err(OutputError::Directory {
                path: directory.to_path_buf(),
                message: "directory does not exist".to_string(),
            });
        }

        debug!("Creating directory {}", directory.display());
        fs::create_dir_all(directory)
            .await
            .map_err(|e| OutputError::Directory {
                path: directory.to_path_buf(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl JobWriter for FileWriter {
    async fn write(&self, result: &RenderResult, config: &OutputConfig) -> Result<PathBuf> {
        self.ensure_directory(config).await?;

        let path = config.path_for(&result.job_name);
        debug!("Writing job file {}", path.display());

        let mut options = fs::OpenOptions::new();
        options.write(true);
        if config.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                OutputError::AlreadyExists { path: path.clone() }
            } else {
                OutputError::Write {
                    path: path.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        file.write_all(result.body.as_bytes())
            .await
            .map_err(|e| OutputError::Write {
                path: path.clone(),
                message: e.to_string(),
            })?;

        file.flush().await.map_err(|e| OutputError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;

        info!(
            "Job {} written to {} ({} bytes)",
            result.job_name,
            path.display(),
            result.body.len()
        );
        Ok(path)
    }
}

impl Default for DryRunWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DryRunWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobWriter for DryRunWriter {
    async fn write(&self, result: &RenderResult, config: &OutputConfig) -> Result<PathBuf> {
        let path = config.path_for(&result.job_name);
        info!(
            "Would write job {} to {} ({} bytes)",
            result.job_name,
            path.display(),
            result.body.len()
        );
        Ok(path)
    }
}
