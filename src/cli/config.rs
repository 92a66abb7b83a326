// ABOUTME: Configuration management for inpgen
// ABOUTME: Loads defaults from YAML files and environment variables; CLI flags override both

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::{OutputConfig, DEFAULT_JOBS_DIR, DEFAULT_SUFFIX};
use crate::template::{JobNaming, DEFAULT_JOB_COLUMN};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_jobs_dir")]
    pub jobs_dir: PathBuf,

    #[serde(default = "default_job_column")]
    pub job_column: String,

    #[serde(default = "default_suffix")]
    pub suffix: String,

    #[serde(default = "default_true")]
    pub sanitize_job_names: bool,

    #[serde(default = "default_true")]
    pub overwrite: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jobs_dir: default_jobs_dir(),
            job_column: default_job_column(),
            suffix: default_suffix(),
            sanitize_job_names: true,
            overwrite: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!("Configuration file not found: {}", p.display());
                }
                Some(p)
            }
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => {
                let contents = std::fs::read_to_string(&path)?;
                Self::from_yaml(&contents)?
            }
            None => Config::default(),
        };

        config.merge_env()?;
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let possible_paths = [
            PathBuf::from("inpgen.yaml"),
            PathBuf::from("inpgen.yml"),
            PathBuf::from(".inpgen.yaml"),
            PathBuf::from(".inpgen.yml"),
        ];

        if let Some(path) = possible_paths.into_iter().find(|p| p.exists()) {
            return Some(path);
        }

        dirs::home_dir()
            .map(|home| home.join(".inpgen").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("INPGEN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("INPGEN_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(column) = lookup("INPGEN_JOB_COLUMN") {
            self.job_column = column;
        }
        if let Some(suffix) = lookup("INPGEN_SUFFIX") {
            self.suffix = suffix;
        }
        if let Some(dir) = lookup("INPGEN_JOBS_DIR") {
            self.jobs_dir = PathBuf::from(dir);
        }

        Ok(())
    }

    pub fn naming(&self, column_override: Option<String>) -> JobNaming {
        JobNaming::new(column_override.unwrap_or_else(|| self.job_column.clone()))
            .with_sanitize(self.sanitize_job_names)
    }

    pub fn output(&self, jobs_dir_override: Option<PathBuf>) -> OutputConfig {
        OutputConfig::new(jobs_dir_override.unwrap_or_else(|| self.jobs_dir.clone()))
            .with_suffix(self.suffix.clone())
            .with_overwrite(self.overwrite)
    }
}

fn default_jobs_dir() -> PathBuf {
    PathBuf::from(DEFAULT_JOBS_DIR)
}

fn default_job_column() -> String {
    DEFAULT_JOB_COLUMN.to_string()
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_true() -> bool {
    true
}
