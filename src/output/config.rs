// ABOUTME: Configuration for where and how rendered job files are written
// ABOUTME: Output file name is the job name plus a fixed suffix inside the jobs directory

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_JOBS_DIR: &str = "jobs";
pub const DEFAULT_SUFFIX: &str = ".inp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_suffix")]
    pub suffix: String,
    #[serde(default = "default_true")]
    pub create_dirs: bool,
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

impl OutputConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Default::default()
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = normalize_suffix(suffix.into());
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `<directory>/<job_name><suffix>`
    pub fn path_for(&self, job_name: &str) -> PathBuf {
        self.directory.join(format!("{}{}", job_name, self.suffix))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            suffix: default_suffix(),
            create_dirs: true,
            overwrite: true,
        }
    }
}

/// Accept both `inp` and `.inp`; an empty suffix stays empty
fn normalize_suffix(suffix: String) -> String {
    if suffix.is_empty() || suffix.starts_with('.') {
        suffix
    } else {
        format!(".{}", suffix)
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_JOBS_DIR)
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OutputConfig::default();
        assert_eq!(config.directory, PathBuf::from("jobs"));
        assert_eq!(config.suffix, ".inp");
        assert!(config.create_dirs);
        assert!(config.overwrite);
    }

    #[test]
    fn test_path_for_job() {
        let config = OutputConfig::new("/tmp/out");
        assert_eq!(
            config.path_for("demo_case_01"),
            PathBuf::from("/tmp/out/demo_case_01.inp")
        );
    }

    #[test]
    fn test_suffix_normalization() {
        let config = OutputConfig::new("out").with_suffix("dat");
        assert_eq!(config.path_for("a"), PathBuf::from("out/a.dat"));

        let config = OutputConfig::new("out").with_suffix("");
        assert_eq!(config.path_for("a"), PathBuf::from("out/a"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: OutputConfig = serde_yaml::from_str("directory: decks\n").unwrap();
        assert_eq!(config.directory, PathBuf::from("decks"));
        assert_eq!(config.suffix, ".inp");
    }
}
