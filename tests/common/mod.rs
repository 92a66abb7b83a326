// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides scratch directories and builders for templates and parameter tables

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

pub const DEMO_TEMPLATE: &str = "*EL PRINT, ELSET={{TARGET_ELSET}}\nS, {{JOB_NAME}}";

pub struct TestTableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TestTableBuilder {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, values: &[&str]) -> Self {
        self.rows.push(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn to_csv(&self) -> String {
        let mut csv = self.headers.join(",");
        csv.push('\n');
        for row in &self.rows {
            csv.push_str(&row.join(","));
            csv.push('\n');
        }
        csv
    }
}

pub fn demo_table() -> TestTableBuilder {
    TestTableBuilder::new(&["JOB_NAME", "TARGET_ELSET"])
        .with_row(&["demo_case_01", "ELEMENT_SET_A"])
        .with_row(&["demo_case_02", "ELEMENT_SET_B"])
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn jobs_dir(&self) -> PathBuf {
        self.path().join("jobs")
    }

    pub async fn write_template(&self, body: &str) -> PathBuf {
        let path = self.path().join("model_template.inp");
        fs::write(&path, body)
            .await
            .expect("Failed to write template file");
        path
    }

    pub async fn write_table(&self, builder: &TestTableBuilder) -> PathBuf {
        self.write_raw_table(&builder.to_csv()).await
    }

    pub async fn write_raw_table(&self, content: &str) -> PathBuf {
        let path = self.path().join("sweep.csv");
        fs::write(&path, content)
            .await
            .expect("Failed to write parameter table");
        path
    }

    pub async fn read_job(&self, job_name: &str) -> String {
        fs::read_to_string(self.jobs_dir().join(format!("{}.inp", job_name)))
            .await
            .expect("Failed to read job file")
    }

    pub fn job_files(&self) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.jobs_dir()) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_builder() {
        let csv = demo_table().to_csv();
        assert_eq!(
            csv,
            "JOB_NAME,TARGET_ELSET\ndemo_case_01,ELEMENT_SET_A\ndemo_case_02,ELEMENT_SET_B\n"
        );
    }

    #[test]
    fn test_environment_setup() {
        let env = TestEnvironment::new();
        assert!(env.path().exists());
        assert!(env.job_files().is_empty());
    }
}
