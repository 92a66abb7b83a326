// ABOUTME: Per-row outcomes and the aggregated summary of a generation run
// ABOUTME: Outcomes keep table order so failures are reported deterministically

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Written,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOutcome {
    /// 0-based position of the row in the parameter table
    pub index: usize,
    /// Source line of the row
    pub line: u64,
    pub job_name: String,
    pub status: JobStatus,
    pub path: Option<PathBuf>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Success,
    PartialSuccess,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub run_id: String,
    pub template: Option<PathBuf>,
    pub parameters: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<Duration>,
    pub status: RunStatus,
    pub total_jobs: usize,
    pub written_jobs: usize,
    pub failed_jobs: usize,
    pub warnings: Vec<String>,
    pub jobs: Vec<JobOutcome>,
}

impl JobOutcome {
    pub fn written(index: usize, line: u64, job_name: String, path: PathBuf) -> Self {
        Self {
            index,
            line,
            job_name,
            status: JobStatus::Written,
            path: Some(path),
            error: None,
        }
    }

    pub fn failed(index: usize, line: u64, job_name: String, error: String) -> Self {
        Self {
            index,
            line,
            job_name,
            status: JobStatus::Failed,
            path: None,
            error: Some(error),
        }
    }

    pub fn is_written(&self) -> bool {
        self.status == JobStatus::Written
    }

    pub fn is_failed(&self) -> bool {
        self.status == JobStatus::Failed
    }
}

impl GenerationSummary {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            template: None,
            parameters: None,
            output_dir,
            dry_run: false,
            start_time: Utc::now(),
            end_time: None,
            duration: None,
            status: RunStatus::Running,
            total_jobs: 0,
            written_jobs: 0,
            failed_jobs: 0,
            warnings: Vec::new(),
            jobs: Vec::new(),
        }
    }

    pub fn add_outcome(&mut self, outcome: JobOutcome) {
        self.jobs.push(outcome);
        self.update_counts();
    }

    pub fn mark_completed(&mut self) {
        let now = Utc::now();
        self.end_time = Some(now);
        self.duration = Some((now - self.start_time).to_std().unwrap_or(Duration::ZERO));
        self.jobs.sort_by_key(|job| job.index);
        self.update_counts();
        self.status = match (self.written_jobs, self.failed_jobs) {
            (_, 0) => RunStatus::Success,
            (0, _) => RunStatus::Failed,
            _ => RunStatus::PartialSuccess,
        };
    }

    pub fn has_failures(&self) -> bool {
        self.failed_jobs > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobOutcome> {
        self.jobs.iter().filter(|job| job.is_failed())
    }

    /// Number of distinct files written; rows sharing a job name overwrite one file
    pub fn distinct_files(&self) -> usize {
        self.jobs
            .iter()
            .filter(|job| job.is_written())
            .filter_map(|job| job.path.as_ref())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Serialize the summary as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn update_counts(&mut self) {
        self.total_jobs = self.jobs.len();
        self.written_jobs = self.jobs.iter().filter(|j| j.is_written()).count();
        self.failed_jobs = self.jobs.iter().filter(|j| j.is_failed()).count();
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Written => write!(f, "written"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Running => write!(f, "running"),
            RunStatus::Success => write!(f, "success"),
            RunStatus::PartialSuccess => write!(f, "partial_success"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_aggregation() {
        let mut summary = GenerationSummary::new(PathBuf::from("jobs"));
        summary.add_outcome(JobOutcome::written(
            0,
            2,
            "a".to_string(),
            PathBuf::from("jobs/a.inp"),
        ));
        summary.add_outcome(JobOutcome::failed(
            1,
            3,
            "b".to_string(),
            "permission denied".to_string(),
        ));
        summary.mark_completed();

        assert_eq!(summary.total_jobs, 2);
        assert_eq!(summary.written_jobs, 1);
        assert_eq!(summary.failed_jobs, 1);
        assert_eq!(summary.status, RunStatus::PartialSuccess);
        assert!(summary.has_failures());
        assert_eq!(summary.failures().next().unwrap().job_name, "b");
    }

    #[test]
    fn test_distinct_files_collapses_repeated_paths() {
        let mut summary = GenerationSummary::new(PathBuf::from("jobs"));
        for index in 0..2 {
            summary.add_outcome(JobOutcome::written(
                index,
                index as u64 + 2,
                "dup".to_string(),
                PathBuf::from("jobs/dup.inp"),
            ));
        }
        summary.add_outcome(JobOutcome::failed(2, 4, "c".into(), "x".into()));
        summary.mark_completed();

        assert_eq!(summary.written_jobs, 2);
        assert_eq!(summary.distinct_files(), 1);
    }

    #[test]
    fn test_outcomes_sorted_by_row_index() {
        let mut summary = GenerationSummary::new(PathBuf::from("jobs"));
        summary.add_outcome(JobOutcome::failed(2, 4, "c".into(), "x".into()));
        summary.add_outcome(JobOutcome::failed(0, 2, "a".into(), "x".into()));
        summary.mark_completed();

        let order: Vec<usize> = summary.jobs.iter().map(|j| j.index).collect();
        assert_eq!(order, vec![0, 2]);
        assert_eq!(summary.status, RunStatus::Failed);
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let mut summary = GenerationSummary::new(PathBuf::from("jobs"));
        summary.add_outcome(JobOutcome::written(
            0,
            2,
            "a".to_string(),
            PathBuf::from("jobs/a.inp"),
        ));
        summary.mark_completed();

        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["written_jobs"], 1);
        assert_eq!(json["jobs"][0]["status"], "written");
    }
}
