//! Test execution entity.

use crate::{CaseId, DashError, ExecutionId, SuiteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a test execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    #[default]
    Pending,
    Running,
    Passed,
    Failed,
    Skipped,
    Blocked,
}

impl ExecutionStatus {
    /// Returns the wire name used in APIs and cache keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Blocked => "blocked",
        }
    }

    /// Checks if the execution has finished.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Passed | Self::Failed | Self::Skipped | Self::Blocked)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStatus {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            "blocked" => Ok(Self::Blocked),
            other => Err(DashError::validation(format!("Unknown execution status '{other}'"))),
        }
    }
}

/// One run of a test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestExecution {
    pub id: ExecutionId,
    pub case_id: CaseId,
    pub suite_id: SuiteId,
    pub status: ExecutionStatus,
    pub duration_ms: Option<u64>,
    pub notes: Option<String>,
    pub executed_at: DateTime<Utc>,
}

/// Fields of an execution that does not have an ID yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTestExecution {
    pub case_id: CaseId,
    pub suite_id: SuiteId,
    pub status: ExecutionStatus,
    pub duration_ms: Option<u64>,
    pub notes: Option<String>,
}

/// Filter for execution listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionFilter {
    pub suite_id: Option<SuiteId>,
    pub status: Option<ExecutionStatus>,
}

impl ExecutionFilter {
    /// Checks if an execution passes the filter.
    #[must_use]
    pub fn matches(&self, execution: &TestExecution) -> bool {
        self.suite_id.map_or(true, |id| execution.suite_id == id)
            && self.status.map_or(true, |status| execution.status == status)
    }
}
