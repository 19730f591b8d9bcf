//! Dashboard aggregate value objects.

use crate::{CaseId, ExecutionId, ExecutionStatus, SuiteId, TestType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Headline counters for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_suites: u64,
    pub total_cases: u64,
    pub total_executions: u64,
    pub passed_executions: u64,
    pub failed_executions: u64,
    pub pass_rate: f64,
}

/// Pass/fail counts for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub passed: u64,
    pub failed: u64,
    pub total: u64,
}

/// A recent execution with the names needed to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentExecution {
    pub id: ExecutionId,
    pub case_id: CaseId,
    pub case_title: String,
    pub suite_id: SuiteId,
    pub suite_name: String,
    pub status: ExecutionStatus,
    pub executed_at: DateTime<Utc>,
}

/// Number of cases per test type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestTypeCount {
    pub test_type: TestType,
    pub count: u64,
}

/// Execution timing metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub average_duration_ms: f64,
    pub p95_duration_ms: u64,
    pub slowest_case_id: Option<CaseId>,
    pub executions_last_24h: u64,
}
