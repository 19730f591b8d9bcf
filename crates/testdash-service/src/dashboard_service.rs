//! Dashboard service trait.

use async_trait::async_trait;
use testdash_core::{
    DashResult, DashboardStats, Interface, PerformanceMetrics, RecentExecution, TestTypeCount,
    TrendPoint,
};

/// Largest trend window accepted, in days.
pub const MAX_TREND_DAYS: u32 = 365;

/// Largest number of recent executions returned.
pub const MAX_RECENT_LIMIT: u32 = 100;

/// Dashboard aggregate service trait.
#[async_trait]
pub trait DashboardService: Interface + Send + Sync {
    /// Headline counters.
    async fn stats(&self) -> DashResult<DashboardStats>;

    /// Daily pass/fail counts for the last `days` days.
    async fn trends(&self, days: u32) -> DashResult<Vec<TrendPoint>>;

    /// The `limit` most recent executions.
    async fn recent_executions(&self, limit: u32) -> DashResult<Vec<RecentExecution>>;

    /// Number of cases per test type.
    async fn test_types_distribution(&self) -> DashResult<Vec<TestTypeCount>>;

    /// Execution timing metrics.
    async fn performance_metrics(&self) -> DashResult<PerformanceMetrics>;
}
