//! Repository traits for the relational store.
//!
//! The database is external to this crate; services only see these traits.

use async_trait::async_trait;
use testdash_core::{
    CaseId, DashResult, DashboardStats, ExecutionFilter, ExecutionId, Interface, NewTestCase,
    NewTestExecution, NewTestSuite, Page, PageRequest, PerformanceMetrics, RecentExecution, SuiteId,
    TestCase, TestExecution, TestSuite, TestTypeCount, TrendPoint,
};

/// Test suite repository.
#[async_trait]
pub trait SuiteRepository: Interface + Send + Sync {
    /// Finds a suite by ID.
    async fn find_by_id(&self, id: SuiteId) -> DashResult<Option<TestSuite>>;

    /// Finds all suites with pagination.
    async fn find_all(&self, page: PageRequest) -> DashResult<Page<TestSuite>>;

    /// Saves a new suite and returns it with its assigned ID.
    async fn save(&self, suite: &NewTestSuite) -> DashResult<TestSuite>;

    /// Updates an existing suite.
    async fn update(&self, suite: &TestSuite) -> DashResult<TestSuite>;

    /// Deletes a suite by ID.
    async fn delete(&self, id: SuiteId) -> DashResult<bool>;
}

/// Test case repository.
#[async_trait]
pub trait CaseRepository: Interface + Send + Sync {
    /// Finds a case by ID.
    async fn find_by_id(&self, id: CaseId) -> DashResult<Option<TestCase>>;

    /// Finds all cases with pagination.
    async fn find_all(&self, page: PageRequest) -> DashResult<Page<TestCase>>;

    /// Finds the cases of one suite with pagination.
    async fn find_by_suite(&self, suite_id: SuiteId, page: PageRequest) -> DashResult<Page<TestCase>>;

    /// Saves a new case.
    async fn save(&self, case: &NewTestCase) -> DashResult<TestCase>;

    /// Updates an existing case.
    async fn update(&self, case: &TestCase) -> DashResult<TestCase>;

    /// Deletes a case by ID.
    async fn delete(&self, id: CaseId) -> DashResult<bool>;
}

/// Test execution repository.
#[async_trait]
pub trait ExecutionRepository: Interface + Send + Sync {
    /// Finds an execution by ID.
    async fn find_by_id(&self, id: ExecutionId) -> DashResult<Option<TestExecution>>;

    /// Finds executions matching a filter, newest first.
    async fn find_all(&self, filter: ExecutionFilter, page: PageRequest) -> DashResult<Page<TestExecution>>;

    /// Saves a new execution.
    async fn save(&self, execution: &NewTestExecution) -> DashResult<TestExecution>;

    /// Updates an existing execution.
    async fn update(&self, execution: &TestExecution) -> DashResult<TestExecution>;

    /// Deletes an execution by ID.
    async fn delete(&self, id: ExecutionId) -> DashResult<bool>;
}

/// Aggregate queries backing the dashboard.
#[async_trait]
pub trait DashboardRepository: Interface + Send + Sync {
    async fn stats(&self) -> DashResult<DashboardStats>;

    /// Daily pass/fail counts for the last `days` days, oldest first.
    async fn trends(&self, days: u32) -> DashResult<Vec<TrendPoint>>;

    /// The `limit` most recent executions.
    async fn recent_executions(&self, limit: u32) -> DashResult<Vec<RecentExecution>>;

    async fn test_types_distribution(&self) -> DashResult<Vec<TestTypeCount>>;

    async fn performance_metrics(&self) -> DashResult<PerformanceMetrics>;
}
