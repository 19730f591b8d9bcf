//! Suite service trait.

use crate::dto::{CreateSuiteRequest, UpdateSuiteRequest};
use async_trait::async_trait;
use testdash_core::{DashResult, Interface, Page, PageRequest, SuiteId, TestSuite};

/// Suite service trait.
#[async_trait]
pub trait SuiteService: Interface + Send + Sync {
    /// Gets a suite by ID.
    async fn get_suite(&self, id: SuiteId) -> DashResult<TestSuite>;

    /// Lists suites with pagination.
    async fn list_suites(&self, page: PageRequest) -> DashResult<Page<TestSuite>>;

    /// Creates a new suite.
    async fn create_suite(&self, request: CreateSuiteRequest) -> DashResult<TestSuite>;

    /// Updates a suite.
    async fn update_suite(&self, id: SuiteId, request: UpdateSuiteRequest) -> DashResult<TestSuite>;

    /// Deletes a suite.
    async fn delete_suite(&self, id: SuiteId) -> DashResult<()>;
}
