//! Case service trait.

use crate::dto::{CreateCaseRequest, UpdateCaseRequest};
use async_trait::async_trait;
use testdash_core::{CaseId, DashResult, Interface, Page, PageRequest, SuiteId, TestCase};

/// Case service trait.
#[async_trait]
pub trait CaseService: Interface + Send + Sync {
    /// Gets a case by ID.
    async fn get_case(&self, id: CaseId) -> DashResult<TestCase>;

    /// Lists cases, optionally restricted to one suite.
    async fn list_cases(&self, suite_id: Option<SuiteId>, page: PageRequest) -> DashResult<Page<TestCase>>;

    /// Creates a new case.
    async fn create_case(&self, request: CreateCaseRequest) -> DashResult<TestCase>;

    /// Updates a case, possibly moving it to another suite.
    async fn update_case(&self, id: CaseId, request: UpdateCaseRequest) -> DashResult<TestCase>;

    /// Deletes a case.
    async fn delete_case(&self, id: CaseId) -> DashResult<()>;
}
