//! Execution service trait.

use crate::dto::{CreateExecutionRequest, UpdateExecutionStatusRequest};
use async_trait::async_trait;
use testdash_core::{DashResult, ExecutionFilter, ExecutionId, Interface, Page, PageRequest, TestExecution};

/// Execution service trait.
#[async_trait]
pub trait ExecutionService: Interface + Send + Sync {
    /// Gets an execution by ID.
    async fn get_execution(&self, id: ExecutionId) -> DashResult<TestExecution>;

    /// Lists executions matching a filter.
    async fn list_executions(
        &self,
        filter: ExecutionFilter,
        page: PageRequest,
    ) -> DashResult<Page<TestExecution>>;

    /// Records a new execution.
    async fn create_execution(&self, request: CreateExecutionRequest) -> DashResult<TestExecution>;

    /// Changes the status of an execution.
    async fn update_execution_status(
        &self,
        id: ExecutionId,
        request: UpdateExecutionStatusRequest,
    ) -> DashResult<TestExecution>;

    /// Deletes an execution.
    async fn delete_execution(&self, id: ExecutionId) -> DashResult<()>;
}
