//! Execution service implementation.

use crate::dto::{CreateExecutionRequest, UpdateExecutionStatusRequest};
use crate::execution_service::ExecutionService;
use crate::repository::ExecutionRepository;
use async_trait::async_trait;
use std::sync::Arc;
use testdash_cache::{keys, CacheManager, CacheTtl};
use testdash_core::{
    DashError, DashResult, ExecutionFilter, ExecutionId, NewTestExecution, Page, PageRequest,
    TestExecution, ValidateExt,
};
use tracing::{debug, info};

/// Execution service backed by a repository and the shared cache.
pub struct ExecutionServiceImpl<R: ExecutionRepository> {
    execution_repository: Arc<R>,
    cache: Arc<CacheManager>,
}

impl<R: ExecutionRepository> ExecutionServiceImpl<R> {
    /// Creates a new execution service.
    pub fn new(execution_repository: Arc<R>, cache: Arc<CacheManager>) -> Self {
        Self {
            execution_repository,
            cache,
        }
    }

    async fn find_execution(&self, id: ExecutionId) -> DashResult<TestExecution> {
        self.execution_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DashError::not_found("Execution", id))
    }
}

#[async_trait]
impl<R: ExecutionRepository + 'static> ExecutionService for ExecutionServiceImpl<R> {
    async fn get_execution(&self, id: ExecutionId) -> DashResult<TestExecution> {
        debug!("Getting execution: {}", id);

        self.cache
            .get_or_compute(&keys::execution(id), CacheTtl::Medium, || self.find_execution(id))
            .await
    }

    async fn list_executions(
        &self,
        filter: ExecutionFilter,
        page: PageRequest,
    ) -> DashResult<Page<TestExecution>> {
        debug!("Listing executions, filter: {:?}, skip: {}, limit: {}", filter, page.skip, page.limit);

        let key = keys::executions_list(filter.suite_id, filter.status, page);
        self.cache
            .get_or_compute(&key, CacheTtl::Short, || {
                self.execution_repository.find_all(filter, page)
            })
            .await
    }

    async fn create_execution(&self, request: CreateExecutionRequest) -> DashResult<TestExecution> {
        debug!("Recording execution of case {}: {}", request.case_id, request.status);

        request.validate_request()?;

        let execution = self
            .execution_repository
            .save(&NewTestExecution::from(request))
            .await?;

        self.cache.invalidate_execution_lists().await;

        info!("Execution created: {}", execution.id);
        Ok(execution)
    }

    async fn update_execution_status(
        &self,
        id: ExecutionId,
        request: UpdateExecutionStatusRequest,
    ) -> DashResult<TestExecution> {
        debug!("Updating execution status: {} -> {}", id, request.status);

        request.validate_request()?;

        let mut execution = self.find_execution(id).await?;
        execution.status = request.status;
        if request.duration_ms.is_some() {
            execution.duration_ms = request.duration_ms;
        }
        if request.notes.is_some() {
            execution.notes = request.notes;
        }

        let updated = self.execution_repository.update(&execution).await?;

        self.cache.invalidate_execution(id).await;

        info!("Execution status updated: {} -> {}", id, updated.status);
        Ok(updated)
    }

    async fn delete_execution(&self, id: ExecutionId) -> DashResult<()> {
        debug!("Deleting execution: {}", id);

        if !self.execution_repository.delete(id).await? {
            return Err(DashError::not_found("Execution", id));
        }

        self.cache.invalidate_execution(id).await;

        info!("Execution deleted: {}", id);
        Ok(())
    }
}

impl<R: ExecutionRepository> std::fmt::Debug for ExecutionServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionServiceImpl").finish_non_exhaustive()
    }
}
