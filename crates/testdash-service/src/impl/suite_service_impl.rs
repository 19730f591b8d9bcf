//! Suite service implementation.

use crate::dto::{CreateSuiteRequest, UpdateSuiteRequest};
use crate::repository::SuiteRepository;
use crate::suite_service::SuiteService;
use async_trait::async_trait;
use std::sync::Arc;
use testdash_cache::{keys, CacheManager, CacheTtl};
use testdash_core::{
    DashError, DashResult, NewTestSuite, Page, PageRequest, SuiteId, TestSuite, ValidateExt,
};
use tracing::{debug, info};

/// Suite service backed by a repository and the shared cache.
pub struct SuiteServiceImpl<R: SuiteRepository> {
    suite_repository: Arc<R>,
    cache: Arc<CacheManager>,
}

impl<R: SuiteRepository> SuiteServiceImpl<R> {
    /// Creates a new suite service.
    pub fn new(suite_repository: Arc<R>, cache: Arc<CacheManager>) -> Self {
        Self {
            suite_repository,
            cache,
        }
    }

    async fn find_suite(&self, id: SuiteId) -> DashResult<TestSuite> {
        self.suite_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DashError::not_found("Suite", id))
    }
}

#[async_trait]
impl<R: SuiteRepository + 'static> SuiteService for SuiteServiceImpl<R> {
    async fn get_suite(&self, id: SuiteId) -> DashResult<TestSuite> {
        debug!("Getting suite: {}", id);

        self.cache
            .get_or_compute(&keys::suite(id), CacheTtl::Medium, || self.find_suite(id))
            .await
    }

    async fn list_suites(&self, page: PageRequest) -> DashResult<Page<TestSuite>> {
        debug!("Listing suites, skip: {}, limit: {}", page.skip, page.limit);

        self.cache
            .get_or_compute(&keys::suites_list(page), CacheTtl::Short, || {
                self.suite_repository.find_all(page)
            })
            .await
    }

    async fn create_suite(&self, request: CreateSuiteRequest) -> DashResult<TestSuite> {
        debug!("Creating suite: {}", request.name);

        request.validate_request()?;

        let suite = self
            .suite_repository
            .save(&NewTestSuite::from(request))
            .await?;

        self.cache.invalidate_suite_lists().await;

        info!("Suite created: {}", suite.id);
        Ok(suite)
    }

    async fn update_suite(&self, id: SuiteId, request: UpdateSuiteRequest) -> DashResult<TestSuite> {
        debug!("Updating suite: {}", id);

        request.validate_request()?;

        let mut suite = self.find_suite(id).await?;
        suite.apply_update(
            request.name.map(|name| name.trim().to_string()),
            request.description,
        );

        let updated = self.suite_repository.update(&suite).await?;

        self.cache.invalidate_suite(id).await;

        info!("Suite updated: {}", id);
        Ok(updated)
    }

    async fn delete_suite(&self, id: SuiteId) -> DashResult<()> {
        debug!("Deleting suite: {}", id);

        if !self.suite_repository.delete(id).await? {
            return Err(DashError::not_found("Suite", id));
        }

        self.cache.invalidate_suite(id).await;

        info!("Suite deleted: {}", id);
        Ok(())
    }
}

impl<R: SuiteRepository> std::fmt::Debug for SuiteServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteServiceImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
