//! Case service implementation.

use crate::case_service::CaseService;
use crate::dto::{CreateCaseRequest, UpdateCaseRequest};
use crate::repository::CaseRepository;
use async_trait::async_trait;
use std::sync::Arc;
use testdash_cache::{keys, CacheManager, CacheTtl};
use testdash_core::{
    CaseId, DashError, DashResult, NewTestCase, Page, PageRequest, SuiteId, TestCase, ValidateExt,
};
use tracing::{debug, info};

/// Case service backed by a repository and the shared cache.
pub struct CaseServiceImpl<R: CaseRepository> {
    case_repository: Arc<R>,
    cache: Arc<CacheManager>,
}

impl<R: CaseRepository> CaseServiceImpl<R> {
    /// Creates a new case service.
    pub fn new(case_repository: Arc<R>, cache: Arc<CacheManager>) -> Self {
        Self {
            case_repository,
            cache,
        }
    }

    async fn find_case(&self, id: CaseId) -> DashResult<TestCase> {
        self.case_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DashError::not_found("Case", id))
    }
}

#[async_trait]
impl<R: CaseRepository + 'static> CaseService for CaseServiceImpl<R> {
    async fn get_case(&self, id: CaseId) -> DashResult<TestCase> {
        debug!("Getting case: {}", id);

        self.cache
            .get_or_compute(&keys::case(id), CacheTtl::Medium, || self.find_case(id))
            .await
    }

    async fn list_cases(&self, suite_id: Option<SuiteId>, page: PageRequest) -> DashResult<Page<TestCase>> {
        debug!("Listing cases, suite: {:?}, skip: {}, limit: {}", suite_id, page.skip, page.limit);

        match suite_id {
            Some(suite_id) => {
                self.cache
                    .get_or_compute(&keys::cases_list_by_suite(suite_id, page), CacheTtl::Short, || {
                        self.case_repository.find_by_suite(suite_id, page)
                    })
                    .await
            }
            None => {
                self.cache
                    .get_or_compute(&keys::cases_list(page), CacheTtl::Short, || {
                        self.case_repository.find_all(page)
                    })
                    .await
            }
        }
    }

    async fn create_case(&self, request: CreateCaseRequest) -> DashResult<TestCase> {
        debug!("Creating case in suite {}: {}", request.suite_id, request.title);

        request.validate_request()?;

        let case = self.case_repository.save(&NewTestCase::from(request)).await?;

        self.cache.invalidate_case_lists(case.suite_id).await;

        info!("Case created: {}", case.id);
        Ok(case)
    }

    async fn update_case(&self, id: CaseId, request: UpdateCaseRequest) -> DashResult<TestCase> {
        debug!("Updating case: {}", id);

        request.validate_request()?;

        let mut case = self.find_case(id).await?;
        let previous_suite = case.suite_id;

        case.apply_update(
            request.suite_id,
            request.title.map(|title| title.trim().to_string()),
            request.description,
            request.test_type,
        );

        let updated = self.case_repository.update(&case).await?;

        self.cache.invalidate_case(id, previous_suite).await;
        if updated.suite_id != previous_suite {
            self.cache.invalidate_case_lists(updated.suite_id).await;
            info!("Case {} moved from suite {} to {}", id, previous_suite, updated.suite_id);
        }

        info!("Case updated: {}", id);
        Ok(updated)
    }

    async fn delete_case(&self, id: CaseId) -> DashResult<()> {
        debug!("Deleting case: {}", id);

        let case = self.find_case(id).await?;

        if !self.case_repository.delete(id).await? {
            return Err(DashError::not_found("Case", id));
        }

        self.cache.invalidate_case(id, case.suite_id).await;

        info!("Case deleted: {}", id);
        Ok(())
    }
}

impl<R: CaseRepository> std::fmt::Debug for CaseServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseServiceImpl").finish_non_exhaustive()
    }
}
