//! Dashboard service implementation.

use crate::dashboard_service::{DashboardService, MAX_RECENT_LIMIT, MAX_TREND_DAYS};
use crate::repository::DashboardRepository;
use async_trait::async_trait;
use std::sync::Arc;
use testdash_cache::{keys, CacheManager, CacheTtl};
use testdash_core::{
    DashError, DashResult, DashboardStats, PerformanceMetrics, RecentExecution, TestTypeCount,
    TrendPoint,
};
use tracing::debug;

/// Dashboard service backed by aggregate queries and the shared cache.
///
/// Counters and the recent-executions feed change with every execution and
/// use the short tier. Trends, the type distribution and performance
/// metrics move slowly and use the long tier.
pub struct DashboardServiceImpl<R: DashboardRepository> {
    dashboard_repository: Arc<R>,
    cache: Arc<CacheManager>,
}

impl<R: DashboardRepository> DashboardServiceImpl<R> {
    /// Creates a new dashboard service.
    pub fn new(dashboard_repository: Arc<R>, cache: Arc<CacheManager>) -> Self {
        Self {
            dashboard_repository,
            cache,
        }
    }
}

#[async_trait]
impl<R: DashboardRepository + 'static> DashboardService for DashboardServiceImpl<R> {
    async fn stats(&self) -> DashResult<DashboardStats> {
        debug!("Getting dashboard stats");

        self.cache
            .get_or_compute(&keys::dashboard_stats(), CacheTtl::Short, || {
                self.dashboard_repository.stats()
            })
            .await
    }

    async fn trends(&self, days: u32) -> DashResult<Vec<TrendPoint>> {
        debug!("Getting dashboard trends for {} days", days);

        if days == 0 || days > MAX_TREND_DAYS {
            return Err(DashError::validation(format!(
                "days must be between 1 and {MAX_TREND_DAYS}"
            )));
        }

        self.cache
            .get_or_compute(&keys::dashboard_trends(days), CacheTtl::Long, || {
                self.dashboard_repository.trends(days)
            })
            .await
    }

    async fn recent_executions(&self, limit: u32) -> DashResult<Vec<RecentExecution>> {
        debug!("Getting {} recent executions", limit);

        if limit == 0 || limit > MAX_RECENT_LIMIT {
            return Err(DashError::validation(format!(
                "limit must be between 1 and {MAX_RECENT_LIMIT}"
            )));
        }

        self.cache
            .get_or_compute(&keys::dashboard_recent(limit), CacheTtl::Short, || {
                self.dashboard_repository.recent_executions(limit)
            })
            .await
    }

    async fn test_types_distribution(&self) -> DashResult<Vec<TestTypeCount>> {
        self.cache
            .get_or_compute(&keys::dashboard_test_types_distribution(), CacheTtl::Long, || {
                self.dashboard_repository.test_types_distribution()
            })
            .await
    }

    async fn performance_metrics(&self) -> DashResult<PerformanceMetrics> {
        self.cache
            .get_or_compute(&keys::dashboard_performance_metrics(), CacheTtl::Long, || {
                self.dashboard_repository.performance_metrics()
            })
            .await
    }
}

impl<R: DashboardRepository> std::fmt::Debug for DashboardServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use testdash_cache::InMemoryCacheStore;

    mock! {
        pub DashboardRepo {}

        #[async_trait]
        impl DashboardRepository for DashboardRepo {
            async fn stats(&self) -> DashResult<DashboardStats>;
            async fn trends(&self, days: u32) -> DashResult<Vec<TrendPoint>>;
            async fn recent_executions(&self, limit: u32) -> DashResult<Vec<RecentExecution>>;
            async fn test_types_distribution(&self) -> DashResult<Vec<TestTypeCount>>;
            async fn performance_metrics(&self) -> DashResult<PerformanceMetrics>;
        }
    }

    fn create_dashboard_service(repo: MockDashboardRepo) -> DashboardServiceImpl<MockDashboardRepo> {
        let cache = Arc::new(CacheManager::new(Arc::new(InMemoryCacheStore::new())));
        DashboardServiceImpl::new(Arc::new(repo), cache)
    }

    #[tokio::test]
    async fn test_stats_are_computed_once() {
        let mut repo = MockDashboardRepo::new();
        repo.expect_stats().times(1).returning(|| {
            Ok(DashboardStats {
                total_suites: 3,
                ..DashboardStats::default()
            })
        });
        let service = create_dashboard_service(repo);

        assert_eq!(service.stats().await.unwrap().total_suites, 3);
        assert_eq!(service.stats().await.unwrap().total_suites, 3);
    }

    #[tokio::test]
    async fn test_trends_are_cached_per_window() {
        let mut repo = MockDashboardRepo::new();
        repo.expect_trends()
            .withf(|days| *days == 7)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.expect_trends()
            .withf(|days| *days == 30)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let service = create_dashboard_service(repo);

        service.trends(7).await.unwrap();
        service.trends(30).await.unwrap();
        service.trends(7).await.unwrap();
    }

    #[tokio::test]
    async fn test_out_of_range_arguments_skip_the_repository() {
        let service = create_dashboard_service(MockDashboardRepo::new());

        assert!(matches!(service.trends(0).await, Err(DashError::Validation(_))));
        assert!(matches!(service.trends(400).await, Err(DashError::Validation(_))));
        assert!(matches!(
            service.recent_executions(0).await,
            Err(DashError::Validation(_))
        ));
        assert!(matches!(
            service.recent_executions(101).await,
            Err(DashError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_aggregate_is_retried() {
        let mut repo = MockDashboardRepo::new();
        let mut attempts = 0;
        repo.expect_performance_metrics().times(2).returning(move || {
            attempts += 1;
            if attempts == 1 {
                Err(DashError::Database("timeout".to_string()))
            } else {
                Ok(PerformanceMetrics::default())
            }
        });
        let service = create_dashboard_service(repo);

        assert!(service.performance_metrics().await.is_err());
        assert!(service.performance_metrics().await.is_ok());
        assert!(service.performance_metrics().await.is_ok());
    }
}
