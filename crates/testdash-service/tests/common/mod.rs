//! In-memory database shared by the service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use testdash_cache::{CacheManager, InMemoryCacheStore, RedisCacheStore};
use testdash_config::{CacheConfig, RedisConfig};
use testdash_core::{
    CaseId, DashResult, DashboardStats, ExecutionFilter, ExecutionId, ExecutionStatus, NewTestCase,
    NewTestExecution, NewTestSuite, Page, PageRequest, PerformanceMetrics, RecentExecution, SuiteId,
    TestCase, TestExecution, TestSuite, TestType, TestTypeCount, TrendPoint,
};
use testdash_service::{
    CaseRepository, CaseServiceImpl, DashboardRepository, DashboardServiceImpl,
    ExecutionRepository, ExecutionServiceImpl, SuiteRepository, SuiteServiceImpl,
};

/// Plays the part of the relational store and counts every read.
#[derive(Default)]
pub struct InMemoryDb {
    suites: Mutex<BTreeMap<SuiteId, TestSuite>>,
    cases: Mutex<BTreeMap<CaseId, TestCase>>,
    executions: Mutex<BTreeMap<ExecutionId, TestExecution>>,
    next_id: AtomicI64,
    reads: AtomicUsize,
}

impl InMemoryDb {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn paginate<T: Clone>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let window = items
        .into_iter()
        .skip(page.skip as usize)
        .take(page.limit as usize)
        .collect();
    Page::new(window, page, total)
}

#[async_trait]
impl SuiteRepository for InMemoryDb {
    async fn find_by_id(&self, id: SuiteId) -> DashResult<Option<TestSuite>> {
        self.read();
        Ok(self.suites.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> DashResult<Page<TestSuite>> {
        self.read();
        let suites = self.suites.lock().unwrap().values().cloned().collect();
        Ok(paginate(suites, page))
    }

    async fn save(&self, suite: &NewTestSuite) -> DashResult<TestSuite> {
        let now = Utc::now();
        let saved = TestSuite {
            id: SuiteId::new(self.next_id()),
            name: suite.name.clone(),
            description: suite.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.suites.lock().unwrap().insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, suite: &TestSuite) -> DashResult<TestSuite> {
        self.suites.lock().unwrap().insert(suite.id, suite.clone());
        Ok(suite.clone())
    }

    async fn delete(&self, id: SuiteId) -> DashResult<bool> {
        Ok(self.suites.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl CaseRepository for InMemoryDb {
    async fn find_by_id(&self, id: CaseId) -> DashResult<Option<TestCase>> {
        self.read();
        Ok(self.cases.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> DashResult<Page<TestCase>> {
        self.read();
        let cases = self.cases.lock().unwrap().values().cloned().collect();
        Ok(paginate(cases, page))
    }

    async fn find_by_suite(&self, suite_id: SuiteId, page: PageRequest) -> DashResult<Page<TestCase>> {
        self.read();
        let cases = self
            .cases
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.suite_id == suite_id)
            .cloned()
            .collect();
        Ok(paginate(cases, page))
    }

    async fn save(&self, case: &NewTestCase) -> DashResult<TestCase> {
        let now = Utc::now();
        let saved = TestCase {
            id: CaseId::new(self.next_id()),
            suite_id: case.suite_id,
            title: case.title.clone(),
            description: case.description.clone(),
            test_type: case.test_type,
            created_at: now,
            updated_at: now,
        };
        self.cases.lock().unwrap().insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, case: &TestCase) -> DashResult<TestCase> {
        self.cases.lock().unwrap().insert(case.id, case.clone());
        Ok(case.clone())
    }

    async fn delete(&self, id: CaseId) -> DashResult<bool> {
        Ok(self.cases.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl ExecutionRepository for InMemoryDb {
    async fn find_by_id(&self, id: ExecutionId) -> DashResult<Option<TestExecution>> {
        self.read();
        Ok(self.executions.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self, filter: ExecutionFilter, page: PageRequest) -> DashResult<Page<TestExecution>> {
        self.read();
        let executions = self
            .executions
            .lock()
            .unwrap()
            .values()
            .rev()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        Ok(paginate(executions, page))
    }

    async fn save(&self, execution: &NewTestExecution) -> DashResult<TestExecution> {
        let saved = TestExecution {
            id: ExecutionId::new(self.next_id()),
            case_id: execution.case_id,
            suite_id: execution.suite_id,
            status: execution.status,
            duration_ms: execution.duration_ms,
            notes: execution.notes.clone(),
            executed_at: Utc::now(),
        };
        self.executions.lock().unwrap().insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, execution: &TestExecution) -> DashResult<TestExecution> {
        self.executions
            .lock()
            .unwrap()
            .insert(execution.id, execution.clone());
        Ok(execution.clone())
    }

    async fn delete(&self, id: ExecutionId) -> DashResult<bool> {
        Ok(self.executions.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl DashboardRepository for InMemoryDb {
    async fn stats(&self) -> DashResult<DashboardStats> {
        self.read();
        let total_suites = self.suites.lock().unwrap().len() as u64;
        let total_cases = self.cases.lock().unwrap().len() as u64;
        let executions = self.executions.lock().unwrap();
        let passed = executions
            .values()
            .filter(|e| e.status == ExecutionStatus::Passed)
            .count() as u64;
        let failed = executions
            .values()
            .filter(|e| e.status == ExecutionStatus::Failed)
            .count() as u64;
        let total = executions.len() as u64;

        Ok(DashboardStats {
            total_suites,
            total_cases,
            total_executions: total,
            passed_executions: passed,
            failed_executions: failed,
            pass_rate: if total == 0 { 0.0 } else { passed as f64 / total as f64 },
        })
    }

    async fn trends(&self, days: u32) -> DashResult<Vec<TrendPoint>> {
        self.read();
        let since = Utc::now() - Duration::days(i64::from(days));
        let mut by_day: BTreeMap<_, TrendPoint> = BTreeMap::new();

        for execution in self.executions.lock().unwrap().values() {
            if execution.executed_at < since {
                continue;
            }
            let date = execution.executed_at.date_naive();
            let point = by_day.entry(date).or_insert(TrendPoint {
                date,
                passed: 0,
                failed: 0,
                total: 0,
            });
            point.total += 1;
            match execution.status {
                ExecutionStatus::Passed => point.passed += 1,
                ExecutionStatus::Failed => point.failed += 1,
                _ => {}
            }
        }
        Ok(by_day.into_values().collect())
    }

    async fn recent_executions(&self, limit: u32) -> DashResult<Vec<RecentExecution>> {
        self.read();
        let suites = self.suites.lock().unwrap();
        let cases = self.cases.lock().unwrap();

        Ok(self
            .executions
            .lock()
            .unwrap()
            .values()
            .rev()
            .take(limit as usize)
            .map(|e| RecentExecution {
                id: e.id,
                case_id: e.case_id,
                case_title: cases.get(&e.case_id).map(|c| c.title.clone()).unwrap_or_default(),
                suite_id: e.suite_id,
                suite_name: suites.get(&e.suite_id).map(|s| s.name.clone()).unwrap_or_default(),
                status: e.status,
                executed_at: e.executed_at,
            })
            .collect())
    }

    async fn test_types_distribution(&self) -> DashResult<Vec<TestTypeCount>> {
        self.read();
        let mut counts: HashMap<TestType, u64> = HashMap::new();
        for case in self.cases.lock().unwrap().values() {
            *counts.entry(case.test_type).or_default() += 1;
        }
        Ok(TestType::all()
            .into_iter()
            .filter_map(|test_type| {
                counts
                    .get(&test_type)
                    .map(|count| TestTypeCount { test_type, count: *count })
            })
            .collect())
    }

    async fn performance_metrics(&self) -> DashResult<PerformanceMetrics> {
        self.read();
        let executions = self.executions.lock().unwrap();
        let mut durations: Vec<(u64, CaseId)> = executions
            .values()
            .filter_map(|e| e.duration_ms.map(|d| (d, e.case_id)))
            .collect();
        durations.sort_unstable();

        if durations.is_empty() {
            return Ok(PerformanceMetrics::default());
        }

        let sum: u64 = durations.iter().map(|(d, _)| d).sum();
        let p95_index = (durations.len() * 95).div_ceil(100).saturating_sub(1);
        Ok(PerformanceMetrics {
            average_duration_ms: sum as f64 / durations.len() as f64,
            p95_duration_ms: durations[p95_index].0,
            slowest_case_id: durations.last().map(|(_, case_id)| *case_id),
            executions_last_24h: executions
                .values()
                .filter(|e| e.executed_at > Utc::now() - Duration::hours(24))
                .count() as u64,
        })
    }
}

/// All four services over one database and one cache.
pub struct Services {
    pub db: Arc<InMemoryDb>,
    pub cache: Arc<CacheManager>,
    pub suites: SuiteServiceImpl<InMemoryDb>,
    pub cases: CaseServiceImpl<InMemoryDb>,
    pub executions: ExecutionServiceImpl<InMemoryDb>,
    pub dashboard: DashboardServiceImpl<InMemoryDb>,
}

impl Services {
    /// Services over an in-memory cache store.
    pub fn new() -> Self {
        Self::with_cache(Arc::new(CacheManager::new(Arc::new(InMemoryCacheStore::new()))))
    }

    /// Services over a Redis endpoint nothing listens on.
    pub fn degraded() -> Self {
        let redis = RedisConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            connect_timeout_secs: 1,
            pool_size: 2,
            ..RedisConfig::default()
        };
        let cache = CacheConfig {
            operation_timeout_ms: 200,
            ..CacheConfig::default()
        };
        let store = RedisCacheStore::connect(&redis, &cache).expect("Failed to build Redis store");
        Self::with_cache(Arc::new(CacheManager::new(Arc::new(store))))
    }

    pub fn with_cache(cache: Arc<CacheManager>) -> Self {
        let db = Arc::new(InMemoryDb::default());
        Self {
            suites: SuiteServiceImpl::new(db.clone(), cache.clone()),
            cases: CaseServiceImpl::new(db.clone(), cache.clone()),
            executions: ExecutionServiceImpl::new(db.clone(), cache.clone()),
            dashboard: DashboardServiceImpl::new(db.clone(), cache.clone()),
            db,
            cache,
        }
    }
}
