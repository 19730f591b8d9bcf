//! # Testdash Service
//!
//! Business logic for suites, cases, executions and dashboard aggregates.
//!
//! Reads go through the [`CacheManager`](testdash_cache::CacheManager) first
//! and fall back to the repository on a miss. Mutations are persisted before
//! the affected keys are invalidated, so a failed write evicts nothing.

pub mod case_service;
pub mod dashboard_service;
pub mod dto;
pub mod r#impl;
pub mod execution_service;
pub mod repository;
pub mod suite_service;

pub use case_service::CaseService;
pub use dashboard_service::DashboardService;
pub use dto::*;
pub use execution_service::ExecutionService;
pub use r#impl::*;
pub use repository::*;
pub use suite_service::SuiteService;
