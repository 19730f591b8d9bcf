//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `suite_service.rs`).

pub mod case_service_impl;
pub mod dashboard_service_impl;
pub mod execution_service_impl;
pub mod suite_service_impl;

pub use case_service_impl::CaseServiceImpl;
pub use dashboard_service_impl::DashboardServiceImpl;
pub use execution_service_impl::ExecutionServiceImpl;
pub use suite_service_impl::SuiteServiceImpl;
