//! # Testdash Domain
//!
//! Entities and value objects of the test-management dashboard.

mod case;
mod dashboard;
mod execution;
mod suite;

pub use case::*;
pub use dashboard::*;
pub use execution::*;
pub use suite::*;
