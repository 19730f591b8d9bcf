//! # Testdash Core
//!
//! Core types, domain entities, and error definitions shared by every
//! Testdash crate: typed IDs, pagination, validation helpers and the
//! unified [`DashError`] type.

pub mod domain;
pub mod error;
pub mod id;
pub mod logging;
pub mod pagination;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, Component, HasComponent, Interface};
