//! Request DTOs.

mod case_dto;
mod execution_dto;
mod suite_dto;

pub use case_dto::*;
pub use execution_dto::*;
pub use suite_dto::*;
