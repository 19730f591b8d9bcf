//! Suite DTOs.

use serde::{Deserialize, Serialize};
use testdash_core::rules::not_blank;
use testdash_core::NewTestSuite;
use validator::Validate;

/// Request to create a suite.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSuiteRequest {
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,
}

impl From<CreateSuiteRequest> for NewTestSuite {
    fn from(request: CreateSuiteRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            description: request.description,
        }
    }
}

/// Request to update a suite. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSuiteRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,
}
