//! Case DTOs.

use serde::{Deserialize, Serialize};
use testdash_core::rules::not_blank;
use testdash_core::{NewTestCase, SuiteId, TestType};
use validator::Validate;

/// Request to create a case.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCaseRequest {
    pub suite_id: SuiteId,

    #[validate(
        length(min = 1, max = 300, message = "Title must be 1-300 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[serde(default)]
    pub test_type: TestType,
}

impl From<CreateCaseRequest> for NewTestCase {
    fn from(request: CreateCaseRequest) -> Self {
        Self {
            suite_id: request.suite_id,
            title: request.title.trim().to_string(),
            description: request.description,
            test_type: request.test_type,
        }
    }
}

/// Request to update a case.
///
/// Setting `suite_id` moves the case to another suite.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCaseRequest {
    pub suite_id: Option<SuiteId>,

    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub test_type: Option<TestType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use testdash_core::ValidateExt;

    #[test]
    fn test_test_type_defaults_to_functional() {
        let request: CreateCaseRequest =
            serde_json::from_str(r#"{"suite_id": 2, "title": "Valid login"}"#).unwrap();
        assert_eq!(request.test_type, TestType::Functional);
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_overlong_title_is_rejected() {
        let request = UpdateCaseRequest {
            title: Some("x".repeat(301)),
            ..UpdateCaseRequest::default()
        };
        assert!(request.validate_request().is_err());
    }
}
