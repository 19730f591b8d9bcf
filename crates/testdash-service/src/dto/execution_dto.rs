//! Execution DTOs.

use serde::{Deserialize, Serialize};
use testdash_core::{CaseId, ExecutionStatus, NewTestExecution, SuiteId};
use validator::Validate;

/// Request to record an execution.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateExecutionRequest {
    pub case_id: CaseId,
    pub suite_id: SuiteId,

    #[serde(default)]
    pub status: ExecutionStatus,

    #[validate(range(max = 86400000, message = "Duration cannot exceed 24 hours"))]
    pub duration_ms: Option<u64>,

    #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
    pub notes: Option<String>,
}

impl From<CreateExecutionRequest> for NewTestExecution {
    fn from(request: CreateExecutionRequest) -> Self {
        Self {
            case_id: request.case_id,
            suite_id: request.suite_id,
            status: request.status,
            duration_ms: request.duration_ms,
            notes: request.notes,
        }
    }
}

/// Request to change the status of an execution.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateExecutionStatusRequest {
    pub status: ExecutionStatus,

    #[validate(range(max = 86400000, message = "Duration cannot exceed 24 hours"))]
    pub duration_ms: Option<u64>,

    #[validate(length(max = 2000, message = "Notes cannot exceed 2000 characters"))]
    pub notes: Option<String>,
}

impl UpdateExecutionStatusRequest {
    /// Creates a status-only update.
    #[must_use]
    pub fn new(status: ExecutionStatus) -> Self {
        Self {
            status,
            duration_ms: None,
            notes: None,
        }
    }
}
