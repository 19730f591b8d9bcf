//! Test case entity.

use crate::{CaseId, SuiteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of test a case represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    #[default]
    Functional,
    Regression,
    Smoke,
    Integration,
    Performance,
    Security,
}

impl TestType {
    /// All test types, in display order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Functional,
            Self::Regression,
            Self::Smoke,
            Self::Integration,
            Self::Performance,
            Self::Security,
        ]
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::Regression => "regression",
            Self::Smoke => "smoke",
            Self::Integration => "integration",
            Self::Performance => "performance",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single test case belonging to a suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: CaseId,
    pub suite_id: SuiteId,
    pub title: String,
    pub description: Option<String>,
    pub test_type: TestType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a case that does not have an ID yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTestCase {
    pub suite_id: SuiteId,
    pub title: String,
    pub description: Option<String>,
    pub test_type: TestType,
}

impl TestCase {
    /// Applies a partial update, touching `updated_at`.
    ///
    /// Moving a case to a different suite is a plain field update here; the
    /// caller is responsible for invalidating both suites' lists.
    pub fn apply_update(
        &mut self,
        suite_id: Option<SuiteId>,
        title: Option<String>,
        description: Option<String>,
        test_type: Option<TestType>,
    ) {
        if let Some(suite_id) = suite_id {
            self.suite_id = suite_id;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if description.is_some() {
            self.description = description;
        }
        if let Some(test_type) = test_type {
            self.test_type = test_type;
        }
        self.updated_at = Utc::now();
    }
}
