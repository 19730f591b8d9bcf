//! Test suite entity.

use crate::SuiteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named group of test cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    pub id: SuiteId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a suite that does not have an ID yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTestSuite {
    pub name: String,
    pub description: Option<String>,
}

impl TestSuite {
    /// Applies a partial update, touching `updated_at`.
    pub fn apply_update(&mut self, name: Option<String>, description: Option<String>) {
        if let Some(name) = name {
            self.name = name;
        }
        if description.is_some() {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}
