//! Invalidation recipes.
//!
//! A recipe lists what a mutation can make stale. Update and delete clear
//! the entity key plus every list and aggregate that could contain it;
//! create clears only lists and aggregates because no entity key exists yet.

use crate::keys;
use testdash_core::{CaseId, ExecutionId, SuiteId};

/// Keys and glob patterns to delete for one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidationRecipe {
    /// Exact keys.
    pub keys: Vec<String>,
    /// Glob patterns.
    pub patterns: Vec<String>,
}

impl InvalidationRecipe {
    /// Creates an empty recipe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exact key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Adds a glob pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Returns true if the recipe deletes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.patterns.is_empty()
    }

    /// Suite updated or deleted.
    ///
    /// A deleted suite takes its cases and executions with it, so every case
    /// and execution list is cleared too, filtered or not.
    #[must_use]
    pub fn suite(id: SuiteId) -> Self {
        Self::suite_lists()
            .key(keys::suite(id))
            .pattern(keys::cases_list_pattern())
            .pattern(keys::executions_list_pattern())
    }

    /// Suite created.
    #[must_use]
    pub fn suite_lists() -> Self {
        Self::new()
            .pattern(keys::suites_list_pattern())
            .pattern(keys::dashboard_pattern())
    }

    /// Case updated or deleted.
    #[must_use]
    pub fn case(id: CaseId, suite_id: SuiteId) -> Self {
        Self::case_lists(suite_id).key(keys::case(id))
    }

    /// Case created in `suite_id`.
    #[must_use]
    pub fn case_lists(suite_id: SuiteId) -> Self {
        Self::new()
            .pattern(keys::cases_list_by_suite_pattern(suite_id))
            .pattern(keys::cases_list_pattern())
            .pattern(keys::dashboard_pattern())
    }

    /// Execution updated or deleted.
    #[must_use]
    pub fn execution(id: ExecutionId) -> Self {
        Self::execution_lists().key(keys::execution(id))
    }

    /// Execution recorded.
    #[must_use]
    pub fn execution_lists() -> Self {
        Self::new()
            .pattern(keys::executions_list_pattern())
            .pattern(keys::dashboard_pattern())
    }

    /// Every dashboard aggregate.
    #[must_use]
    pub fn dashboard() -> Self {
        Self::new().pattern(keys::dashboard_pattern())
    }

    /// Everything this cache owns. Keys outside the known namespaces are
    /// left alone, so a shared Redis database is safe.
    #[must_use]
    pub fn all() -> Self {
        keys::NAMESPACES
            .iter()
            .fold(Self::new(), |recipe, ns| recipe.pattern(*ns))
    }
}
