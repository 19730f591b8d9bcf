//! Cache key builders.
//!
//! These strings are shared with existing cached data and monitoring, so
//! their shape must not drift. Single entities use `{entity}:{id}`,
//! collections use `{entity}s:list:{filter}:skip:{n}:limit:{m}`.

use testdash_core::{CaseId, ExecutionId, ExecutionStatus, PageRequest, SuiteId};

/// Placeholder for an unset filter in list keys.
pub const ANY: &str = "all";

/// Namespaces owned by this cache, cleared by a full invalidation.
pub const NAMESPACES: &[&str] = &[
    "suite:*",
    "suites:*",
    "case:*",
    "cases:*",
    "execution:*",
    "executions:*",
    "dashboard:*",
];

// ============ Suites ============

#[must_use]
pub fn suite(id: SuiteId) -> String {
    format!("suite:{id}")
}

#[must_use]
pub fn suites_list(page: PageRequest) -> String {
    format!("suites:list:skip:{}:limit:{}", page.skip, page.limit)
}

#[must_use]
pub fn suites_list_pattern() -> String {
    "suites:list:*".to_string()
}

// ============ Cases ============

#[must_use]
pub fn case(id: CaseId) -> String {
    format!("case:{id}")
}

/// Key for the cases of one suite.
#[must_use]
pub fn cases_list_by_suite(suite_id: SuiteId, page: PageRequest) -> String {
    format!(
        "cases:list:suite:{}:skip:{}:limit:{}",
        suite_id, page.skip, page.limit
    )
}

/// Key for the unscoped case list.
#[must_use]
pub fn cases_list(page: PageRequest) -> String {
    format!("cases:list:skip:{}:limit:{}", page.skip, page.limit)
}

#[must_use]
pub fn cases_list_by_suite_pattern(suite_id: SuiteId) -> String {
    format!("cases:list:suite:{suite_id}:*")
}

/// Matches every case list, scoped or not.
#[must_use]
pub fn cases_list_pattern() -> String {
    "cases:list:*".to_string()
}

// ============ Executions ============

#[must_use]
pub fn execution(id: ExecutionId) -> String {
    format!("execution:{id}")
}

/// Key for a filtered execution list. Unset filters render as `all`.
#[must_use]
pub fn executions_list(
    suite_id: Option<SuiteId>,
    status: Option<ExecutionStatus>,
    page: PageRequest,
) -> String {
    let suite = suite_id.map_or_else(|| ANY.to_string(), |id| id.to_string());
    let status = status.as_ref().map_or(ANY, ExecutionStatus::as_str);
    format!(
        "executions:list:suite:{}:status:{}:skip:{}:limit:{}",
        suite, status, page.skip, page.limit
    )
}

#[must_use]
pub fn executions_list_pattern() -> String {
    "executions:list:*".to_string()
}

// ============ Dashboard ============

#[must_use]
pub fn dashboard_stats() -> String {
    "dashboard:stats".to_string()
}

#[must_use]
pub fn dashboard_trends(days: u32) -> String {
    format!("dashboard:trends:days:{days}")
}

#[must_use]
pub fn dashboard_recent(limit: u32) -> String {
    format!("dashboard:recent:limit:{limit}")
}

#[must_use]
pub fn dashboard_test_types_distribution() -> String {
    "dashboard:test_types_distribution".to_string()
}

#[must_use]
pub fn dashboard_performance_metrics() -> String {
    "dashboard:performance_metrics".to_string()
}

#[must_use]
pub fn dashboard_pattern() -> String {
    "dashboard:*".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_keys() {
        assert_eq!(suite(SuiteId::new(1)), "suite:1");
        assert_eq!(case(CaseId::new(5)), "case:5");
        assert_eq!(execution(ExecutionId::new(42)), "execution:42");
    }

    #[test]
    fn test_list_keys() {
        let page = PageRequest::new(20, 10);
        assert_eq!(suites_list(page), "suites:list:skip:20:limit:10");
        assert_eq!(cases_list(page), "cases:list:skip:20:limit:10");
        assert_eq!(
            cases_list_by_suite(SuiteId::new(2), page),
            "cases:list:suite:2:skip:20:limit:10"
        );
    }

    #[test]
    fn test_executions_list_key() {
        let page = PageRequest::new(0, 50);
        assert_eq!(
            executions_list(Some(SuiteId::new(3)), Some(ExecutionStatus::Failed), page),
            "executions:list:suite:3:status:failed:skip:0:limit:50"
        );
        assert_eq!(
            executions_list(None, None, page),
            "executions:list:suite:all:status:all:skip:0:limit:50"
        );
    }

    #[test]
    fn test_dashboard_keys() {
        assert_eq!(dashboard_stats(), "dashboard:stats");
        assert_eq!(dashboard_trends(7), "dashboard:trends:days:7");
        assert_eq!(dashboard_recent(10), "dashboard:recent:limit:10");
        assert_eq!(
            dashboard_test_types_distribution(),
            "dashboard:test_types_distribution"
        );
        assert_eq!(dashboard_performance_metrics(), "dashboard:performance_metrics");
    }

    #[test]
    fn test_keys_are_deterministic() {
        let page = PageRequest::new(5, 15);
        assert_eq!(suites_list(page), suites_list(PageRequest::new(5, 15)));
        assert_ne!(suites_list(page), suites_list(PageRequest::new(15, 5)));
    }

    #[test]
    fn test_clamped_limits_share_a_key() {
        assert_eq!(
            suites_list(PageRequest::new(0, 5000)),
            suites_list(PageRequest::new(0, PageRequest::MAX_LIMIT))
        );
    }

    #[test]
    fn test_list_patterns_cover_list_keys() {
        let page = PageRequest::default();
        let scoped = cases_list_by_suite(SuiteId::new(2), page);
        assert!(crate::pattern::glob_match(&cases_list_by_suite_pattern(SuiteId::new(2)), &scoped));
        assert!(crate::pattern::glob_match(&cases_list_pattern(), &scoped));
        assert!(crate::pattern::glob_match(&cases_list_pattern(), &cases_list(page)));
        assert!(!crate::pattern::glob_match(&cases_list_by_suite_pattern(SuiteId::new(20)), &scoped));
    }
}
