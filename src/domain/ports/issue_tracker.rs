//! Issue tracker ports.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Issue, IssueState, RepoRef};

/// Parameters for one page of the repository issue list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListIssuesQuery {
    /// State filter.
    pub state: IssueState,
    /// Page size, at most 100.
    pub per_page: usize,
    /// 1-based page number.
    pub page: usize,
    /// Sort field.
    pub sort: &'static str,
    /// `asc` or `desc`.
    pub direction: &'static str,
}

impl ListIssuesQuery {
    /// Most-recently-updated first.
    pub const fn recently_updated(state: IssueState, per_page: usize, page: usize) -> Self {
        Self {
            state,
            per_page,
            page,
            sort: "updated",
            direction: "desc",
        }
    }
}

/// Fetches the full, current record of a single issue.
#[async_trait]
pub trait IssueFetcher: Send + Sync {
    /// Fetch issue `number` with reactions, comments and labels.
    async fn get_issue(&self, repo: &RepoRef, number: u64) -> DomainResult<Issue>;
}

/// Lists repository issues one page at a time.
///
/// An empty page signals the end of the list.
#[async_trait]
pub trait IssueLister: Send + Sync {
    /// Fetch one page of issues.
    async fn list_issues(&self, repo: &RepoRef, query: &ListIssuesQuery)
        -> DomainResult<Vec<Issue>>;
}
