//! GitHub HTTP client with rate limiting.
//!
//! Wraps the two GitHub REST API v3 endpoints the notifier needs: a single
//! issue and the paginated repository issue list. Requests go through a
//! `governor` limiter to stay within the 5 000 req/hour authenticated
//! API limit.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Issue, RepoRef};
use crate::domain::ports::{IssueFetcher, IssueLister, ListIssuesQuery};

/// Base URL for the GitHub REST API v3.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const REQUESTS_PER_HOUR: NonZeroU32 = match NonZeroU32::new(5_000) {
    Some(n) => n,
    None => unreachable!(),
};

/// HTTP client for the GitHub REST API v3.
///
/// Transport errors map to [`DomainError::Http`], non-success statuses to
/// [`DomainError::GitHubApi`].
#[derive(Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: Client,
    /// API root, without trailing slash.
    base_url: String,
    /// Token from `GITHUB_TOKEN`; requests are anonymous without one.
    token: Option<String>,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl GitHubClient {
    /// Create a client against `api.github.com`.
    pub fn new(http: Client, token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        if token.is_none() {
            tracing::warn!("No GitHub token configured, API requests will be unauthenticated");
        }
        Self {
            http,
            base_url: DEFAULT_API_URL.to_string(),
            token,
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_hour(REQUESTS_PER_HOUR))),
        }
    }

    /// Point the client at a different API root (GitHub Enterprise, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// API root in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn issues_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}/issues", self.base_url, repo.owner, repo.name)
    }

    /// Wait for a rate-limit permit and build an authorized request.
    async fn rate_limited_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.rate_limiter.until_ready().await;
        let req = self
            .http
            .request(method, url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        req: RequestBuilder,
    ) -> DomainResult<T> {
        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::GitHubApi {
                operation: operation.to_string(),
                status,
                body,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetch a single issue with reactions, comment count and labels.
    pub async fn get_issue(&self, repo: &RepoRef, number: u64) -> DomainResult<Issue> {
        let url = format!("{}/{number}", self.issues_url(repo));
        tracing::debug!(repo = %repo, issue = number, "Fetching issue details");

        let req = self.rate_limited_request(Method::GET, &url).await;
        self.send_json("get_issue", req).await
    }

    /// Fetch one page of the repository issue list.
    ///
    /// Note: GitHub's `/issues` endpoint also returns pull requests.
    pub async fn list_issues(
        &self,
        repo: &RepoRef,
        query: &ListIssuesQuery,
    ) -> DomainResult<Vec<Issue>> {
        let url = self.issues_url(repo);
        tracing::debug!(
            repo = %repo,
            state = %query.state,
            page = query.page,
            per_page = query.per_page,
            "Listing issues"
        );

        let req = self
            .rate_limited_request(Method::GET, &url)
            .await
            .query(&[
                ("state", query.state.as_str().to_string()),
                ("per_page", query.per_page.to_string()),
                ("page", query.page.to_string()),
                ("sort", query.sort.to_string()),
                ("direction", query.direction.to_string()),
            ]);
        self.send_json("list_issues", req).await
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IssueFetcher for GitHubClient {
    async fn get_issue(&self, repo: &RepoRef, number: u64) -> DomainResult<Issue> {
        GitHubClient::get_issue(self, repo, number).await
    }
}

#[async_trait]
impl IssueLister for GitHubClient {
    async fn list_issues(
        &self,
        repo: &RepoRef,
        query: &ListIssuesQuery,
    ) -> DomainResult<Vec<Issue>> {
        GitHubClient::list_issues(self, repo, query).await
    }
}
