//! Event router.
//!
//! Decides, for one incoming event, which issues to evaluate and with which
//! predicates, then hands qualifying issues to the [`Notifier`]. Each call
//! is stateless; the issue tracker is the source of truth for counts.
//!
//! | event            | toggle                | action                                   |
//! |------------------|-----------------------|------------------------------------------|
//! | `issues/opened`  | `notify_on_create`    | filters on payload snapshot → `created`  |
//! | `issues/edited`  | `notify_on_threshold` | re-fetch, filters + thresholds           |
//! | `issue_comment/created` | `notify_on_threshold` | re-fetch, filters + thresholds    |
//! | `schedule` or batch toggle | `notify_on_threshold` | sweep listed issues            |

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    EventDescriptor, EventKind, EventPayload, Issue, NotificationReason, NotifierConfig, RepoRef,
};
use crate::domain::ports::{IssueFetcher, IssueLister, ListIssuesQuery, Notifier};

use super::decision::{should_notify_for_issue, should_notify_for_thresholds};

/// GitHub caps `per_page` at 100.
const MAX_PAGE_SIZE: usize = 100;

/// Routes events to the decision engine and the notifier.
pub struct EventRouter {
    config: Arc<NotifierConfig>,
    repo: RepoRef,
    fetcher: Arc<dyn IssueFetcher>,
    lister: Arc<dyn IssueLister>,
    notifier: Arc<dyn Notifier>,
}

impl EventRouter {
    /// Create a router for `repo` with its collaborators.
    pub fn new(
        config: Arc<NotifierConfig>,
        repo: RepoRef,
        fetcher: Arc<dyn IssueFetcher>,
        lister: Arc<dyn IssueLister>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            repo,
            fetcher,
            lister,
            notifier,
        }
    }

    /// Handle one event. Returns the number of issues notified.
    ///
    /// Errors are fatal for the run; the batch sweep never returns one.
    #[instrument(skip_all, fields(event = %event.event_name, repo = %self.repo))]
    pub async fn run(&self, event: &EventDescriptor) -> DomainResult<usize> {
        info!(action = event.action(), "Processing event");

        match event.kind() {
            EventKind::Issues => self.handle_issue_event(&event.payload).await,
            EventKind::IssueComment => self.handle_issue_comment_event(&event.payload).await,
            EventKind::Schedule => Ok(self.handle_batch_check_event().await),
            EventKind::Other(_) if self.config.batch.check_all_open_issues => {
                Ok(self.handle_batch_check_event().await)
            }
            EventKind::Other(name) => {
                info!("Event {name} is not supported");
                Ok(0)
            }
        }
    }

    /// `issues` events: `opened` and `edited`.
    pub async fn handle_issue_event(&self, payload: &EventPayload) -> DomainResult<usize> {
        match payload.action.as_deref() {
            Some("opened") if self.config.notify_on_create => {
                let issue = payload_issue(payload)?;
                if should_notify_for_issue(issue, &self.config.filters) {
                    self.notify(issue, NotificationReason::Created).await;
                    Ok(1)
                } else {
                    Ok(0)
                }
            }
            Some("edited") if self.config.notify_on_threshold => {
                let number = payload_issue(payload)?.number;
                self.check_refreshed_issue(number).await
            }
            action => {
                debug!(action = ?action, "Issue action not handled with current settings");
                Ok(0)
            }
        }
    }

    /// `issue_comment` events: only `created` is considered.
    pub async fn handle_issue_comment_event(&self, payload: &EventPayload) -> DomainResult<usize> {
        if !self.config.notify_on_threshold {
            return Ok(0);
        }

        if payload.action.as_deref() == Some("created") {
            let number = payload_issue(payload)?.number;
            self.check_refreshed_issue(number).await
        } else {
            debug!(action = ?payload.action, "Comment action ignored");
            Ok(0)
        }
    }

    /// Sweep existing issues for ones that meet the thresholds.
    ///
    /// Never fails: collection stops at the first fetch error and whatever
    /// was gathered up to that point is still evaluated.
    pub async fn handle_batch_check_event(&self) -> usize {
        if !self.config.notify_on_threshold {
            info!("Batch checking disabled - notify_on_threshold is false");
            return 0;
        }

        info!("Starting batch check for issues that meet thresholds...");

        let issues = self.collect_issues().await;
        info!(count = issues.len(), "Found {} issues to check", issues.len());

        let mut notified = 0;
        for issue in &issues {
            if self.passes_threshold_checks(issue) {
                self.notify(issue, NotificationReason::ThresholdReached).await;
                notified += 1;
            }
        }

        info!(
            notified,
            checked = issues.len(),
            "Batch check complete: {notified} issues met thresholds and were notified"
        );
        notified
    }

    /// Page through the issue list, re-fetching each entry with full details,
    /// until `max_issues_to_check` issues are gathered or a page comes back empty.
    async fn collect_issues(&self) -> Vec<Issue> {
        let max = self.config.batch.max_issues_to_check;
        let per_page = MAX_PAGE_SIZE.min(max);
        let mut issues = Vec::new();
        let mut page = 1;

        while issues.len() < max {
            let query = ListIssuesQuery::recently_updated(self.config.batch.issue_state, per_page, page);
            match self.collect_page(&query, max, &mut issues).await {
                Ok(true) => page += 1,
                Ok(false) => break,
                Err(e) => {
                    error!(page, error = %e, "Failed to fetch issues page {page}");
                    break;
                }
            }
        }

        issues
    }

    /// Append one page of detailed issues. `Ok(false)` marks the end of the list.
    async fn collect_page(
        &self,
        query: &ListIssuesQuery,
        max: usize,
        issues: &mut Vec<Issue>,
    ) -> DomainResult<bool> {
        let page_issues = self.lister.list_issues(&self.repo, query).await?;
        if page_issues.is_empty() {
            return Ok(false);
        }

        for listed in page_issues {
            if issues.len() >= max {
                break;
            }
            let full = self.fetcher.get_issue(&self.repo, listed.number).await?;
            issues.push(full);
        }

        Ok(true)
    }

    async fn check_refreshed_issue(&self, number: u64) -> DomainResult<usize> {
        let issue = self.fetcher.get_issue(&self.repo, number).await?;
        if self.passes_threshold_checks(&issue) {
            self.notify(&issue, NotificationReason::ThresholdReached).await;
            Ok(1)
        } else {
            Ok(0)
        }
    }

    fn passes_threshold_checks(&self, issue: &Issue) -> bool {
        should_notify_for_issue(issue, &self.config.filters)
            && should_notify_for_thresholds(issue, &self.config.thresholds)
    }

    async fn notify(&self, issue: &Issue, reason: NotificationReason) {
        let report = self.notifier.send_notification(issue, reason).await;
        debug!(
            issue = issue.number,
            reason = %reason,
            delivered = report.delivered,
            failed = report.failed,
            "Notification dispatched"
        );
    }
}

fn payload_issue(payload: &EventPayload) -> DomainResult<&Issue> {
    payload
        .issue
        .as_ref()
        .ok_or_else(|| DomainError::InvalidEvent("payload has no issue".to_string()))
}
