//! Decision engine.
//!
//! Pure predicates over an issue and the run configuration. The only side
//! effect is logging why an issue was rejected.

use tracing::{debug, info};

use crate::domain::models::{FilterConfig, Issue, ThresholdConfig};

/// Whether an issue passes the type, keyword and label filters.
///
/// Checks run in order and stop at the first failure:
/// 1. pull requests are rejected when `issues_only` is set
/// 2. the title must contain one of the keywords (case-insensitive)
/// 3. the issue must carry one of the required labels
/// 4. the issue must carry none of the excluded labels
///
/// An empty list never constrains.
pub fn should_notify_for_issue(issue: &Issue, filters: &FilterConfig) -> bool {
    if filters.issues_only && issue.is_pull_request() {
        info!(
            issue = issue.number,
            "Issue is a pull request, skipping due to issues_only setting"
        );
        return false;
    }

    if !filters.title_keywords.is_empty() {
        let title = issue.title.to_lowercase();
        let has_keyword = filters
            .title_keywords
            .iter()
            .any(|keyword| title.contains(&keyword.to_lowercase()));
        if !has_keyword {
            info!(issue = issue.number, "Issue does not contain required keywords");
            return false;
        }
    }

    if !filters.required_labels.is_empty()
        && !filters.required_labels.iter().any(|l| issue.has_label(l))
    {
        info!(issue = issue.number, "Issue does not have required labels");
        return false;
    }

    if let Some(excluded) = filters.excluded_labels.iter().find(|l| issue.has_label(l)) {
        info!(
            issue = issue.number,
            label = %excluded,
            "Issue has excluded labels"
        );
        return false;
    }

    debug!(issue = issue.number, "Issue passed all filters");
    true
}

/// Whether either the reaction or the comment count reached its threshold.
pub fn should_notify_for_thresholds(issue: &Issue, thresholds: &ThresholdConfig) -> bool {
    let reactions = issue.reaction_count();
    let comments = issue.comment_count();

    info!(
        issue = issue.number,
        reactions,
        comments,
        reaction_threshold = thresholds.reactions,
        comment_threshold = thresholds.comments,
        "Evaluated thresholds"
    );

    reactions >= thresholds.reactions || comments >= thresholds.comments
}
