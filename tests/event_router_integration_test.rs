//! End-to-end routing tests
//!
//! Drive the router built by the CLI wiring against mock GitHub, Slack and
//! Discord servers.
//!
//! Test coverage:
//! - New issue notifications reach every configured webhook
//! - Comment events re-fetch the issue and respect label filters
//! - Scheduled sweeps page through the issue list
//! - Webhook failures do not fail the run

mod common;

use common::{inputs_with_webhooks, issue_json, issue_path, issues_path, router_for};
use issue_notifier::domain::models::{ActionInputs, EventDescriptor, EventPayload, Issue};
use mockito::{Matcher, Server};
use serde_json::json;

fn event(name: &str, action: Option<&str>, issue: Option<serde_json::Value>) -> EventDescriptor {
    let payload = EventPayload {
        action: action.map(str::to_string),
        issue: issue.map(|v| serde_json::from_value::<Issue>(v).expect("valid issue json")),
    };
    EventDescriptor::new(name, payload)
}

#[tokio::test]
async fn test_opened_issue_posts_to_both_webhooks() {
    common::setup_test_logging();
    let github = Server::new_async().await;
    let mut hooks = Server::new_async().await;

    let slack = hooks
        .mock("POST", "/slack")
        .match_header("content-type", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({ "unfurl_links": false })),
            Matcher::Regex(r":new: New issue in \[octo/widgets\]".to_string()),
            Matcher::Regex(r"\*Crash on start\*".to_string()),
        ]))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let discord = hooks
        .mock("POST", "/discord")
        .match_body(Matcher::Regex(r#""content":":new: New issue in"#.to_string()))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let router = router_for(&github.url(), &inputs_with_webhooks(&hooks.url()));
    let notified = router
        .run(&event("issues", Some("opened"), Some(issue_json(7, "Crash on start", 0, 0, &[]))))
        .await
        .unwrap();

    assert_eq!(notified, 1);
    slack.assert_async().await;
    discord.assert_async().await;
}

#[tokio::test]
async fn test_opened_issue_filtered_by_keywords() {
    let github = Server::new_async().await;
    let mut hooks = Server::new_async().await;

    let slack = hooks.mock("POST", "/slack").expect(0).create_async().await;

    let inputs = ActionInputs {
        title_keywords: Some("panic, segfault".to_string()),
        ..inputs_with_webhooks(&hooks.url())
    };
    let router = router_for(&github.url(), &inputs);
    let notified = router
        .run(&event("issues", Some("opened"), Some(issue_json(8, "Typo in README", 0, 0, &[]))))
        .await
        .unwrap();

    assert_eq!(notified, 0);
    slack.assert_async().await;
}

#[tokio::test]
async fn test_comment_on_popular_issue_notifies_threshold() {
    let mut github = Server::new_async().await;
    let mut hooks = Server::new_async().await;

    let fetch = github
        .mock("GET", issue_path(21).as_str())
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(issue_json(21, "Memory leak", 6, 1, &["bug"]).to_string())
        .expect(1)
        .create_async()
        .await;
    let slack = hooks
        .mock("POST", "/slack")
        .match_body(Matcher::Regex(r":fire: Issue gaining traction".to_string()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let discord = hooks
        .mock("POST", "/discord")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    // Payload counters are stale; the fetched issue is what gets evaluated.
    let router = router_for(&github.url(), &inputs_with_webhooks(&hooks.url()));
    let notified = router
        .run(&event("issue_comment", Some("created"), Some(issue_json(21, "Memory leak", 0, 0, &[]))))
        .await
        .unwrap();

    assert_eq!(notified, 1);
    fetch.assert_async().await;
    slack.assert_async().await;
    discord.assert_async().await;
}

#[tokio::test]
async fn test_comment_on_excluded_issue_is_skipped() {
    let mut github = Server::new_async().await;
    let mut hooks = Server::new_async().await;

    github
        .mock("GET", issue_path(22).as_str())
        .with_status(200)
        .with_body(issue_json(22, "Old request", 40, 12, &["wontfix"]).to_string())
        .create_async()
        .await;
    let slack = hooks.mock("POST", "/slack").expect(0).create_async().await;
    let discord = hooks.mock("POST", "/discord").expect(0).create_async().await;

    let inputs = ActionInputs {
        excluded_labels: Some("wontfix,duplicate".to_string()),
        ..inputs_with_webhooks(&hooks.url())
    };
    let router = router_for(&github.url(), &inputs);
    let notified = router
        .run(&event("issue_comment", Some("created"), Some(issue_json(22, "Old request", 0, 0, &[]))))
        .await
        .unwrap();

    assert_eq!(notified, 0);
    slack.assert_async().await;
    discord.assert_async().await;
}

#[tokio::test]
async fn test_fetch_failure_fails_the_run() {
    let mut github = Server::new_async().await;
    let hooks = Server::new_async().await;

    github
        .mock("GET", issue_path(23).as_str())
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;

    let router = router_for(&github.url(), &inputs_with_webhooks(&hooks.url()));
    let result = router
        .run(&event("issues", Some("edited"), Some(issue_json(23, "Gone", 0, 0, &[]))))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_schedule_pages_through_issue_list() {
    let mut github = Server::new_async().await;
    let mut hooks = Server::new_async().await;

    let page1 = github
        .mock("GET", issues_path().as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "open".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("sort".into(), "updated".into()),
            Matcher::UrlEncoded("direction".into(), "desc".into()),
        ]))
        .with_status(200)
        .with_body(
            json!([
                issue_json(1, "Quiet issue", 0, 0, &[]),
                issue_json(2, "Hot issue", 0, 0, &[]),
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let page2 = github
        .mock("GET", issues_path().as_str())
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;
    github
        .mock("GET", issue_path(1).as_str())
        .with_status(200)
        .with_body(issue_json(1, "Quiet issue", 1, 0, &[]).to_string())
        .create_async()
        .await;
    github
        .mock("GET", issue_path(2).as_str())
        .with_status(200)
        .with_body(issue_json(2, "Hot issue", 2, 3, &[]).to_string())
        .create_async()
        .await;

    let slack = hooks
        .mock("POST", "/slack")
        .match_body(Matcher::Regex(r"Hot issue".to_string()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    let discord = hooks
        .mock("POST", "/discord")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let router = router_for(&github.url(), &inputs_with_webhooks(&hooks.url()));
    let notified = router.run(&event("schedule", None, None)).await.unwrap();

    assert_eq!(notified, 1);
    page1.assert_async().await;
    page2.assert_async().await;
    slack.assert_async().await;
    discord.assert_async().await;
}

#[tokio::test]
async fn test_batch_stops_at_max_issues() {
    let mut github = Server::new_async().await;
    let mut hooks = Server::new_async().await;

    let list = github
        .mock("GET", issues_path().as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "2".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(
            json!([
                issue_json(1, "First", 0, 0, &[]),
                issue_json(2, "Second", 0, 0, &[]),
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    for number in [1, 2] {
        github
            .mock("GET", issue_path(number).as_str())
            .with_status(200)
            .with_body(issue_json(number, "Busy", 10, 10, &[]).to_string())
            .create_async()
            .await;
    }
    hooks.mock("POST", "/slack").with_status(200).create_async().await;
    hooks.mock("POST", "/discord").with_status(204).create_async().await;

    let inputs = ActionInputs {
        check_all_open_issues: Some("true".to_string()),
        max_issues_to_check: Some("2".to_string()),
        ..inputs_with_webhooks(&hooks.url())
    };
    let router = router_for(&github.url(), &inputs);
    let notified = router.run(&event("workflow_dispatch", None, None)).await.unwrap();

    assert_eq!(notified, 2);
    list.assert_async().await;
}

#[tokio::test]
async fn test_batch_keeps_issues_gathered_before_error() {
    let mut github = Server::new_async().await;
    let mut hooks = Server::new_async().await;

    github
        .mock("GET", issues_path().as_str())
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(json!([issue_json(5, "Popular", 0, 0, &[])]).to_string())
        .create_async()
        .await;
    github
        .mock("GET", issues_path().as_str())
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;
    github
        .mock("GET", issue_path(5).as_str())
        .with_status(200)
        .with_body(issue_json(5, "Popular", 9, 0, &[]).to_string())
        .create_async()
        .await;

    let slack = hooks
        .mock("POST", "/slack")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    hooks.mock("POST", "/discord").with_status(204).create_async().await;

    let router = router_for(&github.url(), &inputs_with_webhooks(&hooks.url()));
    let notified = router.run(&event("schedule", None, None)).await.unwrap();

    assert_eq!(notified, 1);
    slack.assert_async().await;
}

#[tokio::test]
async fn test_webhook_failure_does_not_fail_run() {
    let github = Server::new_async().await;
    let mut hooks = Server::new_async().await;

    let slack = hooks
        .mock("POST", "/slack")
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create_async()
        .await;
    let discord = hooks
        .mock("POST", "/discord")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let router = router_for(&github.url(), &inputs_with_webhooks(&hooks.url()));
    let notified = router
        .run(&event("issues", Some("opened"), Some(issue_json(9, "Broken build", 0, 0, &[]))))
        .await
        .unwrap();

    assert_eq!(notified, 1);
    slack.assert_async().await;
    discord.assert_async().await;
}

#[tokio::test]
async fn test_unsupported_event_does_nothing() {
    let github = Server::new_async().await;
    let router = router_for(&github.url(), &ActionInputs::default());

    let notified = router.run(&event("push", None, None)).await.unwrap();
    assert_eq!(notified, 0);
}

#[tokio::test]
async fn test_opened_without_issue_is_invalid() {
    let github = Server::new_async().await;
    let router = router_for(&github.url(), &inputs_with_webhooks(&github.url()));

    let result = router.run(&event("issues", Some("opened"), None)).await;
    assert!(result.is_err());
}
