#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, unreachable_pub)]
use reqwest::StatusCode;

mod common;

fn bodies(body: &serde_json::Value) -> Vec<String> {
    body["messages"].as_array().unwrap().iter().map(|m| m["message_body"].as_str().unwrap().to_string()).collect()
}

#[tokio::test]
async fn test_thread_pages_cover_full_result_in_order() {
    let app = common::TestApp::spawn().await;
    let alice = common::unique_user("alice");
    let bob = common::unique_user("bob");

    let total = 7;
    for i in 0..total {
        let (from, to) = if i % 2 == 0 { (&alice, &bob) } else { (&bob, &alice) };
        app.send(from, to, &format!("Message {i}")).await;
    }

    let mut seen = Vec::new();
    for page in 1..=3 {
        let page = page.to_string();
        let query = [("sender", alice.as_str()), ("receiver", bob.as_str()), ("page", page.as_str()), ("page_size", "3")];
        let (status, body) = app.list(&query).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total_count"], total);
        assert_eq!(body["pagination"]["total_pages"], 3);
        assert_eq!(body["pagination"]["page_size"], 3);
        seen.extend(bodies(&body));
    }

    let expected: Vec<String> = (0..total).map(|i| format!("Message {i}")).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_last_page_is_short_and_past_end_is_empty() {
    let app = common::TestApp::spawn().await;
    let alice = common::unique_user("alice");
    let bob = common::unique_user("bob");

    for i in 0..5 {
        app.send(&alice, &bob, &format!("Message {i}")).await;
    }

    let (_, body) = app.list(&[("user", alice.as_str()), ("page", "3"), ("page_size", "2")]).await;
    // Inbox is newest first, so the final page holds the oldest message.
    assert_eq!(bodies(&body), vec!["Message 0"]);
    assert_eq!(body["pagination"]["total_pages"], 3);

    let (status, body) = app.list(&[("user", alice.as_str()), ("page", "4"), ("page_size", "2")]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bodies(&body).is_empty());
    assert_eq!(body["pagination"]["page"], 4);
    assert_eq!(body["pagination"]["total_count"], 5);
}

#[tokio::test]
async fn test_inbox_pages_newest_first() {
    let app = common::TestApp::spawn().await;
    let alice = common::unique_user("alice");
    let bob = common::unique_user("bob");

    for i in 0..4 {
        app.send(&bob, &alice, &format!("Message {i}")).await;
    }

    let (_, first) = app.list(&[("user", alice.as_str()), ("page", "1"), ("page_size", "2")]).await;
    let (_, second) = app.list(&[("user", alice.as_str()), ("page", "2"), ("page_size", "2")]).await;

    assert_eq!(bodies(&first), vec!["Message 3", "Message 2"]);
    assert_eq!(bodies(&second), vec!["Message 1", "Message 0"]);
}

#[tokio::test]
async fn test_non_numeric_paging_uses_defaults() {
    let app = common::TestApp::spawn().await;
    let alice = common::unique_user("alice");
    let bob = common::unique_user("bob");
    app.send(&alice, &bob, "hello").await;

    let (status, body) = app.list(&[("user", alice.as_str()), ("page", "first"), ("page_size", "lots")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["page_size"], 100);
}

#[tokio::test]
async fn test_out_of_range_paging_rejected() {
    let app = common::TestApp::spawn().await;
    let alice = common::unique_user("alice");

    for (page, page_size) in [("0", "10"), ("-1", "10"), ("1", "0")] {
        let (status, body) = app.list(&[("user", alice.as_str()), ("page", page), ("page_size", page_size)]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "page={page} page_size={page_size}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_large_page_size_accepted() {
    let app = common::TestApp::spawn().await;
    let alice = common::unique_user("alice");
    let bob = common::unique_user("bob");
    app.send(&alice, &bob, "one").await;
    app.send(&bob, &alice, "two").await;

    let (status, body) = app.list(&[("user", alice.as_str()), ("page_size", "100000")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["page_size"], 100_000);
    assert_eq!(body["pagination"]["total_pages"], 1);
}
