//! Integration tests for the watchlist endpoints.

mod helpers;

use serde_json::json;
use uuid::Uuid;

use helpers::TestApp;

async fn add(app: &TestApp, user: Uuid, symbol: &str) -> helpers::TestResponse {
    app.post(
        "/api/watchlist",
        json!({"userId": user, "stockSymbol": symbol, "notes": "watch earnings"}),
    )
    .await
}

#[tokio::test]
async fn test_add_and_duplicate() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let first = add(&app, user, "AAPL").await;
    assert!(first.success());
    assert_eq!(first.data()["stock_symbol"], "AAPL");
    assert_eq!(first.data()["notes"], "watch earnings");

    let second = add(&app, user, "AAPL").await;
    assert!(!second.success());
    assert_eq!(second.body["error"], "Stock already in watchlist");
    assert_eq!(second.body["code"], "CONFLICT");
    assert_eq!(app.store.len("Watchlist"), 1);
}

#[tokio::test]
async fn test_concurrent_adds_keep_one_row() {
    let app = std::sync::Arc::new(TestApp::new());
    let user = Uuid::new_v4();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let app = app.clone();
        handles.push(tokio::spawn(async move { add(&app, user, "NVDA").await.success() }));
    }

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap() {
            succeeded += 1;
        }
    }
    assert_eq!(succeeded, 1);
    assert_eq!(app.store.len("Watchlist"), 1);
}

#[tokio::test]
async fn test_empty_symbol_is_validation_error() {
    let app = TestApp::new();
    let response = add(&app, Uuid::new_v4(), "").await;
    assert!(!response.success());
    assert_eq!(response.body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_list_membership_notes_and_remove() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    add(&app, user, "AAPL").await;
    add(&app, user, "MSFT").await;
    add(&app, Uuid::new_v4(), "TSLA").await;

    let listed = app.get(&format!("/api/users/{user}/watchlist")).await;
    assert!(listed.success());
    assert_eq!(listed.body["count"], 2);

    let present = app.get(&format!("/api/users/{user}/watchlist/MSFT")).await;
    assert_eq!(present.data(), true);
    let absent = app.get(&format!("/api/users/{user}/watchlist/TSLA")).await;
    assert_eq!(absent.data(), false);

    let updated = app
        .put(
            &format!("/api/users/{user}/watchlist/MSFT/notes"),
            Some(json!({"notes": "trim above 450"})),
        )
        .await;
    assert_eq!(updated.data(), 1);

    let removed = app.delete(&format!("/api/users/{user}/watchlist/MSFT")).await;
    assert!(removed.success());
    assert_eq!(removed.data()["notes"], "trim above 450");
    assert_eq!(removed.body["message"], "Stock removed from watchlist");

    let listed = app.get(&format!("/api/users/{user}/watchlist")).await;
    assert_eq!(listed.body["count"], 1);
}

#[tokio::test]
async fn test_remove_missing_entry() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    add(&app, user, "AAPL").await;

    let response = app.delete(&format!("/api/users/{user}/watchlist/GOOG")).await;
    assert!(!response.success());
    assert_eq!(response.body["error"], "Stock not found in watchlist");
    assert_eq!(response.body["code"], "NOT_FOUND");
    assert_eq!(app.store.len("Watchlist"), 1);
}

#[tokio::test]
async fn test_update_notes_on_missing_entry_is_noop() {
    let app = TestApp::new();
    let response = app
        .put(
            &format!("/api/users/{}/watchlist/IBM/notes", Uuid::new_v4()),
            Some(json!({"notes": null})),
        )
        .await;

    assert!(response.success());
    assert_eq!(response.data(), 0);
    assert!(app.store.is_empty("Watchlist"));
}
