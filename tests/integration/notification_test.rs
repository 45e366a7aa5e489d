//! Integration tests for the notification endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::TestApp;

fn notification_body(user_id: Uuid) -> serde_json::Value {
    json!({
        "userId": user_id,
        "title": "Price alert",
        "message": "AAPL crossed 200",
        "referenceId": "AAPL",
        "referenceType": "stock",
        "actionUrl": "/stocks/AAPL"
    })
}

#[tokio::test]
async fn test_create_notification_defaults_type() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app.post("/api/notifications", notification_body(user)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.success());
    assert_eq!(response.data()["type"], "system");
    assert_eq!(response.data()["is_read"], false);
    assert_eq!(response.data()["user_id"], user.to_string());
    assert_eq!(response.body["message"], "Notification created successfully");
}

#[tokio::test]
async fn test_create_notification_rejects_empty_title() {
    let app = TestApp::new();
    let mut body = notification_body(Uuid::new_v4());
    body["title"] = json!("");

    let response = app.post("/api/notifications", body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.success());
    assert_eq!(response.body["code"], "VALIDATION");
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    for _ in 0..3 {
        app.post("/api/notifications", notification_body(user)).await;
    }
    let mut trade = notification_body(user);
    trade["type"] = json!("trade");
    app.post("/api/notifications", trade).await;
    app.post("/api/notifications", notification_body(Uuid::new_v4()))
        .await;

    let all = app.get(&format!("/api/users/{user}/notifications")).await;
    assert!(all.success());
    assert_eq!(all.body["count"], 4);

    let page = app
        .get(&format!("/api/users/{user}/notifications?limit=2&offset=0"))
        .await;
    assert_eq!(page.body["count"], 2);

    let trades = app
        .get(&format!("/api/users/{user}/notifications?type=trade"))
        .await;
    assert_eq!(trades.body["count"], 1);
    assert_eq!(trades.data()[0]["type"], "trade");
}

#[tokio::test]
async fn test_list_rejects_bad_limit() {
    let app = TestApp::new();
    let response = app
        .get(&format!(
            "/api/users/{}/notifications?limit=many",
            Uuid::new_v4()
        ))
        .await;

    assert!(!response.success());
    assert_eq!(response.body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_read_state_flow() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let first = app.post("/api/notifications", notification_body(user)).await;
    for _ in 0..2 {
        app.post("/api/notifications", notification_body(user)).await;
    }
    let unread_path = format!("/api/users/{user}/notifications/unread-count");

    let unread = app.get(&unread_path).await;
    assert_eq!(unread.data(), 3);
    assert_eq!(unread.body["count"], 3);

    let id = first.data()["id"].as_str().unwrap().to_string();
    let marked = app.put(&format!("/api/notifications/{id}/read"), None).await;
    assert!(marked.success());
    assert_eq!(app.get(&unread_path).await.data(), 2);

    let only_unread = app
        .get(&format!("/api/users/{user}/notifications?is_read=false"))
        .await;
    assert_eq!(only_unread.body["count"], 2);

    let all_read = app
        .put(&format!("/api/users/{user}/notifications/read-all"), None)
        .await;
    assert!(all_read.success());
    assert_eq!(all_read.data(), 2);
    assert_eq!(app.get(&unread_path).await.data(), 0);
}

#[tokio::test]
async fn test_bulk_send() {
    let app = TestApp::new();
    let users = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];

    let response = app
        .post(
            "/api/notifications/bulk",
            json!({
                "userIds": users,
                "title": "Market holiday",
                "message": "Exchanges closed Monday",
                "type": "market"
            }),
        )
        .await;

    assert!(response.success());
    assert_eq!(response.body["count"], 3);
    for (sent, user) in response.data().as_array().unwrap().iter().zip(users) {
        assert_eq!(sent["user_id"], user.to_string());
        assert_eq!(sent["type"], "market");
    }
}

#[tokio::test]
async fn test_bulk_send_requires_recipients() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/notifications/bulk",
            json!({"userIds": [], "title": "t", "message": "m"}),
        )
        .await;

    assert!(!response.success());
    assert_eq!(response.body["code"], "VALIDATION");
    assert!(app.store.is_empty("Notification"));
}

#[tokio::test]
async fn test_delete_notification() {
    let app = TestApp::new();
    let created = app
        .post("/api/notifications", notification_body(Uuid::new_v4()))
        .await;
    let id = created.data()["id"].as_str().unwrap().to_string();

    let removed = app.delete(&format!("/api/notifications/{id}")).await;
    assert!(removed.success());
    assert_eq!(removed.data(), 1);
    assert!(app.store.is_empty("Notification"));
}

#[tokio::test]
async fn test_malformed_id_is_rejected_by_extractor() {
    let app = TestApp::new();
    let response = app.put("/api/notifications/not-a-uuid/read", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
