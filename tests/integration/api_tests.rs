//! API integration tests against the in-memory stores

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_app_server::{api, repository::Repository, AppConfig, AppState};

fn setup() -> Router {
    let state = AppState::new(AppConfig::default(), Repository::in_memory());
    api::create_router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri));
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("Failed to build request"))
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_save_book_and_statistics() {
    let app = setup();

    for (name, book_type) in [("A", "COMPUTER"), ("B", "COMPUTER"), ("C", "SCIENCE")] {
        let (status, body) = send(
            &app,
            "POST",
            "/book",
            Some(json!({ "name": name, "type": book_type })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], name);
        assert_eq!(body["type"], book_type);
    }

    let (status, body) = send(&app, "GET", "/book/stat", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "type": "COMPUTER", "count": 2 },
            { "type": "SCIENCE", "count": 1 }
        ])
    );
}

#[tokio::test]
async fn test_save_book_with_empty_name() {
    let app = setup();

    let (status, body) = send(&app, "POST", "/book", Some(json!({ "name": "", "type": "ETC" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (_, body) = send(&app, "GET", "/book/stat", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_loan_workflow() {
    let app = setup();
    let loan = json!({ "userName": "Choi", "bookName": "Alice" });

    let (status, _) = send(&app, "POST", "/user", Some(json!({ "name": "Choi" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "PUT", "/book/loan", Some(loan.clone())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "PUT", "/book/loan", Some(loan.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "BookAlreadyLoaned");

    let (_, body) = send(&app, "GET", "/book/loan", None).await;
    assert_eq!(body, json!(1));

    let (status, _) = send(&app, "PUT", "/book/return", Some(loan.clone())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/book/loan", None).await;
    assert_eq!(body, json!(0));

    let (status, body) = send(&app, "GET", "/user/loan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "name": "Choi", "books": [{ "name": "Alice", "isReturn": true }] }])
    );
}

#[tokio::test]
async fn test_loan_to_unknown_user() {
    let app = setup();

    let (status, body) = send(
        &app,
        "PUT",
        "/book/loan",
        Some(json!({ "userName": "Nobody", "bookName": "Alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchUser");
}

#[tokio::test]
async fn test_user_crud() {
    let app = setup();

    let (_, created) = send(&app, "POST", "/user", Some(json!({ "name": "A", "age": 20 }))).await;
    send(&app, "POST", "/user", Some(json!({ "name": "B", "age": null }))).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/user",
        Some(json!({ "id": created["id"], "name": "C" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/user", None).await;
    let users = body.as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert!(users.iter().any(|u| u["name"] == "C" && u["age"] == 20));
    assert!(users.iter().any(|u| u["name"] == "B" && u["age"].is_null()));

    let (status, _) = send(&app, "DELETE", "/user?name=C", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", "/user?name=C", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/user", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_rename_unknown_user() {
    let app = setup();

    let (status, _) = send(&app, "PUT", "/user", Some(json!({ "id": 99, "name": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_long_names_are_accepted() {
    let app = setup();
    let long = "x".repeat(300);

    let (status, body) = send(&app, "POST", "/book", Some(json!({ "name": long, "type": "ETC" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], long.as_str());

    let (status, _) = send(&app, "POST", "/user", Some(json!({ "name": long }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let loan = json!({ "userName": long, "bookName": long });
    let (status, _) = send(&app, "PUT", "/book/loan", Some(loan)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
