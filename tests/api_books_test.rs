use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use bookshelf::infrastructure::AppState;
use bookshelf::{db, server};

// Helper to build the full app against an in-memory database
async fn setup_test_app() -> Router {
    let conn = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    server::build_router(AppState::new(conn))
}

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn create_book(app: &Router, title: &str) -> Value {
    let req = json_request("POST", "/api/books", &serde_json::json!({ "title": title }));
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_create_book_returns_full_book() {
    let app = setup_test_app().await;

    let book = create_book(&app, "The Hobbit").await;

    assert!(book["id"].is_number());
    assert_eq!(book["title"], "The Hobbit");
    assert_eq!(book["comments"], serde_json::json!([]));
    assert_eq!(book["commentCount"], 0);
}

#[tokio::test]
async fn test_list_books_projects_comment_count() {
    let app = setup_test_app().await;

    let first = create_book(&app, "Dune").await;
    create_book(&app, "Foundation").await;

    // One comment on the first book
    let uri = format!("/api/books/{}", first["id"]);
    let req = json_request("POST", &uri, &serde_json::json!({ "comment": "classic" }));
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/books"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let books = body_json(response).await;
    let books = books.as_array().expect("list response is an array");
    assert_eq!(books.len(), 2);

    // Insertion order is preserved
    assert_eq!(books[0]["title"], "Dune");
    assert_eq!(books[0]["commentCount"], 1);
    assert_eq!(books[1]["title"], "Foundation");
    assert_eq!(books[1]["commentCount"], 0);

    // The comments array itself is not part of the collection view
    assert!(books[0].get("comments").is_none());
}

#[tokio::test]
async fn test_list_empty_store_is_empty_array() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/books"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_get_book_returns_comment_list() {
    let app = setup_test_app().await;

    let book = create_book(&app, "Ubik").await;
    let uri = format!("/api/books/{}", book["id"]);

    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], book["id"]);
    assert_eq!(body["title"], "Ubik");
    assert_eq!(body["comments"], serde_json::json!([]));
    // The item view carries the comments, not the count
    assert!(body.get("commentCount").is_none());
}

#[tokio::test]
async fn test_sequential_appends_preserve_order_and_count() {
    let app = setup_test_app().await;

    let book = create_book(&app, "The Hobbit").await;
    let uri = format!("/api/books/{}", book["id"]);

    let req = json_request("POST", &uri, &serde_json::json!({ "comment": "great read" }));
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["comments"], serde_json::json!(["great read"]));
    assert_eq!(body["commentCount"], 1);

    let req = json_request("POST", &uri, &serde_json::json!({ "comment": "agreed" }));
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["comments"], serde_json::json!(["great read", "agreed"]));
    assert_eq!(body["commentCount"], 2);
}

#[tokio::test]
async fn test_many_appends_count_matches_length() {
    let app = setup_test_app().await;

    let book = create_book(&app, "Hyperion").await;
    let uri = format!("/api/books/{}", book["id"]);

    let mut last = Value::Null;
    for i in 0..5 {
        let req = json_request(
            "POST",
            &uri,
            &serde_json::json!({ "comment": format!("comment {}", i) }),
        );
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        last = body_json(response).await;
    }

    assert_eq!(last["commentCount"], 5);
    let comments = last["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 5);
    assert_eq!(comments[0], "comment 0");
    assert_eq!(comments[4], "comment 4");
}

#[tokio::test]
async fn test_delete_book_then_get_is_not_found() {
    let app = setup_test_app().await;

    let book = create_book(&app, "The Hobbit").await;
    let uri = format!("/api/books/{}", book["id"]);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "delete successful");

    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "no book exists");
}

#[tokio::test]
async fn test_delete_all_then_list_is_empty() {
    let app = setup_test_app().await;

    create_book(&app, "Solaris").await;
    create_book(&app, "Roadside Picnic").await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/books"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "complete delete successful");

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/books"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "bookshelf");
}
