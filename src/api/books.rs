use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::Book;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCommentRequest {
    // Comment content is not validated; an absent field is an empty comment
    #[serde(default)]
    pub comment: String,
}

// The legacy contract reuses the not-found text for store failures; the
// status code (503 vs 404) is what distinguishes them for callers.
fn error_response(err: DomainError, message: &str) -> Response {
    match err {
        DomainError::NotFound => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
        }
        DomainError::Validation(msg) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": msg }))).into_response()
        }
        DomainError::Database(msg) => {
            tracing::error!("store failure: {}", msg);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": message }))).into_response()
        }
    }
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books as {id, title, commentCount}"),
        (status = 503, description = "Store unreachable")
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Response {
    match state.book_repo.find_all().await {
        Ok(books) => {
            // Collection view carries the count, not the comments themselves
            let summaries: Vec<Value> = books
                .into_iter()
                .map(|b| {
                    json!({
                        "id": b.id,
                        "title": b.title,
                        "commentCount": b.comment_count
                    })
                })
                .collect();

            // An empty store is an empty array, not an error
            (StatusCode::OK, Json(Value::Array(summaries))).into_response()
        }
        Err(e) => error_response(e, "no books exist"),
    }
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookRequest,
    responses(
        (status = 200, description = "Created book", body = Book),
        (status = 422, description = "Missing or empty title")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookRequest>,
) -> Response {
    let title = payload.title.unwrap_or_default();

    if title.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "please provide a title" })),
        )
            .into_response();
    }

    match state.book_repo.create(title).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => error_response(e, "no books exist"),
    }
}

#[utoipa::path(
    delete,
    path = "/api/books",
    responses(
        (status = 200, description = "Every book removed"),
        (status = 503, description = "Store unreachable")
    )
)]
pub async fn delete_all_books(State(state): State<AppState>) -> Response {
    match state.book_repo.delete_all().await {
        Ok(removed) => {
            tracing::debug!("deleted {} books", removed);
            (
                StatusCode::OK,
                Json(json!({ "message": "complete delete successful" })),
            )
                .into_response()
        }
        Err(e) => error_response(e, "no books exist"),
    }
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book with full comment list"),
        (status = 404, description = "No book with this ID")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    // A malformed ID resolves to no book, same as an unknown one
    let Ok(id) = id.parse::<i32>() else {
        return not_found("no book exists");
    };

    match state.book_repo.find_by_id(id).await {
        Ok(Some(book)) => (
            StatusCode::OK,
            Json(json!({
                "id": book.id,
                "title": book.title,
                "comments": book.comments
            })),
        )
            .into_response(),
        Ok(None) => not_found("no book exists"),
        Err(e) => error_response(e, "no book exists"),
    }
}

#[utoipa::path(
    post,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book ID")),
    request_body = AddCommentRequest,
    responses(
        (status = 200, description = "Updated book", body = Book),
        (status = 404, description = "No book with this ID")
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AddCommentRequest>,
) -> Response {
    let Ok(id) = id.parse::<i32>() else {
        return not_found("no book exists");
    };

    match state.book_repo.append_comment(id, payload.comment).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(e) => error_response(e, "no book exists"),
    }
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book removed"),
        (status = 404, description = "No book with this ID")
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<i32>() else {
        return not_found("no book exists");
    };

    match state.book_repo.delete(id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "delete successful" }))).into_response(),
        Err(e) => error_response(e, "no book exists"),
    }
}
