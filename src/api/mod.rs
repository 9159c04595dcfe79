pub mod books;
pub mod health;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books collection
        .route(
            "/books",
            get(books::list_books)
                .post(books::create_book)
                .delete(books::delete_all_books),
        )
        // Single book and its comment log
        .route(
            "/books/:id",
            get(books::get_book)
                .post(books::add_comment)
                .delete(books::delete_book),
        )
        .with_state(state)
}
