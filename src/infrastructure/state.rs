//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::BookRepository;
use crate::infrastructure::SeaOrmBookRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
}

impl AppState {
    /// Create a new AppState backed by the database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            book_repo: Arc::new(SeaOrmBookRepository::new(db)),
        }
    }

    /// Create an AppState around an arbitrary repository (used by tests to
    /// substitute in-memory fakes)
    pub fn with_repository(book_repo: Arc<dyn BookRepository>) -> Self {
        Self { book_repo }
    }
}
