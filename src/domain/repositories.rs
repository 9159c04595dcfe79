//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer; tests may substitute
//! in-memory fakes.

use async_trait::async_trait;

use super::DomainError;
use crate::models::Book;

/// Repository trait for the Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books in insertion order
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Create a new book with an empty comment log
    async fn create(&self, title: String) -> Result<Book, DomainError>;

    /// Atomically append a comment and bump the comment count.
    /// Fails with `NotFound` when no book has the given ID.
    async fn append_comment(&self, id: i32, comment: String) -> Result<Book, DomainError>;

    /// Delete a book by ID; `NotFound` when no row matched
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Delete every book, returning the number of rows removed
    async fn delete_all(&self) -> Result<u64, DomainError>;
}
