//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, Statement,
};

use crate::domain::{BookRepository, DomainError};
use crate::models::Book;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;

        Ok(book.map(Book::from))
    }

    async fn create(&self, title: String) -> Result<Book, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let book = ActiveModel {
            title: Set(title),
            comments: Set("[]".to_owned()),
            comment_count: Set(0),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = book.insert(&self.db).await?;

        Ok(Book::from(model))
    }

    async fn append_comment(&self, id: i32, comment: String) -> Result<Book, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        // Single UPDATE keeps the append and the count bump atomic, so
        // concurrent appends to the same book cannot lose a comment and
        // comment_count always equals the array length.
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                r#"
                UPDATE books
                SET comments = json_insert(comments, '$[#]', ?),
                    comment_count = comment_count + 1,
                    updated_at = ?
                WHERE id = ?
                "#,
                [comment.into(), now.into(), id.into()],
            ))
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }

        let model = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        Ok(Book::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, DomainError> {
        let result = BookEntity::delete_many().exec(&self.db).await?;

        Ok(result.rows_affected)
    }
}
