//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookType, NewBook},
};

use super::store::BookStore;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (name, "type")
            VALUES ($1, $2)
            RETURNING id, name, "type"
            "#,
        )
        .bind(book.name())
        .bind(book.book_type())
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(r#"SELECT id, name, "type" FROM books ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn count_by_type(&self) -> AppResult<Vec<(BookType, i64)>> {
        // Enum ordering in PostgreSQL follows declaration order
        let counts = sqlx::query_as::<_, (BookType, i64)>(
            r#"SELECT "type", COUNT(*) FROM books GROUP BY "type" ORDER BY "type""#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }

    async fn delete_all(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        Ok(())
    }
}
