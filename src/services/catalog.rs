//! Book catalog service

use crate::{
    error::AppResult,
    models::{book::BookStatResponse, Book, BookType, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new book; blank names are rejected before anything is stored
    pub async fn save_book(&self, name: &str, book_type: BookType) -> AppResult<Book> {
        let book = NewBook::new(name, book_type)?;
        let saved = self.repository.books.insert(&book).await?;
        tracing::info!("Book saved: id={} name={} type={}", saved.id, saved.name, saved.book_type);
        Ok(saved)
    }

    /// Book count per type, only for types that have books
    pub async fn get_book_statistics(&self) -> AppResult<Vec<BookStatResponse>> {
        let counts = self.repository.books.count_by_type().await?;
        Ok(counts
            .into_iter()
            .map(|(book_type, count)| BookStatResponse { book_type, count })
            .collect())
    }
}
