//! Repository layer for database operations

pub mod books;
pub mod loan_histories;
pub mod memory;
pub mod store;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

pub use store::{BookStore, LoanHistoryStore, UserStore};

/// Main repository struct holding the three stores
#[derive(Clone)]
pub struct Repository {
    pool: Option<Pool<Postgres>>,
    pub books: Arc<dyn BookStore>,
    pub users: Arc<dyn UserStore>,
    pub loan_histories: Arc<dyn LoanHistoryStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            loan_histories: Arc::new(loan_histories::LoanHistoriesRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Repository backed by empty in-memory stores
    pub fn in_memory() -> Self {
        Self::from_stores(
            Arc::new(memory::InMemoryBookStore::new()),
            Arc::new(memory::InMemoryUserStore::new()),
            Arc::new(memory::InMemoryLoanHistoryStore::new()),
        )
    }

    pub fn from_stores(
        books: Arc<dyn BookStore>,
        users: Arc<dyn UserStore>,
        loan_histories: Arc<dyn LoanHistoryStore>,
    ) -> Self {
        Self {
            pool: None,
            books,
            users,
            loan_histories,
        }
    }

    /// Check that the backing database answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }

    /// Bulk cleanup of every record
    pub async fn delete_all(&self) -> AppResult<()> {
        self.loan_histories.delete_all().await?;
        self.users.delete_all().await?;
        self.books.delete_all().await?;
        Ok(())
    }
}
