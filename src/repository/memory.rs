//! In-memory stores.
//!
//! Same contracts as the PostgreSQL repositories; used by tests and for
//! running the server without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookType, NewBook, NewUser, User, UserLoanHistory, UserLoanStatus},
};

use super::store::{BookStore, LoanHistoryStore, UserStore};

/// Rows plus an id sequence starting at 1
struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn clear(&mut self) {
        self.rows.clear();
    }
}

#[derive(Clone, Default)]
pub struct InMemoryBookStore {
    table: Arc<RwLock<Table<Book>>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut table = self.table.write().await;
        let book = Book {
            id: table.next_id(),
            name: book.name().to_string(),
            book_type: book.book_type(),
        };
        table.rows.push(book.clone());
        Ok(book)
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn count_by_type(&self) -> AppResult<Vec<(BookType, i64)>> {
        let table = self.table.read().await;
        let mut counts: BTreeMap<BookType, i64> = BTreeMap::new();
        for book in &table.rows {
            *counts.entry(book.book_type).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.table.write().await.clear();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    table: Arc<RwLock<Table<User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let mut table = self.table.write().await;
        let user = User {
            id: table.next_id(),
            name: user.name.clone(),
            age: user.age,
        };
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn find_all_by_name(&self, name: &str) -> AppResult<Vec<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().filter(|u| u.name == name).cloned().collect())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::user_not_found(user.id))?;
        *row = user.clone();
        Ok(())
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|u| u.id != user.id);
        if table.rows.len() == before {
            return Err(AppError::user_not_found(user.id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.table.write().await.clear();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryLoanHistoryStore {
    table: Arc<RwLock<Table<UserLoanHistory>>>,
}

impl InMemoryLoanHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn push_history(
    table: &mut Table<UserLoanHistory>,
    user_id: i64,
    book_name: &str,
    status: UserLoanStatus,
) -> UserLoanHistory {
    let history = UserLoanHistory {
        id: table.next_id(),
        user_id,
        book_name: book_name.to_string(),
        status,
    };
    table.rows.push(history.clone());
    history
}

#[async_trait]
impl LoanHistoryStore for InMemoryLoanHistoryStore {
    async fn insert(
        &self,
        user_id: i64,
        book_name: &str,
        status: UserLoanStatus,
    ) -> AppResult<UserLoanHistory> {
        let mut table = self.table.write().await;
        Ok(push_history(&mut table, user_id, book_name, status))
    }

    async fn list_all(&self) -> AppResult<Vec<UserLoanHistory>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_by_book_name_and_status(
        &self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> AppResult<Option<UserLoanHistory>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|h| h.book_name == book_name && h.status == status)
            .cloned())
    }

    async fn find_by_user_and_book_name_and_status(
        &self,
        user_id: i64,
        book_name: &str,
        status: UserLoanStatus,
    ) -> AppResult<Vec<UserLoanHistory>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|h| h.user_id == user_id && h.book_name == book_name && h.status == status)
            .cloned()
            .collect())
    }

    async fn insert_loan_if_available(
        &self,
        user_id: i64,
        book_name: &str,
    ) -> AppResult<Option<UserLoanHistory>> {
        // Write lock held across check and insert
        let mut table = self.table.write().await;
        let on_loan = table
            .rows
            .iter()
            .any(|h| h.book_name == book_name && h.status == UserLoanStatus::Loaned);
        if on_loan {
            return Ok(None);
        }
        Ok(Some(push_history(
            &mut table,
            user_id,
            book_name,
            UserLoanStatus::Loaned,
        )))
    }

    async fn count_by_status(&self, status: UserLoanStatus) -> AppResult<i64> {
        let table = self.table.read().await;
        Ok(table.rows.iter().filter(|h| h.status == status).count() as i64)
    }

    async fn update(&self, history: &UserLoanHistory) -> AppResult<()> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|h| h.id == history.id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Loan history with id {} not found", history.id))
            })?;
        *row = history.clone();
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.table.write().await.clear();
        Ok(())
    }
}
