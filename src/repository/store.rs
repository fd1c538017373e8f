//! Store traits shared by the PostgreSQL and in-memory backends

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookType, NewBook, NewUser, User, UserLoanHistory, UserLoanStatus},
};

/// Book catalog storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Stores a book and returns it with its generated id
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    async fn list_all(&self) -> AppResult<Vec<Book>>;

    /// Number of books per type, only for types that have at least one book,
    /// in type declaration order
    async fn count_by_type(&self) -> AppResult<Vec<(BookType, i64)>>;

    async fn delete_all(&self) -> AppResult<()>;
}

/// User (patron) storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &NewUser) -> AppResult<User>;

    /// All users ordered by id
    async fn list_all(&self) -> AppResult<Vec<User>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Names are not unique, so every match is returned
    async fn find_all_by_name(&self, name: &str) -> AppResult<Vec<User>>;

    /// Overwrites the stored row with the same id
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Deletes the user row only; loan histories are left untouched
    async fn delete(&self, user: &User) -> AppResult<()>;

    async fn delete_all(&self) -> AppResult<()>;
}

/// Loan history storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanHistoryStore: Send + Sync {
    /// Unconditional insert, used for imports and fixtures
    async fn insert(
        &self,
        user_id: i64,
        book_name: &str,
        status: UserLoanStatus,
    ) -> AppResult<UserLoanHistory>;

    async fn list_all(&self) -> AppResult<Vec<UserLoanHistory>>;

    async fn find_by_book_name_and_status(
        &self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> AppResult<Option<UserLoanHistory>>;

    async fn find_by_user_and_book_name_and_status(
        &self,
        user_id: i64,
        book_name: &str,
        status: UserLoanStatus,
    ) -> AppResult<Vec<UserLoanHistory>>;

    /// Inserts a `Loaned` row unless the book already has one.
    ///
    /// The check and the insert happen as one atomic step. Returns `None`
    /// when the book is already on loan.
    async fn insert_loan_if_available(
        &self,
        user_id: i64,
        book_name: &str,
    ) -> AppResult<Option<UserLoanHistory>>;

    async fn count_by_status(&self, status: UserLoanStatus) -> AppResult<i64>;

    async fn update(&self, history: &UserLoanHistory) -> AppResult<()>;

    async fn delete_all(&self) -> AppResult<()>;
}
