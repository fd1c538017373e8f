//! Loan workflow service: loan and return books, count books on loan

use crate::{
    error::{AppError, AppResult},
    models::{UserLoanHistory, UserLoanStatus},
    repository::Repository,
};

use super::find_user_by_name;

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Loan a book to a user.
    ///
    /// The book name is not checked against the catalog. Fails with
    /// `Conflict` when the book already has a `Loaned` history row, in which
    /// case nothing is written.
    pub async fn loan_book(&self, user_name: &str, book_name: &str) -> AppResult<UserLoanHistory> {
        let user = find_user_by_name(&self.repository, user_name).await?;

        match self
            .repository
            .loan_histories
            .insert_loan_if_available(user.id, book_name)
            .await?
        {
            Some(history) => {
                tracing::info!("Book '{}' loaned to user {}", book_name, user.id);
                Ok(history)
            }
            None => {
                tracing::warn!("Loan refused: '{}' is already on loan", book_name);
                Err(AppError::Conflict(format!("book already on loan: {}", book_name)))
            }
        }
    }

    /// Return a book loaned by this user
    pub async fn return_book(&self, user_name: &str, book_name: &str) -> AppResult<UserLoanHistory> {
        let user = find_user_by_name(&self.repository, user_name).await?;

        let mut loaned = self
            .repository
            .loan_histories
            .find_by_user_and_book_name_and_status(user.id, book_name, UserLoanStatus::Loaned)
            .await?;

        let mut history = match loaned.len() {
            0 => {
                return Err(AppError::NotFound(format!(
                    "No loan of '{}' by user {}",
                    book_name, user_name
                )))
            }
            1 => loaned.remove(0),
            n => {
                tracing::warn!(
                    "Return refused: {} open loans of '{}' for user {}",
                    n,
                    book_name,
                    user.id
                );
                return Err(AppError::Ambiguous(format!(
                    "user {} has {} open loans of '{}'",
                    user_name, n, book_name
                )));
            }
        };

        history.do_return()?;
        self.repository.loan_histories.update(&history).await?;
        tracing::info!("Book '{}' returned by user {}", book_name, user.id);
        Ok(history)
    }

    /// Number of books currently on loan, across all users
    pub async fn count_loaned_books(&self) -> AppResult<i64> {
        self.repository
            .loan_histories
            .count_by_status(UserLoanStatus::Loaned)
            .await
    }
}
