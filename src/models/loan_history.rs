//! Loan history model: one book borrowed (and eventually returned) by one user

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::UserLoanStatus;
use crate::error::{AppError, AppResult};

/// Loan history row from database.
///
/// `user_id` is a plain column, not a foreign key: deleting a user leaves
/// their rows behind. `book_name` is copied from the book at loan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserLoanHistory {
    pub id: i64,
    pub user_id: i64,
    pub book_name: String,
    pub status: UserLoanStatus,
}

impl UserLoanHistory {
    pub fn is_returned(&self) -> bool {
        self.status == UserLoanStatus::Returned
    }

    /// Transition `Loaned -> Returned`
    pub fn do_return(&mut self) -> AppResult<()> {
        if self.is_returned() {
            return Err(AppError::BusinessRule(format!(
                "Loan {} of '{}' is already returned",
                self.id, self.book_name
            )));
        }
        self.status = UserLoanStatus::Returned;
        Ok(())
    }
}

/// One book in a user's loan history view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookHistoryResponse {
    pub name: String,
    pub is_return: bool,
}

impl From<&UserLoanHistory> for BookHistoryResponse {
    fn from(history: &UserLoanHistory) -> Self {
        Self {
            name: history.book_name.clone(),
            is_return: history.is_returned(),
        }
    }
}

/// A user together with every book they have borrowed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserLoanHistoryResponse {
    pub name: String,
    pub books: Vec<BookHistoryResponse>,
}
