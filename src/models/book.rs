//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::BookType;
use crate::error::{AppError, AppResult};

/// Book model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub book_type: BookType,
}

/// A validated book that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    name: String,
    book_type: BookType,
}

impl NewBook {
    /// Rejects blank names
    pub fn new(name: impl Into<String>, book_type: BookType) -> AppResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::Validation("Book name must not be blank".to_string()));
        }
        Ok(Self { name, book_type })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn book_type(&self) -> BookType {
        self.book_type
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookRequest {
    #[validate(length(min = 1, message = "Book name must not be empty"))]
    pub name: String,
    #[serde(rename = "type")]
    pub book_type: BookType,
}

/// Loan or return request, addressed by user name and book name
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookLoanRequest {
    #[validate(length(min = 1, message = "User name must not be empty"))]
    pub user_name: String,
    #[validate(length(min = 1, message = "Book name must not be empty"))]
    pub book_name: String,
}

/// Per-category book count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookStatResponse {
    #[serde(rename = "type")]
    pub book_type: BookType,
    pub count: i64,
}
