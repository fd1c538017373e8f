//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// BookType
// ---------------------------------------------------------------------------

/// Book category (closed set)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "book_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookType {
    Computer,
    Economy,
    Society,
    Language,
    Science,
    History,
    Etc,
}

impl BookType {
    pub const ALL: [BookType; 7] = [
        BookType::Computer,
        BookType::Economy,
        BookType::Society,
        BookType::Language,
        BookType::Science,
        BookType::History,
        BookType::Etc,
    ];
}

impl std::fmt::Display for BookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookType::Computer => "COMPUTER",
            BookType::Economy => "ECONOMY",
            BookType::Society => "SOCIETY",
            BookType::Language => "LANGUAGE",
            BookType::Science => "SCIENCE",
            BookType::History => "HISTORY",
            BookType::Etc => "ETC",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// UserLoanStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a loan history row: `Loaned -> Returned`, never back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_loan_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserLoanStatus {
    Loaned,
    Returned,
}

impl std::fmt::Display for UserLoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserLoanStatus::Loaned => write!(f, "LOANED"),
            UserLoanStatus::Returned => write!(f, "RETURNED"),
        }
    }
}
