//! Data models for the library server

pub mod book;
pub mod enums;
pub mod loan_history;
pub mod user;

// Re-export commonly used types
pub use book::{Book, NewBook};
pub use enums::{BookType, UserLoanStatus};
pub use loan_history::UserLoanHistory;
pub use user::{NewUser, User};
