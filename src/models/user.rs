//! User (library patron) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// User model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
}

impl User {
    /// Rename the user; blank names are rejected
    pub fn update_name(&mut self, name: impl Into<String>) -> AppResult<()> {
        self.name = check_name(name.into())?;
        Ok(())
    }
}

/// A validated user that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: Option<i32>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, age: Option<i32>) -> AppResult<Self> {
        Ok(Self {
            name: check_name(name.into())?,
            age,
        })
    }
}

fn check_name(name: String) -> AppResult<String> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("User name must not be blank".to_string()));
    }
    Ok(name)
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserCreateRequest {
    #[validate(length(min = 1, message = "User name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "Age must not be negative"))]
    pub age: Option<i32>,
}

/// Rename user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserUpdateRequest {
    pub id: i64,
    #[validate(length(min = 1, message = "User name must not be empty"))]
    pub name: String,
}

/// Query parameters for user deletion
#[derive(Debug, Deserialize, Validate, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserDeleteQuery {
    #[validate(length(min = 1, message = "User name must not be empty"))]
    pub name: String,
}

/// Flat user listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
        }
    }
}
