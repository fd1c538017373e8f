//! User (patron) management service

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        loan_history::{BookHistoryResponse, UserLoanHistoryResponse},
        user::UserResponse,
        NewUser, User,
    },
    repository::Repository,
};

use super::find_user_by_name;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a user. Names need not be unique.
    pub async fn save_user(&self, name: &str, age: Option<i32>) -> AppResult<User> {
        let user = NewUser::new(name, age)?;
        let saved = self.repository.users.insert(&user).await?;
        tracing::info!("User saved: id={} name={}", saved.id, saved.name);
        Ok(saved)
    }

    pub async fn get_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repository.users.list_all().await?;
        tracing::debug!("Listing {} users", users.len());
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Rename the user with the given id
    pub async fn update_user_name(&self, id: i64, name: &str) -> AppResult<()> {
        let mut user = self
            .repository
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))?;

        user.update_name(name)?;
        self.repository.users.update(&user).await?;
        tracing::info!("User {} renamed to {}", id, user.name);
        Ok(())
    }

    /// Delete the user with the given name. Their loan histories stay.
    pub async fn delete_user(&self, name: &str) -> AppResult<()> {
        let user = find_user_by_name(&self.repository, name).await?;
        self.repository.users.delete(&user).await?;
        tracing::info!("User deleted: id={} name={}", user.id, user.name);
        Ok(())
    }

    /// Every user with the books they borrowed, including users with none
    pub async fn get_user_loan_histories(&self) -> AppResult<Vec<UserLoanHistoryResponse>> {
        let users = self.repository.users.list_all().await?;
        let histories = self.repository.loan_histories.list_all().await?;

        let mut by_user: HashMap<i64, Vec<BookHistoryResponse>> = HashMap::new();
        for history in &histories {
            by_user
                .entry(history.user_id)
                .or_default()
                .push(BookHistoryResponse::from(history));
        }

        Ok(users
            .into_iter()
            .map(|user| UserLoanHistoryResponse {
                books: by_user.remove(&user.id).unwrap_or_default(),
                name: user.name,
            })
            .collect())
    }
}
