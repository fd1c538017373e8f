//! Business logic services

pub mod catalog;
pub mod loans;
pub mod users;

use crate::{
    error::{AppError, AppResult},
    models::User,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub users: users::UsersService,
    pub loans: loans::LoansService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            repository,
        }
    }

    /// Readiness of the backing stores
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Resolve a user by name; the name must match exactly one user
pub(crate) async fn find_user_by_name(repository: &Repository, name: &str) -> AppResult<User> {
    let mut users = repository.users.find_all_by_name(name).await?;
    match users.len() {
        0 => Err(AppError::user_not_found(name)),
        1 => Ok(users.remove(0)),
        n => Err(AppError::Ambiguous(format!(
            "user name {} matches {} users",
            name, n
        ))),
    }
}
