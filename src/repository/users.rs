//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{NewUser, User},
};

use super::store::UserStore;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, age) VALUES ($1, $2) RETURNING id, name, age",
        )
        .bind(&user.name)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, age FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, age FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_all_by_name(&self, name: &str) -> AppResult<Vec<User>> {
        let users =
            sqlx::query_as::<_, User>("SELECT id, name, age FROM users WHERE name = $1 ORDER BY id")
                .bind(name)
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET name = $1, age = $2 WHERE id = $3")
            .bind(&user.name)
            .bind(user.age)
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found(user.id));
        }
        Ok(())
    }

    async fn delete(&self, user: &User) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found(user.id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(())
    }
}
