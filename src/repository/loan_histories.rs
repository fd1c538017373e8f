//! Loan histories repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{UserLoanHistory, UserLoanStatus},
};

use super::store::LoanHistoryStore;

#[derive(Clone)]
pub struct LoanHistoriesRepository {
    pool: Pool<Postgres>,
}

impl LoanHistoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanHistoryStore for LoanHistoriesRepository {
    async fn insert(
        &self,
        user_id: i64,
        book_name: &str,
        status: UserLoanStatus,
    ) -> AppResult<UserLoanHistory> {
        let history = sqlx::query_as::<_, UserLoanHistory>(
            r#"
            INSERT INTO user_loan_histories (user_id, book_name, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, book_name, status
            "#,
        )
        .bind(user_id)
        .bind(book_name)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(history)
    }

    async fn list_all(&self) -> AppResult<Vec<UserLoanHistory>> {
        let histories = sqlx::query_as::<_, UserLoanHistory>(
            "SELECT id, user_id, book_name, status FROM user_loan_histories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(histories)
    }

    async fn find_by_book_name_and_status(
        &self,
        book_name: &str,
        status: UserLoanStatus,
    ) -> AppResult<Option<UserLoanHistory>> {
        let history = sqlx::query_as::<_, UserLoanHistory>(
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_histories
            WHERE book_name = $1 AND status = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(book_name)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(history)
    }

    async fn find_by_user_and_book_name_and_status(
        &self,
        user_id: i64,
        book_name: &str,
        status: UserLoanStatus,
    ) -> AppResult<Vec<UserLoanHistory>> {
        let histories = sqlx::query_as::<_, UserLoanHistory>(
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_histories
            WHERE user_id = $1 AND book_name = $2 AND status = $3
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .bind(book_name)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(histories)
    }

    async fn insert_loan_if_available(
        &self,
        user_id: i64,
        book_name: &str,
    ) -> AppResult<Option<UserLoanHistory>> {
        // Single statement; the partial unique index on (book_name) WHERE LOANED
        // rejects the loser when two callers race past NOT EXISTS.
        let inserted = sqlx::query_as::<_, UserLoanHistory>(
            r#"
            INSERT INTO user_loan_histories (user_id, book_name, status)
            SELECT $1, $2, 'LOANED'::user_loan_status
            WHERE NOT EXISTS (
                SELECT 1 FROM user_loan_histories
                WHERE book_name = $2 AND status = 'LOANED'
            )
            RETURNING id, user_id, book_name, status
            "#,
        )
        .bind(user_id)
        .bind(book_name)
        .fetch_optional(&self.pool)
        .await;

        match inserted {
            Ok(history) => Ok(history),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    async fn count_by_status(&self, status: UserLoanStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_loan_histories WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn update(&self, history: &UserLoanHistory) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE user_loan_histories SET user_id = $1, book_name = $2, status = $3 WHERE id = $4",
        )
        .bind(history.user_id)
        .bind(&history.book_name)
        .bind(history.status)
        .bind(history.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Loan history with id {} not found",
                history.id
            )));
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM user_loan_histories")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
