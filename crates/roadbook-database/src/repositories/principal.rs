//! PostgreSQL principal store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use roadbook_core::error::{AppError, ErrorKind};
use roadbook_core::principal::{NewPrincipal, Principal};
use roadbook_core::result::AppResult;
use roadbook_core::traits::principal::PrincipalStore;

/// Principal store backed by the `principals` table.
#[derive(Debug, Clone)]
pub struct PgPrincipalStore {
    pool: PgPool,
}

impl PgPrincipalStore {
    /// Create a new principal store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Principal>> {
        sqlx::query_as::<_, Principal>(
            "SELECT * FROM principals WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find principal by email", e)
        })
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Principal>> {
        sqlx::query_as::<_, Principal>("SELECT * FROM principals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find principal by id", e)
            })
    }

    async fn create(&self, data: &NewPrincipal) -> AppResult<Principal> {
        sqlx::query_as::<_, Principal>(
            "INSERT INTO principals (name, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("principals_email_key") =>
            {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create principal", e),
        })
    }

    async fn save_reset_token(
        &self,
        id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE principals \
             SET reset_token_hash = $2, reset_token_expires_at = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to save reset token", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::principal_not_found(format!(
                "Principal {id} not found"
            )));
        }
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token_hash: &str,
        new_password_hash: &str,
    ) -> AppResult<Option<Principal>> {
        // Single statement so that matching the token, replacing the password,
        // and clearing the reset fields are one atomic update: a concurrent
        // second use of the same token finds no matching row.
        sqlx::query_as::<_, Principal>(
            "UPDATE principals \
             SET password_hash = $2, \
                 reset_token_hash = NULL, \
                 reset_token_expires_at = NULL, \
                 updated_at = NOW() \
             WHERE reset_token_hash = $1 AND reset_token_expires_at > NOW() \
             RETURNING *",
        )
        .bind(token_hash)
        .bind(new_password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to consume reset token", e)
        })
    }

    async fn update_last_login(&self, id: i64, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE principals SET last_login_at = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }
}
