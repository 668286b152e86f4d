//! MySQL implementation of the UserRepository trait.
//!
//! Expects a `users` table with a `CHAR(36)` `id` and boolean
//! `is_email_verified`, `is_phone_verified` and `is_admin` columns.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use th_core::errors::{DomainError, DomainResult};
use th_core::repositories::UserRepository;
use th_core::User;

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> DomainResult<User> {
        let id: String = row.try_get("id").map_err(column_error)?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user id in database: {}", e),
            })?,
            user_name: row.try_get("user_name").map_err(column_error)?,
            email: row.try_get("email").map_err(column_error)?,
            phone: row.try_get("phone").map_err(column_error)?,
            is_email_verified: row.try_get("is_email_verified").map_err(column_error)?,
            is_phone_verified: row.try_get("is_phone_verified").map_err(column_error)?,
            is_admin: row.try_get("is_admin").map_err(column_error)?,
        })
    }

    /// Flip a verified flag only if it is still false
    ///
    /// The `AND <flag> = false` guard makes the update conditional, so two
    /// concurrent confirmations cannot both report success.
    async fn set_flag_if_unset(&self, query: &'static str, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let query = r#"
            SELECT id, user_name, email, phone,
                   is_email_verified, is_phone_verified, is_admin
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn mark_email_verified(&self, id: Uuid) -> DomainResult<bool> {
        self.set_flag_if_unset(
            "UPDATE users SET is_email_verified = true WHERE id = ? AND is_email_verified = false",
            id,
        )
        .await
    }

    async fn mark_phone_verified(&self, id: Uuid) -> DomainResult<bool> {
        self.set_flag_if_unset(
            "UPDATE users SET is_phone_verified = true WHERE id = ? AND is_phone_verified = false",
            id,
        )
        .await
    }
}

fn column_error(e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read user column: {}", e),
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "User query failed");
    DomainError::Internal {
        message: format!("Database query failed: {}", e),
    }
}
