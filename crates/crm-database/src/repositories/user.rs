//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_core::types::{TenantId, UserId};
use crm_entity::user::{CreateUser, UpdateUser, User};

use super::map_db_error;
use crate::store::UserStore;

fn email_conflict(_: Option<&str>) -> &'static str {
    "Email already in use"
}

/// Postgres-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, tenant_id: &TenantId, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn list(&self, tenant_id: &TenantId) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role, tenant_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role)
        .bind(&input.tenant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("Failed to create user", email_conflict))
    }

    async fn update(
        &self,
        tenant_id: &TenantId,
        id: UserId,
        changes: UpdateUser,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                name = COALESCE($3, name), \
                email = COALESCE($4, email), \
                password_hash = COALESCE($5, password_hash), \
                role = COALESCE($6, role), \
                updated_at = NOW() \
             WHERE tenant_id = $1 AND id = $2 RETURNING *",
        )
        .bind(tenant_id)
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.role)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("Failed to update user", email_conflict))
    }

    async fn set_refresh_token(
        &self,
        tenant_id: &TenantId,
        id: UserId,
        fingerprint: Option<&str>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token_hash = $3 WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(id)
        .bind(fingerprint)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store refresh token", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn rotate_refresh_token(
        &self,
        tenant_id: &TenantId,
        id: UserId,
        expected: &str,
        next: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token_hash = $4 \
             WHERE tenant_id = $1 AND id = $2 AND refresh_token_hash = $3",
        )
        .bind(tenant_id)
        .bind(id)
        .bind(expected)
        .bind(next)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to rotate refresh token", e)
        })?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, tenant_id: &TenantId, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_tenant(&self) -> AppResult<Vec<(TenantId, i64)>> {
        sqlx::query_as::<_, (TenantId, i64)>(
            "SELECT tenant_id, COUNT(*) FROM users GROUP BY tenant_id ORDER BY tenant_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear users", e))?;
        Ok(result.rows_affected())
    }
}
