//! Client repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use crm_core::error::{AppError, ErrorKind};
use crm_core::result::AppResult;
use crm_core::types::{ClientId, TenantId};
use crm_entity::client::{Client, ClientFilter, ClientStats, NewClient, UpdateClient};
use crm_entity::client::model::generate_public_id;

use super::{like_pattern, map_db_error};
use crate::store::ClientStore;

fn client_conflict(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("clients_tenant_public_id_unique") => "Public id already in use",
        _ => "A client with this email already exists",
    }
}

/// Postgres-backed [`ClientStore`].
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new client repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for ClientRepository {
    async fn find_by_id(&self, tenant_id: &TenantId, id: ClientId) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client by id", e)
            })
    }

    async fn list(&self, tenant_id: &TenantId, filter: &ClientFilter) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, Client>(
            "SELECT * FROM clients \
             WHERE tenant_id = $1 \
               AND ($2::text IS NULL OR name ILIKE $2 OR email ILIKE $2 OR public_id ILIKE $2) \
               AND ($3::boolean IS NULL OR is_active = $3) \
             ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .bind(filter.search_term().map(|t| like_pattern(&t)))
        .bind(filter.is_active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list clients", e))
    }

    async fn create(&self, input: NewClient) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients \
                (public_id, name, email, is_active, contact, address, image_url, tenant_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(input.public_id.unwrap_or_else(generate_public_id))
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.is_active)
        .bind(&input.contact)
        .bind(Json(&input.address))
        .bind(&input.image_url)
        .bind(&input.tenant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("Failed to create client", client_conflict))
    }

    async fn update(
        &self,
        tenant_id: &TenantId,
        id: ClientId,
        changes: UpdateClient,
    ) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET \
                name = COALESCE($3, name), \
                email = COALESCE($4, email), \
                is_active = COALESCE($5, is_active), \
                contact = CASE WHEN $6 THEN $7 ELSE contact END, \
                address = COALESCE($8, address), \
                image_url = CASE WHEN $9 THEN $10 ELSE image_url END, \
                updated_at = NOW() \
             WHERE tenant_id = $1 AND id = $2 RETURNING *",
        )
        .bind(tenant_id)
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.is_active)
        .bind(changes.contact.is_some())
        .bind(changes.contact.flatten())
        .bind(changes.address.map(Json))
        .bind(changes.image_url.is_some())
        .bind(changes.image_url.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("Failed to update client", client_conflict))
    }

    async fn delete(&self, tenant_id: &TenantId, id: ClientId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete client", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self, tenant_id: &TenantId) -> AppResult<ClientStats> {
        sqlx::query_as::<_, ClientStats>(
            "SELECT COUNT(*) AS total, COUNT(*) FILTER (WHERE is_active) AS active \
             FROM clients WHERE tenant_id = $1",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count clients", e))
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM clients")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear clients", e)
            })?;
        Ok(result.rows_affected())
    }
}
