//! Repository traits.
//!
//! Every read and write of a tenant-owned row takes the caller's
//! [`TenantId`] and only ever touches rows of that tenant. A row of
//! another tenant behaves exactly like a missing row. The single
//! exception is [`UserStore::find_by_email`], which login needs before a
//! tenant is known.

use async_trait::async_trait;

use crm_core::result::AppResult;
use crm_core::types::{ClientId, TenantId, UserId};
use crm_entity::client::{Client, ClientFilter, ClientStats, NewClient, UpdateClient};
use crm_entity::user::{CreateUser, UpdateUser, User};

/// Storage for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user of `tenant_id` by primary key.
    async fn find_by_id(&self, tenant_id: &TenantId, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by login email (case-insensitive) across all tenants.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List the tenant's users, newest first.
    async fn list(&self, tenant_id: &TenantId) -> AppResult<Vec<User>>;

    /// Insert a user. Fails with a conflict if the email is taken.
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Apply a partial update. `None` when the user is not in the tenant.
    async fn update(
        &self,
        tenant_id: &TenantId,
        id: UserId,
        changes: UpdateUser,
    ) -> AppResult<Option<User>>;

    /// Overwrite (or clear) the stored refresh-token fingerprint.
    async fn set_refresh_token(
        &self,
        tenant_id: &TenantId,
        id: UserId,
        fingerprint: Option<&str>,
    ) -> AppResult<bool>;

    /// Replace the stored fingerprint only if it still equals `expected`.
    ///
    /// Returns `false` when another refresh already rotated it.
    async fn rotate_refresh_token(
        &self,
        tenant_id: &TenantId,
        id: UserId,
        expected: &str,
        next: &str,
    ) -> AppResult<bool>;

    /// Delete a user of the tenant. Returns `true` if a row was removed.
    async fn delete(&self, tenant_id: &TenantId, id: UserId) -> AppResult<bool>;

    /// Number of users per tenant, ordered by tenant id.
    async fn count_by_tenant(&self) -> AppResult<Vec<(TenantId, i64)>>;

    /// Remove every user. Used by the reset seed.
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Storage for client records.
#[async_trait]
pub trait ClientStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a client of `tenant_id` by primary key.
    async fn find_by_id(&self, tenant_id: &TenantId, id: ClientId) -> AppResult<Option<Client>>;

    /// List the tenant's clients matching `filter`, newest first.
    async fn list(&self, tenant_id: &TenantId, filter: &ClientFilter) -> AppResult<Vec<Client>>;

    /// Insert a client. Fails with a conflict on a duplicate public id
    /// or a duplicate email within the tenant.
    async fn create(&self, input: NewClient) -> AppResult<Client>;

    /// Apply a partial update. `None` when the client is not in the tenant.
    async fn update(
        &self,
        tenant_id: &TenantId,
        id: ClientId,
        changes: UpdateClient,
    ) -> AppResult<Option<Client>>;

    /// Delete a client of the tenant. Returns `true` if a row was removed.
    async fn delete(&self, tenant_id: &TenantId, id: ClientId) -> AppResult<bool>;

    /// Total and active client counts for the tenant.
    async fn stats(&self, tenant_id: &TenantId) -> AppResult<ClientStats>;

    /// Remove every client. Used by the reset seed.
    async fn delete_all(&self) -> AppResult<u64>;
}
