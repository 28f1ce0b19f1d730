//! In-memory user store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_core::types::{TenantId, UserId};
use crm_entity::user::{CreateUser, UpdateUser, User};

use super::same_email;
use crate::store::UserStore;

/// Process-local [`UserStore`].
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &HashMap<UserId, User>, email: &str, except: Option<UserId>) -> bool {
    users
        .values()
        .any(|u| Some(u.id) != except && same_email(&u.email, email))
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, tenant_id: &TenantId, id: UserId) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| &u.tenant_id == tenant_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn list(&self, tenant_id: &TenantId) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut out: Vec<User> = users
            .values()
            .filter(|u| &u.tenant_id == tenant_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if email_taken(&users, &input.email, None) {
            return Err(AppError::conflict("Email already in use"));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            refresh_token_hash: None,
            tenant_id: input.tenant_id,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        tenant_id: &TenantId,
        id: UserId,
        changes: UpdateUser,
    ) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        if !users.get(&id).is_some_and(|u| &u.tenant_id == tenant_id) {
            return Ok(None);
        }
        if let Some(email) = &changes.email
            && email_taken(&users, email, Some(id))
        {
            return Err(AppError::conflict("Email already in use"));
        }

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(user);
        Ok(Some(user.clone()))
    }

    async fn set_refresh_token(
        &self,
        tenant_id: &TenantId,
        id: UserId,
        fingerprint: Option<&str>,
    ) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&id).filter(|u| &u.tenant_id == tenant_id) {
            Some(user) => {
                user.refresh_token_hash = fingerprint.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rotate_refresh_token(
        &self,
        tenant_id: &TenantId,
        id: UserId,
        expected: &str,
        next: &str,
    ) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users
            .get_mut(&id)
            .filter(|u| &u.tenant_id == tenant_id && u.holds_refresh_token(expected))
        {
            Some(user) => {
                user.refresh_token_hash = Some(next.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, tenant_id: &TenantId, id: UserId) -> AppResult<bool> {
        let mut users = self.users.write().await;
        if users.get(&id).is_some_and(|u| &u.tenant_id == tenant_id) {
            users.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn count_by_tenant(&self) -> AppResult<Vec<(TenantId, i64)>> {
        let users = self.users.read().await;
        let mut counts: BTreeMap<TenantId, i64> = BTreeMap::new();
        for user in users.values() {
            *counts.entry(user.tenant_id.clone()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut users = self.users.write().await;
        let removed = users.len() as u64;
        users.clear();
        Ok(removed)
    }
}
