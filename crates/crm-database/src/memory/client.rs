//! In-memory client store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crm_core::error::AppError;
use crm_core::result::AppResult;
use crm_core::types::{ClientId, TenantId};
use crm_entity::client::{Client, ClientFilter, ClientStats, NewClient, UpdateClient};

use super::same_email;
use crate::store::ClientStore;

/// Process-local [`ClientStore`].
#[derive(Debug, Default)]
pub struct MemoryClientStore {
    clients: RwLock<HashMap<ClientId, Client>>,
}

impl MemoryClientStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(
    clients: &HashMap<ClientId, Client>,
    tenant_id: &TenantId,
    email: &str,
    except: Option<ClientId>,
) -> bool {
    clients.values().any(|c| {
        Some(c.id) != except && &c.tenant_id == tenant_id && same_email(&c.email, email)
    })
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn find_by_id(&self, tenant_id: &TenantId, id: ClientId) -> AppResult<Option<Client>> {
        let clients = self.clients.read().await;
        Ok(clients
            .get(&id)
            .filter(|c| &c.tenant_id == tenant_id)
            .cloned())
    }

    async fn list(&self, tenant_id: &TenantId, filter: &ClientFilter) -> AppResult<Vec<Client>> {
        let clients = self.clients.read().await;
        let mut out: Vec<Client> = clients
            .values()
            .filter(|c| &c.tenant_id == tenant_id && filter.matches(c))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn create(&self, input: NewClient) -> AppResult<Client> {
        let mut clients = self.clients.write().await;
        let client = Client::from_new(input);

        if clients
            .values()
            .any(|c| c.tenant_id == client.tenant_id && c.public_id == client.public_id)
        {
            return Err(AppError::conflict("Public id already in use"));
        }
        if email_taken(&clients, &client.tenant_id, &client.email, None) {
            return Err(AppError::conflict("A client with this email already exists"));
        }

        clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn update(
        &self,
        tenant_id: &TenantId,
        id: ClientId,
        changes: UpdateClient,
    ) -> AppResult<Option<Client>> {
        let mut clients = self.clients.write().await;
        if !clients.get(&id).is_some_and(|c| &c.tenant_id == tenant_id) {
            return Ok(None);
        }
        if let Some(email) = &changes.email
            && email_taken(&clients, tenant_id, email, Some(id))
        {
            return Err(AppError::conflict("A client with this email already exists"));
        }

        let Some(client) = clients.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(client);
        Ok(Some(client.clone()))
    }

    async fn delete(&self, tenant_id: &TenantId, id: ClientId) -> AppResult<bool> {
        let mut clients = self.clients.write().await;
        if clients.get(&id).is_some_and(|c| &c.tenant_id == tenant_id) {
            clients.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn stats(&self, tenant_id: &TenantId) -> AppResult<ClientStats> {
        let clients = self.clients.read().await;
        let mut stats = ClientStats::default();
        for client in clients.values().filter(|c| &c.tenant_id == tenant_id) {
            stats.total += 1;
            if client.is_active {
                stats.active += 1;
            }
        }
        Ok(stats)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut clients = self.clients.write().await;
        let removed = clients.len() as u64;
        clients.clear();
        Ok(removed)
    }
}
