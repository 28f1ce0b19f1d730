//! Client CRUD within the principal's tenant.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use validator::Validate;

use crm_auth::rbac::{RbacEnforcer, SystemPermission};
use crm_core::error::AppError;
use crm_core::types::ClientId;
use crm_database::store::ClientStore;
use crm_entity::client::{Address, Client, ClientFilter, NewClient, UpdateClient};

use crate::context::RequestContext;
use crate::validation::{validate_address, validate_input, validate_name};

/// Request to create a client in the caller's tenant.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    /// Optional explicit public id.
    #[validate(length(min = 1, max = 32))]
    pub public_id: Option<String>,
    /// Client name.
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Contact email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Active flag, `true` when omitted.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Contact.
    #[validate(length(max = 255))]
    pub contact: Option<String>,
    /// Address.
    #[validate(custom(function = "validate_address"))]
    pub address: Address,
    /// Image URL.
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
}

/// Partial client update. Any `tenantId` in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    /// New name.
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    /// New email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New contact; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub contact: Option<Option<String>>,
    /// Replacement address.
    #[validate(custom(function = "validate_address"))]
    pub address: Option<Address>,
    /// New image URL; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

fn default_active() -> bool {
    true
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trim_address(address: Address) -> Address {
    Address {
        street: address.street.trim().to_string(),
        neighborhood: address.neighborhood.trim().to_string(),
        number: address.number.trim().to_string(),
        state: address.state.trim().to_string(),
    }
}

/// Handles client operations.
#[derive(Debug, Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientStore>,
    rbac: Arc<RbacEnforcer>,
}

impl ClientService {
    /// Creates a new client service.
    pub fn new(clients: Arc<dyn ClientStore>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { clients, rbac }
    }

    /// Lists the caller's tenant clients, newest first.
    pub async fn list_clients(
        &self,
        ctx: &RequestContext,
        filter: &ClientFilter,
    ) -> Result<Vec<Client>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::ClientRead)?;

        self.clients.list(&ctx.tenant_id, filter).await
    }

    /// Gets one client of the caller's tenant.
    pub async fn get_client(
        &self,
        ctx: &RequestContext,
        client_id: ClientId,
    ) -> Result<Client, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::ClientRead)?;

        self.clients
            .find_by_id(&ctx.tenant_id, client_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }

    /// Creates a client owned by the caller's tenant.
    pub async fn create_client(
        &self,
        ctx: &RequestContext,
        req: CreateClientRequest,
    ) -> Result<Client, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::ClientCreate)?;

        validate_input(&req)?;

        let client = self
            .clients
            .create(NewClient {
                public_id: blank_to_none(req.public_id).map(|p| p.to_uppercase()),
                name: req.name.trim().to_string(),
                email: req.email.trim().to_string(),
                is_active: req.is_active,
                contact: blank_to_none(req.contact),
                address: trim_address(req.address),
                image_url: blank_to_none(req.image_url),
                tenant_id: ctx.tenant_id.clone(),
            })
            .await?;

        info!(
            actor_id = %ctx.user_id,
            tenant_id = %ctx.tenant_id,
            client_id = %client.id,
            public_id = %client.public_id,
            "Client created"
        );

        Ok(client)
    }

    /// Applies a partial update to a client of the caller's tenant.
    pub async fn update_client(
        &self,
        ctx: &RequestContext,
        client_id: ClientId,
        req: UpdateClientRequest,
    ) -> Result<Client, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::ClientUpdate)?;

        validate_input(&req)?;

        let changes = UpdateClient {
            name: req.name.map(|n| n.trim().to_string()),
            email: req.email.map(|e| e.trim().to_string()),
            is_active: req.is_active,
            contact: req.contact.map(blank_to_none),
            address: req.address.map(trim_address),
            image_url: req.image_url.map(blank_to_none),
        };

        let client = self
            .clients
            .update(&ctx.tenant_id, client_id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        info!(
            actor_id = %ctx.user_id,
            tenant_id = %ctx.tenant_id,
            client_id = %client_id,
            "Client updated"
        );

        Ok(client)
    }

    /// Deletes a client of the caller's tenant.
    pub async fn delete_client(
        &self,
        ctx: &RequestContext,
        client_id: ClientId,
    ) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::ClientDelete)?;

        if !self.clients.delete(&ctx.tenant_id, client_id).await? {
            return Err(AppError::not_found("Client not found"));
        }

        info!(
            actor_id = %ctx.user_id,
            tenant_id = %ctx.tenant_id,
            client_id = %client_id,
            ip = ?ctx.ip_address,
            user_agent = ?ctx.user_agent,
            "Client deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crm_core::error::ErrorKind;
    use crm_core::types::{TenantId, UserId};
    use crm_database::memory::MemoryClientStore;
    use crm_entity::user::UserRole;

    use super::*;

    fn service() -> ClientService {
        ClientService::new(
            Arc::new(MemoryClientStore::new()),
            Arc::new(RbacEnforcer::new()),
        )
    }

    fn ctx(tenant: &str, role: UserRole) -> RequestContext {
        let mut ctx = RequestContext::system(TenantId::new(tenant));
        ctx.user_id = UserId::new();
        ctx.role = role;
        ctx
    }

    fn request() -> CreateClientRequest {
        serde_json::from_value(serde_json::json!({
            "name": "João Silva",
            "email": "joao.silva@acme.com",
            "contact": "(11) 99999-1111",
            "address": {
                "street": "Rua das Flores",
                "neighborhood": "Centro",
                "number": "123",
                "state": "SP"
            },
            "tenantId": "tenant-9"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_uses_context_tenant() {
        let service = service();
        let user = ctx("tenant-1", UserRole::User);
        let client = service.create_client(&user, request()).await.unwrap();
        assert_eq!(client.tenant_id, TenantId::new("tenant-1"));
        assert!(client.is_active);
        assert_eq!(client.public_id.len(), 8);
    }

    #[tokio::test]
    async fn test_guest_is_read_only() {
        let service = service();
        let user = ctx("tenant-1", UserRole::User);
        let guest = ctx("tenant-1", UserRole::Guest);
        let client = service.create_client(&user, request()).await.unwrap();

        assert!(service.get_client(&guest, client.id).await.is_ok());
        let err = service.create_client(&guest, request()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        let err = service.delete_client(&guest, client.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_cross_tenant_access_is_not_found() {
        let service = service();
        let owner = ctx("tenant-1", UserRole::Admin);
        let intruder = ctx("tenant-2", UserRole::Admin);
        let client = service.create_client(&owner, request()).await.unwrap();

        for err in [
            service.get_client(&intruder, client.id).await.unwrap_err(),
            service
                .update_client(&intruder, client.id, UpdateClientRequest::default())
                .await
                .unwrap_err(),
            service.delete_client(&intruder, client.id).await.unwrap_err(),
        ] {
            assert_eq!(err.kind, ErrorKind::NotFound);
        }
    }

    #[tokio::test]
    async fn test_update_distinguishes_null_from_absent() {
        let service = service();
        let user = ctx("tenant-1", UserRole::User);
        let client = service.create_client(&user, request()).await.unwrap();

        let keep: UpdateClientRequest =
            serde_json::from_value(serde_json::json!({ "isActive": false })).unwrap();
        let updated = service.update_client(&user, client.id, keep).await.unwrap();
        assert!(!updated.is_active);
        assert_eq!(updated.contact.as_deref(), Some("(11) 99999-1111"));

        let clear: UpdateClientRequest =
            serde_json::from_value(serde_json::json!({ "contact": null })).unwrap();
        let updated = service.update_client(&user, client.id, clear).await.unwrap();
        assert!(updated.contact.is_none());
    }

    #[tokio::test]
    async fn test_invalid_address_rejected() {
        let service = service();
        let mut req = request();
        req.address.street = "  ".to_string();
        let err = service
            .create_client(&ctx("tenant-1", UserRole::User), req)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
