//! Client entity model.

use chrono::{DateTime, Utc};
use crm_core::types::{ClientId, TenantId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::address::Address;

/// A customer record owned by a tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier.
    pub id: ClientId,
    /// Short human-facing identifier, unique across the system.
    pub public_id: String,
    /// Client name.
    pub name: String,
    /// Contact email, unique within the tenant (case-insensitive).
    pub email: String,
    /// Whether the client is active.
    pub is_active: bool,
    /// Free-form contact (usually a phone number).
    pub contact: Option<String>,
    /// Postal address.
    #[sqlx(json)]
    pub address: Address,
    /// Avatar / logo URL.
    pub image_url: Option<String>,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// When the client was created.
    pub created_at: DateTime<Utc>,
    /// When the client was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Build a new row from creation input.
    pub fn from_new(new: NewClient) -> Self {
        let now = Utc::now();
        Self {
            id: ClientId::new(),
            public_id: new.public_id.unwrap_or_else(generate_public_id),
            name: new.name,
            email: new.email,
            is_active: new.is_active,
            contact: new.contact,
            address: new.address,
            image_url: new.image_url,
            tenant_id: new.tenant_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Generate a short public id: the first 8 hex digits of a v4 uuid, upper-cased.
pub fn generate_public_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

/// Data required to create a new client.
#[derive(Debug, Clone)]
pub struct NewClient {
    /// Explicit public id, generated when absent.
    pub public_id: Option<String>,
    /// Client name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Active flag.
    pub is_active: bool,
    /// Contact.
    pub contact: Option<String>,
    /// Address.
    pub address: Address,
    /// Image URL.
    pub image_url: Option<String>,
    /// Owning tenant, taken from the acting principal.
    pub tenant_id: TenantId,
}

/// Partial update of a client. The tenant can never change.
#[derive(Debug, Clone, Default)]
pub struct UpdateClient {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New contact. `Some(None)` clears it.
    pub contact: Option<Option<String>>,
    /// Replacement address.
    pub address: Option<Address>,
    /// New image URL. `Some(None)` clears it.
    pub image_url: Option<Option<String>>,
}

impl UpdateClient {
    /// Apply the changes to an in-memory copy of the row.
    pub fn apply_to(&self, client: &mut Client) {
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(email) = &self.email {
            client.email = email.clone();
        }
        if let Some(active) = self.is_active {
            client.is_active = active;
        }
        if let Some(contact) = &self.contact {
            client.contact = contact.clone();
        }
        if let Some(address) = &self.address {
            client.address = address.clone();
        }
        if let Some(image_url) = &self.image_url {
            client.image_url = image_url.clone();
        }
        client.updated_at = Utc::now();
    }
}

/// Listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientFilter {
    /// Case-insensitive substring of name, email or public id.
    pub search: Option<String>,
    /// Only active (`true`) or inactive (`false`) clients.
    pub is_active: Option<bool>,
}

impl ClientFilter {
    /// Normalized search term, `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Evaluate the filter against a row.
    pub fn matches(&self, client: &Client) -> bool {
        if let Some(active) = self.is_active
            && client.is_active != active
        {
            return false;
        }
        match self.search_term() {
            Some(term) => {
                client.name.to_lowercase().contains(&term)
                    || client.email.to_lowercase().contains(&term)
                    || client.public_id.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

/// Per-tenant client counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, FromRow)]
pub struct ClientStats {
    /// All clients.
    pub total: i64,
    /// Active clients.
    pub active: i64,
}
