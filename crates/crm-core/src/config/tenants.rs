//! Tenant display names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Known tenants and their display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantsConfig {
    /// Tenant id to display name.
    pub names: BTreeMap<String, String>,
}

impl Default for TenantsConfig {
    fn default() -> Self {
        let names = [
            ("tenant-1", "Empresa ACME"),
            ("tenant-2", "Empresa GLOBEX"),
            ("tenant-3", "Empresa INITECH"),
            ("tenant-4", "Empresa TECH CORP"),
            ("tenant-5", "Empresa INNOVATION LAB"),
        ]
        .into_iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect();

        Self { names }
    }
}

impl TenantsConfig {
    /// Display name for a tenant, falling back to `"Empresa <id>"`.
    pub fn display_name(&self, tenant_id: &str) -> String {
        self.names
            .get(tenant_id)
            .cloned()
            .unwrap_or_else(|| format!("Empresa {tenant_id}"))
    }
}
