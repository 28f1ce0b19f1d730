//! Tenant dashboard statistics.

use std::sync::Arc;

use crm_auth::rbac::{RbacEnforcer, SystemPermission};
use crm_core::error::AppError;
use crm_database::store::ClientStore;
use crm_entity::client::ClientStats;

use crate::context::RequestContext;

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardService {
    clients: Arc<dyn ClientStore>,
    rbac: Arc<RbacEnforcer>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(clients: Arc<dyn ClientStore>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { clients, rbac }
    }

    /// Total and active clients of the caller's tenant.
    pub async fn stats(&self, ctx: &RequestContext) -> Result<ClientStats, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::DashboardView)?;

        self.clients.stats(&ctx.tenant_id).await
    }
}
