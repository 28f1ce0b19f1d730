//! RBAC enforcement: checks whether a role holds a required permission.

use crm_core::error::AppError;
use crm_entity::user::UserRole;

use super::policies::{RbacPolicies, SystemPermission};

/// Enforces role-based access control.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Returns `Ok(())` if the role holds the permission, otherwise an
    /// authorization error.
    pub fn require_permission(
        &self,
        role: &UserRole,
        permission: &SystemPermission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            tracing::debug!(%role, %permission, "Permission denied");
            Err(AppError::authorization(format!(
                "Role '{role}' does not have permission '{permission}'"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::error::ErrorKind;

    #[test]
    fn test_guest_cannot_create_client() {
        let enforcer = RbacEnforcer::new();
        let err = enforcer
            .require_permission(&UserRole::Guest, &SystemPermission::ClientCreate)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(err.message.contains("client.create"));
    }

    #[test]
    fn test_user_cannot_manage_users() {
        let enforcer = RbacEnforcer::new();
        assert!(
            enforcer
                .require_permission(&UserRole::User, &SystemPermission::UserDelete)
                .is_err()
        );
        assert!(
            enforcer
                .require_permission(&UserRole::User, &SystemPermission::UserRead)
                .is_ok()
        );
    }
}
