//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crm_entity::user::UserRole;

/// A permission checked before a tenant-scoped operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPermission {
    // Clients
    /// List and view clients.
    ClientRead,
    /// Create clients.
    ClientCreate,
    /// Update clients.
    ClientUpdate,
    /// Delete clients.
    ClientDelete,

    // Users
    /// List and view users.
    UserRead,
    /// Create users.
    UserCreate,
    /// Update users (including role and password).
    UserUpdate,
    /// Delete users.
    UserDelete,

    // Dashboard
    /// View tenant statistics.
    DashboardView,
}

impl SystemPermission {
    /// Every permission.
    pub const ALL: [SystemPermission; 9] = [
        Self::ClientRead,
        Self::ClientCreate,
        Self::ClientUpdate,
        Self::ClientDelete,
        Self::UserRead,
        Self::UserCreate,
        Self::UserUpdate,
        Self::UserDelete,
        Self::DashboardView,
    ];

    /// Dotted name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientRead => "client.read",
            Self::ClientCreate => "client.create",
            Self::ClientUpdate => "client.update",
            Self::ClientDelete => "client.delete",
            Self::UserRead => "user.read",
            Self::UserCreate => "user.create",
            Self::UserUpdate => "user.update",
            Self::UserDelete => "user.delete",
            Self::DashboardView => "dashboard.view",
        }
    }
}

impl fmt::Display for SystemPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<UserRole, HashSet<SystemPermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Guest: read-only
        let guest: HashSet<SystemPermission> = [
            SystemPermission::ClientRead,
            SystemPermission::DashboardView,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Guest, guest);

        // User: guest + client writes + user directory
        let user: HashSet<SystemPermission> = [
            SystemPermission::ClientRead,
            SystemPermission::ClientCreate,
            SystemPermission::ClientUpdate,
            SystemPermission::ClientDelete,
            SystemPermission::UserRead,
            SystemPermission::DashboardView,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::User, user);

        // Admin: everything
        policies.insert(
            UserRole::Admin,
            SystemPermission::ALL.into_iter().collect(),
        );

        Self { policies }
    }

    /// Checks whether a role has a given permission.
    pub fn has_permission(&self, role: &UserRole, permission: &SystemPermission) -> bool {
        self.policies
            .get(role)
            .is_some_and(|perms| perms.contains(permission))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
