//! Demo dataset: three tenants, each with an admin, a user and a guest,
//! plus sample clients.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crm_auth::password::PasswordHasher;
use crm_core::error::AppError;
use crm_core::types::TenantId;
use crm_database::store::{ClientStore, UserStore};
use crm_entity::client::{Address, NewClient};
use crm_entity::user::{CreateUser, UserRole};

/// `(tenant, short name, email domain)` for each demo tenant.
const DEMO_TENANTS: [(&str, &str, &str); 3] = [
    ("tenant-1", "ACME", "acme.com"),
    ("tenant-2", "GLOBEX", "globex.com"),
    ("tenant-3", "INITECH", "initech.com"),
];

/// `(tenant, name, email, active, contact, street, neighborhood, number)`.
type DemoClient = (
    &'static str,
    &'static str,
    &'static str,
    bool,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const DEMO_CLIENTS: [DemoClient; 8] = [
    ("tenant-1", "João Silva", "joao.silva@acme.com", true, "(11) 99999-1111", "Rua das Flores", "Centro", "123"),
    ("tenant-1", "Maria Santos", "maria.santos@acme.com", true, "(11) 99999-2222", "Avenida Paulista", "Bela Vista", "456"),
    ("tenant-1", "Pedro Oliveira", "pedro.oliveira@acme.com", false, "(11) 99999-3333", "Rua Augusta", "Consolação", "789"),
    ("tenant-2", "Ana Costa", "ana.costa@globex.com", true, "(11) 99999-4444", "Rua Oscar Freire", "Jardins", "321"),
    ("tenant-2", "Carlos Ferreira", "carlos.ferreira@globex.com", true, "(11) 99999-5555", "Rua Haddock Lobo", "Cerqueira César", "654"),
    ("tenant-2", "Lucia Mendes", "lucia.mendes@globex.com", true, "(11) 99999-6666", "Rua Pamplona", "Jardins", "987"),
    ("tenant-3", "Roberto Alves", "roberto.alves@initech.com", true, "(11) 99999-7777", "Rua Bela Cintra", "Consolação", "555"),
    ("tenant-3", "Fernanda Lima", "fernanda.lima@initech.com", false, "(11) 99999-8888", "Rua Teodoro Sampaio", "Pinheiros", "777"),
];

/// What a seed run did.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SeedReport {
    /// Users inserted.
    pub users: usize,
    /// Clients inserted.
    pub clients: usize,
    /// Rows deleted by a reset.
    pub removed: u64,
    /// The store already held data and no reset was requested.
    pub skipped: bool,
}

/// Loads the demo dataset. Operator action: bypasses RBAC.
#[derive(Debug, Clone)]
pub struct DemoSeeder {
    users: Arc<dyn UserStore>,
    clients: Arc<dyn ClientStore>,
    hasher: Arc<PasswordHasher>,
}

impl DemoSeeder {
    /// Creates a seeder over the given stores.
    pub fn new(
        users: Arc<dyn UserStore>,
        clients: Arc<dyn ClientStore>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            users,
            clients,
            hasher,
        }
    }

    /// Seeds the demo data.
    ///
    /// With `reset`, all clients and users are deleted first. Without it,
    /// a store that already has users is left untouched.
    pub async fn run(&self, reset: bool) -> Result<SeedReport, AppError> {
        let mut report = SeedReport::default();

        if reset {
            report.removed += self.clients.delete_all().await?;
            report.removed += self.users.delete_all().await?;
            info!(removed = report.removed, "Cleared existing data");
        } else if !self.users.count_by_tenant().await?.is_empty() {
            info!("Store already has users, skipping demo seed");
            report.skipped = true;
            return Ok(report);
        }

        for (role, label, password) in [
            (UserRole::Admin, "Admin", "admin123"),
            (UserRole::User, "User", "user123"),
            (UserRole::Guest, "Guest", "guest123"),
        ] {
            let password_hash = self.hasher.hash_password(password)?;
            for (tenant, short, domain) in DEMO_TENANTS {
                self.users
                    .create(CreateUser {
                        name: format!("{label} {short}"),
                        email: format!("{}@{domain}", label.to_lowercase()),
                        password_hash: password_hash.clone(),
                        role,
                        tenant_id: TenantId::new(tenant),
                    })
                    .await?;
                report.users += 1;
            }
        }

        for (tenant, name, email, active, contact, street, neighborhood, number) in DEMO_CLIENTS {
            let image = email.split('.').next().unwrap_or("client");
            self.clients
                .create(NewClient {
                    public_id: None,
                    name: name.to_string(),
                    email: email.to_string(),
                    is_active: active,
                    contact: Some(contact.to_string()),
                    address: Address {
                        street: street.to_string(),
                        neighborhood: neighborhood.to_string(),
                        number: number.to_string(),
                        state: "SP".to_string(),
                    },
                    image_url: Some(format!("https://example.com/{image}.jpg")),
                    tenant_id: TenantId::new(tenant),
                })
                .await?;
            report.clients += 1;
        }

        info!(
            users = report.users,
            clients = report.clients,
            "Demo data seeded"
        );
        Ok(report)
    }
}
