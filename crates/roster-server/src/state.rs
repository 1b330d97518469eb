//! Shared application state passed to all request handlers.

use std::sync::Arc;

use roster_db::repository::{SurrealAuditLogRepository, SurrealRoleStore, SurrealUserRepository};
use roster_service::{MemoryCredentialStore, RoleService, UserService};
use surrealdb::engine::remote::ws::Client;

pub type UserLifecycle = UserService<
    SurrealUserRepository<Client>,
    SurrealRoleStore<Client>,
    SurrealAuditLogRepository<Client>,
>;

pub type RoleRegistry = RoleService<SurrealRoleStore<Client>>;

/// Cloned per handler; all members are cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserLifecycle>,
    pub roles: Arc<RoleRegistry>,
    pub credentials: Arc<MemoryCredentialStore>,
}
