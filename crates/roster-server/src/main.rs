//! ROSTER Server — application entry point.

use std::sync::Arc;

use roster_db::DbManager;
use roster_db::repository::{SurrealAuditLogRepository, SurrealRoleStore, SurrealUserRepository};
use roster_service::{MemoryCredentialStore, RoleService, UserService};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod auth;
mod config;
mod error;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::from_env();

    let db = DbManager::connect(&config.db).await?;
    roster_db::run_migrations(db.client()).await?;

    let mut credentials = MemoryCredentialStore::new();
    for account in &config.accounts {
        credentials.add_account(
            account.username.clone(),
            &account.password,
            account.roles.clone(),
        )?;
    }

    let users = SurrealUserRepository::new(db.client().clone());
    let roles = SurrealRoleStore::new(db.client().clone());
    let audit = SurrealAuditLogRepository::new(db.client().clone());

    let state = AppState {
        users: Arc::new(UserService::new(users, roles.clone(), audit)),
        roles: Arc::new(RoleService::new(roles)),
        credentials: Arc::new(credentials),
    };

    let app = api::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "ROSTER server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
