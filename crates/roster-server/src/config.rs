//! Server configuration from environment variables.

use roster_db::DbConfig;
use roster_service::access::{ADMIN, USER};

/// One account seeded into the credential store at startup.
#[derive(Debug, Clone)]
pub struct BootstrapAccount {
    pub username: String,
    pub password: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    pub db: DbConfig,
    /// Accounts seeded into the credential store.
    pub accounts: Vec<BootstrapAccount>,
}

impl Config {
    pub fn from_env() -> Self {
        let mut db = DbConfig::default();
        if let Ok(url) = std::env::var("ROSTER_DB_URL") {
            db.url = url;
        }
        if let Ok(namespace) = std::env::var("ROSTER_DB_NAMESPACE") {
            db.namespace = namespace;
        }
        if let Ok(database) = std::env::var("ROSTER_DB_NAME") {
            db.database = database;
        }
        if let Ok(username) = std::env::var("ROSTER_DB_USER") {
            db.username = username;
        }
        if let Ok(password) = std::env::var("ROSTER_DB_PASSWORD") {
            db.password = password;
        }

        let listen_addr =
            std::env::var("ROSTER_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

        // Default accounts mirror the original deployment's two
        // principals; override the secrets in any real environment.
        let accounts = vec![
            BootstrapAccount {
                username: "admin".into(),
                password: std::env::var("ROSTER_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "adminpass".into()),
                roles: vec![ADMIN.into()],
            },
            BootstrapAccount {
                username: "user".into(),
                password: std::env::var("ROSTER_USER_PASSWORD")
                    .unwrap_or_else(|_| "userpass".into()),
                roles: vec![USER.into()],
            },
        ];

        Self {
            listen_addr,
            db,
            accounts,
        }
    }
}
