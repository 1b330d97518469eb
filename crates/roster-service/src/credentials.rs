//! Credential issuance as a pluggable collaborator.
//!
//! The transport layer resolves basic-auth credentials to an [`Actor`]
//! through this interface; nothing in the service layer assumes where
//! accounts come from.

use std::collections::{BTreeSet, HashMap};

use roster_core::error::RosterResult;

use crate::access::Actor;
use crate::password;

/// One stored account: username, Argon2id secret hash, and the coarse
/// security roles granted to it.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
    pub roles: BTreeSet<String>,
}

/// Lookup-by-username credential source.
pub trait CredentialStore: Send + Sync {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = RosterResult<Option<Credential>>> + Send;
}

/// Verify a username/secret pair against a store.
///
/// `Ok(None)` covers both unknown usernames and wrong secrets; callers
/// cannot distinguish the two.
pub async fn authenticate<S: CredentialStore>(
    store: &S,
    username: &str,
    secret: &str,
) -> RosterResult<Option<Actor>> {
    let Some(credential) = store.find_by_username(username).await? else {
        return Ok(None);
    };

    if password::verify_password(secret, &credential.password_hash)? {
        Ok(Some(Actor {
            username: credential.username,
            roles: credential.roles,
        }))
    } else {
        Ok(None)
    }
}

/// In-memory credential store, seeded at startup from configuration.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    accounts: HashMap<String, Credential>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account, hashing the secret.
    pub fn add_account<S, I, R>(&mut self, username: S, secret: &str, roles: I) -> RosterResult<()>
    where
        S: Into<String>,
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let username = username.into();
        let credential = Credential {
            username: username.clone(),
            password_hash: password::hash_password(secret)?,
            roles: roles.into_iter().map(Into::into).collect(),
        };
        self.accounts.insert(username, credential);
        Ok(())
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> RosterResult<Option<Credential>> {
        Ok(self.accounts.get(username).cloned())
    }
}
