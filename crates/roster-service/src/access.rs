//! Access control primitives.
//!
//! The transport layer authenticates a principal and hands the service
//! an [`Actor`]: the username plus the coarse security roles granted
//! to it. Every service operation validates capability against the
//! actor before touching any store.

use std::collections::BTreeSet;

use roster_core::error::{RosterError, RosterResult};

/// Coarse security role required for mutating user and role records.
pub const ADMIN: &str = "ADMIN";
/// Coarse security role for read access and the creator-gated update.
pub const USER: &str = "USER";

/// The authenticated principal an operation runs on behalf of.
#[derive(Debug, Clone)]
pub struct Actor {
    pub username: String,
    pub roles: BTreeSet<String>,
}

impl Actor {
    pub fn new<S, I, R>(username: S, roles: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            username: username.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Capability check for mutating operations.
    pub fn require_admin(&self) -> RosterResult<()> {
        if self.has_role(ADMIN) {
            Ok(())
        } else {
            Err(RosterError::access_denied(format!(
                "{} lacks the {ADMIN} role",
                self.username
            )))
        }
    }

    /// Capability check for reads and the creator-gated update path.
    pub fn require_user(&self) -> RosterResult<()> {
        if self.has_role(USER) || self.has_role(ADMIN) {
            Ok(())
        } else {
            Err(RosterError::access_denied(format!(
                "{} lacks the {USER} role",
                self.username
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_satisfies_both_checks() {
        let actor = Actor::new("root", [ADMIN]);
        assert!(actor.require_admin().is_ok());
        assert!(actor.require_user().is_ok());
    }

    #[test]
    fn user_cannot_pass_admin_check() {
        let actor = Actor::new("joe", [USER]);
        assert!(actor.require_user().is_ok());
        assert!(matches!(
            actor.require_admin(),
            Err(RosterError::AccessDenied { .. })
        ));
    }

    #[test]
    fn no_roles_denied_everywhere() {
        let actor = Actor::new("ghost", Vec::<String>::new());
        assert!(actor.require_admin().is_err());
        assert!(actor.require_user().is_err());
    }
}
