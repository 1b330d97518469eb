//! Transfer shapes exposed to callers of the services.

use std::collections::BTreeSet;

use roster_core::models::role::Role;
use roster_core::models::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request shape for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// Role names; each must resolve in the role store.
    #[serde(default)]
    pub roles: BTreeSet<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

/// Request shape for the creator-gated profile update. Only the
/// profile fields are writable through this path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// Request shape for registering a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoleInput {
    pub name: String,
}

/// Response shape for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: BTreeSet<String>,
    pub approved: bool,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            roles: user.roles.into_iter().map(|r| r.name).collect(),
            approved: user.approved,
        }
    }
}

/// Response shape for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleView {
    pub id: Uuid,
    pub name: String,
}

impl From<Role> for RoleView {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}
