//! Role registration service.
//!
//! Roles have no lifecycle: once registered they are never updated or
//! deleted, and registration is not audited.

use roster_core::error::RosterResult;
use roster_core::models::role::NewRole;
use roster_core::repository::RoleStore;
use tracing::info;

use crate::access::Actor;
use crate::dto::{CreateRoleInput, RoleView};

pub struct RoleService<R: RoleStore> {
    roles: R,
}

impl<R: RoleStore> RoleService<R> {
    pub fn new(roles: R) -> Self {
        Self { roles }
    }

    pub async fn create_role(
        &self,
        input: CreateRoleInput,
        actor: &Actor,
    ) -> RosterResult<RoleView> {
        actor.require_admin()?;

        let role = self.roles.create(NewRole { name: input.name }).await?;

        info!(role = %role.name, "role created");

        Ok(role.into())
    }

    /// Batch registration, preserving input order. Best-effort: a
    /// failed insert aborts the remainder without rolling back earlier
    /// inserts.
    pub async fn create_roles(
        &self,
        inputs: Vec<CreateRoleInput>,
        actor: &Actor,
    ) -> RosterResult<Vec<RoleView>> {
        actor.require_admin()?;

        let new_roles = inputs.into_iter().map(|i| NewRole { name: i.name }).collect();
        let roles = self.roles.create_all(new_roles).await?;

        info!(count = roles.len(), "roles created");

        Ok(roles.into_iter().map(RoleView::from).collect())
    }
}
