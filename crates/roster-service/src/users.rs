//! User lifecycle service — create, assign-roles, approve, update,
//! remove, list, and profile orchestration.
//!
//! The service is stateless; all state lives in the repository
//! collaborators. Every mutating operation appends exactly one audit
//! entry, and the entry must not be observable without the primary
//! mutation: the mutation is performed first, and if the audit append
//! fails the mutation is compensated before the error is returned.
//! Concurrent mutations of the same user rely on the storage engine's
//! concurrency control; the service takes no locks of its own.

use std::collections::BTreeSet;

use roster_core::error::{RosterError, RosterResult};
use roster_core::models::audit::{AuditAction, NewAuditLogEntry};
use roster_core::models::role::Role;
use roster_core::models::user::{NewUser, User};
use roster_core::repository::{AuditLogRepository, RoleStore, UserRepository};
use tracing::info;
use uuid::Uuid;

use crate::access::Actor;
use crate::dto::{CreateUserInput, UpdateUserInput, UserView};

/// User lifecycle service.
///
/// Generic over repository implementations so that the service layer
/// has no dependency on the database crate.
pub struct UserService<U: UserRepository, R: RoleStore, A: AuditLogRepository> {
    users: U,
    roles: R,
    audit: A,
}

impl<U: UserRepository, R: RoleStore, A: AuditLogRepository> UserService<U, R, A> {
    pub fn new(users: U, roles: R, audit: A) -> Self {
        Self {
            users,
            roles,
            audit,
        }
    }

    /// Create a new, unapproved user.
    pub async fn create_user(
        &self,
        input: CreateUserInput,
        actor: &Actor,
    ) -> RosterResult<UserView> {
        actor.require_admin()?;

        // 1. Validate input.
        if input.username.is_empty() {
            return Err(RosterError::validation("Username cannot be empty"));
        }
        let created_by = input
            .created_by
            .ok_or_else(|| RosterError::validation("CreatedBy cannot be null"))?;

        // 2. Resolve every requested role before touching the user
        //    store; one unknown name aborts the whole operation.
        let roles = self.resolve_roles(&input.roles).await?;

        // 3. Persist. New users start unapproved.
        let user = self
            .users
            .create(NewUser {
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                roles,
                created_by,
                updated_by: input.updated_by,
            })
            .await?;

        // 4. Audit, undoing the insert if the append fails.
        if let Err(e) = self.record(AuditAction::CreateUser, &user, actor).await {
            let _ = self.users.delete(user.id).await;
            return Err(e);
        }

        info!(
            username = %user.username,
            created_by = %user.created_by,
            "user created"
        );

        Ok(user.into())
    }

    /// Add roles to a user's existing set. Union semantics: names that
    /// resolve to already-attached roles are no-ops.
    pub async fn assign_roles(
        &self,
        user_id: Uuid,
        role_names: BTreeSet<String>,
        actor: &Actor,
    ) -> RosterResult<UserView> {
        actor.require_admin()?;

        let mut user = self.get_user(user_id).await?;
        let resolved = self.resolve_roles(&role_names).await?;

        let previous = user.clone();
        for role in resolved {
            if !user.roles.iter().any(|r| r.id == role.id) {
                user.roles.push(role);
            }
        }

        let user = self.users.save(&user).await?;

        if let Err(e) = self.record(AuditAction::AssignRoles, &user, actor).await {
            let _ = self.users.save(&previous).await;
            return Err(e);
        }

        info!(username = %user.username, "roles assigned");

        Ok(user.into())
    }

    /// One-way approval transition. Re-approving is rejected.
    pub async fn approve_user(&self, user_id: Uuid, actor: &Actor) -> RosterResult<UserView> {
        actor.require_admin()?;

        let mut user = self.get_user(user_id).await?;

        // The approver's identity is merely validated to exist.
        self.users
            .find_by_username(&actor.username)
            .await?
            .ok_or_else(|| RosterError::not_found("Approver", &actor.username))?;

        if user.approved {
            return Err(RosterError::validation("User is already approved."));
        }

        let previous = user.clone();
        user.approved = true;
        let user = self.users.save(&user).await?;

        if let Err(e) = self.record(AuditAction::ApproveUser, &user, actor).await {
            let _ = self.users.save(&previous).await;
            return Err(e);
        }

        info!(username = %user.username, approved_by = %actor.username, "user approved");

        Ok(user.into())
    }

    /// Overwrite the profile fields. Allowed only for the creator and
    /// only before approval; username, createdBy, approval state, and
    /// roles are untouched by this path.
    pub async fn update_user(
        &self,
        user_id: Uuid,
        input: UpdateUserInput,
        actor: &Actor,
    ) -> RosterResult<UserView> {
        actor.require_user()?;

        let mut user = self.get_user(user_id).await?;

        if user.created_by != actor.username || user.approved {
            return Err(RosterError::access_denied(
                "Only the creator can update the user before approval.",
            ));
        }

        let previous = user.clone();
        user.first_name = input.first_name;
        user.last_name = input.last_name;
        user.email = input.email;
        user.updated_by = Some(actor.username.clone());

        let user = self.users.save(&user).await?;

        if let Err(e) = self.record(AuditAction::UpdateUser, &user, actor).await {
            let _ = self.users.save(&previous).await;
            return Err(e);
        }

        info!(username = %user.username, updated_by = %actor.username, "user updated");

        Ok(user.into())
    }

    /// Physically delete a user. The audit entry outlives the record,
    /// referencing it weakly.
    pub async fn remove_user(&self, user_id: Uuid, actor: &Actor) -> RosterResult<()> {
        actor.require_admin()?;

        let user = self.get_user(user_id).await?;

        // The remover's identity is merely validated to exist.
        self.users
            .find_by_username(&actor.username)
            .await?
            .ok_or_else(|| RosterError::not_found("Remover", &actor.username))?;

        self.users.delete(user.id).await?;

        if let Err(e) = self.record(AuditAction::RemoveUser, &user, actor).await {
            // Restore the record so the deletion is not observable
            // without its audit entry.
            let _ = self.users.save(&user).await;
            return Err(e);
        }

        info!(username = %user.username, removed_by = %actor.username, "user removed");

        Ok(())
    }

    /// All users, in the repository's insertion order.
    pub async fn list_users(&self, actor: &Actor) -> RosterResult<Vec<UserView>> {
        actor.require_user()?;

        let users = self.users.list().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    pub async fn get_user_profile(&self, username: &str, actor: &Actor) -> RosterResult<UserView> {
        actor.require_user()?;

        self.users
            .find_by_username(username)
            .await?
            .map(UserView::from)
            .ok_or_else(|| RosterError::not_found("User", username))
    }

    async fn get_user(&self, user_id: Uuid) -> RosterResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", user_id))
    }

    async fn resolve_roles(&self, names: &BTreeSet<String>) -> RosterResult<Vec<Role>> {
        let mut roles = Vec::with_capacity(names.len());
        for name in names {
            let role = self
                .roles
                .find_by_name(name)
                .await?
                .ok_or_else(|| RosterError::not_found("Role", name))?;
            roles.push(role);
        }
        Ok(roles)
    }

    async fn record(&self, action: AuditAction, user: &User, actor: &Actor) -> RosterResult<()> {
        self.audit
            .append(NewAuditLogEntry {
                action,
                performed_by: actor.username.clone(),
                details: format!("User: {user:?}"),
                user_id: user.id,
            })
            .await?;
        Ok(())
    }
}
