//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookup operations return
//! `Ok(None)` on absence; callers decide how absence is reported.

use uuid::Uuid;

use crate::error::RosterResult;
use crate::models::{
    audit::{AuditLogEntry, NewAuditLogEntry},
    role::{NewRole, Role},
    user::{NewUser, User},
};

/// Persists user records, keyed by surrogate id with a unique lookup
/// by username.
pub trait UserRepository: Send + Sync {
    /// Insert a new record. New users are persisted unapproved.
    fn create(&self, input: NewUser) -> impl Future<Output = RosterResult<User>> + Send;

    fn find_by_id(&self, id: Uuid) -> impl Future<Output = RosterResult<Option<User>>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = RosterResult<Option<User>>> + Send;

    /// Persist the current field values of an existing record. Also
    /// re-creates the record if it was deleted (used to compensate a
    /// failed audit write after a removal).
    fn save(&self, user: &User) -> impl Future<Output = RosterResult<User>> + Send;

    /// Physical delete; no soft-delete path exists.
    fn delete(&self, id: Uuid) -> impl Future<Output = RosterResult<()>> + Send;

    /// All users in insertion order (deterministic for a fixed store).
    fn list(&self) -> impl Future<Output = RosterResult<Vec<User>>> + Send;
}

/// Persists role records and resolves role name -> role identity.
pub trait RoleStore: Send + Sync {
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = RosterResult<Option<Role>>> + Send;

    fn create(&self, input: NewRole) -> impl Future<Output = RosterResult<Role>> + Send;

    /// Batch insert. Best-effort: a failure aborts the remainder but
    /// does not roll back earlier inserts.
    fn create_all(
        &self,
        inputs: Vec<NewRole>,
    ) -> impl Future<Output = RosterResult<Vec<Role>>> + Send;
}

/// Append-only store for audit entries. No update or delete path
/// exists.
pub trait AuditLogRepository: Send + Sync {
    fn append(
        &self,
        input: NewAuditLogEntry,
    ) -> impl Future<Output = RosterResult<AuditLogEntry>> + Send;

    /// All entries, oldest first.
    fn list(&self) -> impl Future<Output = RosterResult<Vec<AuditLogEntry>>> + Send;
}
