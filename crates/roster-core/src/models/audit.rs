//! Audit log domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of mutation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    CreateUser,
    AssignRoles,
    ApproveUser,
    UpdateUser,
    RemoveUser,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::CreateUser => "CREATE_USER",
            AuditAction::AssignRoles => "ASSIGN_ROLES",
            AuditAction::ApproveUser => "APPROVE_USER",
            AuditAction::UpdateUser => "UPDATE_USER",
            AuditAction::RemoveUser => "REMOVE_USER",
        }
    }
}

/// One immutable record of a mutating action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub action: AuditAction,
    /// Username of the acting principal.
    pub performed_by: String,
    /// Free-text snapshot of the affected user at mutation time.
    pub details: String,
    /// Weak reference to the affected user. Non-owning: the user may
    /// have been deleted since (REMOVE_USER entries always outlive it).
    pub user_id: Uuid,
    pub performed_at: DateTime<Utc>,
}

/// Insert shape for an audit entry. `performed_at` is assigned at
/// construction by the store.
#[derive(Debug, Clone)]
pub struct NewAuditLogEntry {
    pub action: AuditAction,
    pub performed_by: String,
    pub details: String,
    pub user_id: Uuid,
}
