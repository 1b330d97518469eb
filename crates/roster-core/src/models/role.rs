//! Role domain model.
//!
//! Roles are immutable after creation: no update or delete operation
//! exists anywhere in the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    /// Unique name, e.g. "ROLE_ADMIN".
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a new role record.
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
}
