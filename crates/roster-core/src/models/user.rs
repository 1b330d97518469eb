//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Unique across the whole (flat) namespace.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Attached roles, unique per user (keyed by role id).
    pub roles: Vec<Role>,
    /// Username of the creator. Immutable after creation.
    pub created_by: String,
    /// Username of the last updater, if the record was ever updated.
    pub updated_by: Option<String>,
    /// New users start unapproved; approval is a one-way transition.
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert shape for a new user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Already-resolved role records to attach.
    pub roles: Vec<Role>,
    pub created_by: String,
    pub updated_by: Option<String>,
}
