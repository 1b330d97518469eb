//! Error types for the ROSTER system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    /// A referenced entity does not exist. `entity` names what was
    /// looked up ("User", "Role", "Approver", "Remover"), `key` is the
    /// id or name that failed to resolve.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{reason}")]
    AccessDenied { reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RosterError {
    pub fn not_found(entity: impl Into<String>, key: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn access_denied(reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            reason: reason.into(),
        }
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
