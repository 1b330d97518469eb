//! Database-specific error types and conversions.

use roster_core::error::RosterError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Statement failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<DbError> for RosterError {
    fn from(err: DbError) -> Self {
        RosterError::Database(err.to_string())
    }
}
