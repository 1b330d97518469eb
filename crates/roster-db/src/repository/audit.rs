//! SurrealDB implementation of [`AuditLogRepository`].
//!
//! Append-only: the table denies updates and deletes at the
//! permission level, and no such operation exists here either.

use chrono::{DateTime, Utc};
use roster_core::error::RosterResult;
use roster_core::models::audit::{AuditAction, AuditLogEntry, NewAuditLogEntry};
use roster_core::repository::AuditLogRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AuditRow {
    action: String,
    performed_by: String,
    details: String,
    user_id: String,
    performed_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct AuditRowWithId {
    record_id: String,
    action: String,
    performed_by: String,
    details: String,
    user_id: String,
    performed_at: DateTime<Utc>,
}

fn parse_action(s: &str) -> Result<AuditAction, DbError> {
    match s {
        "CREATE_USER" => Ok(AuditAction::CreateUser),
        "ASSIGN_ROLES" => Ok(AuditAction::AssignRoles),
        "APPROVE_USER" => Ok(AuditAction::ApproveUser),
        "UPDATE_USER" => Ok(AuditAction::UpdateUser),
        "REMOVE_USER" => Ok(AuditAction::RemoveUser),
        other => Err(DbError::Corrupt(format!("unknown audit action: {other}"))),
    }
}

impl AuditRowWithId {
    fn try_into_entry(self) -> Result<AuditLogEntry, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Corrupt(format!("invalid user UUID: {e}")))?;
        Ok(AuditLogEntry {
            id,
            action: parse_action(&self.action)?,
            performed_by: self.performed_by,
            details: self.details,
            user_id,
            performed_at: self.performed_at,
        })
    }
}

/// SurrealDB implementation of the audit log.
#[derive(Clone)]
pub struct SurrealAuditLogRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAuditLogRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AuditLogRepository for SurrealAuditLogRepository<C> {
    async fn append(&self, input: NewAuditLogEntry) -> RosterResult<AuditLogEntry> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('audit_log', $id) SET \
                 action = $action, \
                 performed_by = $performed_by, \
                 details = $details, \
                 user_id = $user_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("action", input.action.as_str().to_string()))
            .bind(("performed_by", input.performed_by))
            .bind(("details", input.details))
            .bind(("user_id", input.user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AuditRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| {
            DbError::Query(format!("append returned no rows for audit entry {id_str}"))
        })?;

        Ok(AuditLogEntry {
            id,
            action: input.action,
            performed_by: row.performed_by,
            details: row.details,
            user_id: input.user_id,
            performed_at: row.performed_at,
        })
    }

    async fn list(&self) -> RosterResult<Vec<AuditLogEntry>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM audit_log \
                 ORDER BY performed_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AuditRowWithId> = result.take(0).map_err(DbError::from)?;

        let entries = rows
            .into_iter()
            .map(AuditRowWithId::try_into_entry)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(entries)
    }
}
