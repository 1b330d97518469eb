//! SurrealDB implementation of [`RoleStore`].

use chrono::{DateTime, Utc};
use roster_core::error::RosterResult;
use roster_core::models::role::{NewRole, Role};
use roster_core::repository::RoleStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
pub(crate) struct RoleRow {
    name: String,
    created_at: DateTime<Utc>,
}

impl RoleRow {
    pub(crate) fn into_role(self, id: Uuid) -> Role {
        Role {
            id,
            name: self.name,
            created_at: self.created_at,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct RoleRowWithId {
    record_id: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl RoleRowWithId {
    fn try_into_role(self) -> Result<Role, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid UUID: {e}")))?;
        Ok(Role {
            id,
            name: self.name,
            created_at: self.created_at,
        })
    }
}

/// Fetch a role record by id string.
///
/// Roles are immutable and never deleted, so a missing id means the
/// referencing record is corrupt.
pub(crate) async fn fetch_role<C: Connection>(
    db: &Surreal<C>,
    id_str: &str,
) -> Result<Role, DbError> {
    let mut result = db
        .query("SELECT * FROM type::record('role', $id)")
        .bind(("id", id_str.to_string()))
        .await?;

    let rows: Vec<RoleRow> = result.take(0)?;
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| DbError::Corrupt(format!("dangling role reference: {id_str}")))?;

    let id = Uuid::parse_str(id_str)
        .map_err(|e| DbError::Corrupt(format!("invalid UUID: {e}")))?;

    Ok(row.into_role(id))
}

/// SurrealDB implementation of the Role store.
#[derive(Clone)]
pub struct SurrealRoleStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealRoleStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> RoleStore for SurrealRoleStore<C> {
    async fn find_by_name(&self, name: &str) -> RosterResult<Option<Role>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM role WHERE name = $name")
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoleRowWithId> = result.take(0).map_err(DbError::from)?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_role()?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: NewRole) -> RosterResult<Role> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query("CREATE type::record('role', $id) SET name = $name")
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<RoleRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| {
            DbError::Query(format!("create returned no rows for role {id_str}"))
        })?;

        Ok(row.into_role(id))
    }

    // Best-effort: a failed insert aborts the remainder; earlier
    // inserts stay committed.
    async fn create_all(&self, inputs: Vec<NewRole>) -> RosterResult<Vec<Role>> {
        let mut roles = Vec::with_capacity(inputs.len());
        for input in inputs {
            roles.push(self.create(input).await?);
        }
        Ok(roles)
    }
}
