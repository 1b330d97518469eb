//! SurrealDB implementation of [`UserRepository`].
//!
//! Role attachments are stored as a `role_ids` string array on the
//! user row and resolved to full [`Role`] records on read.

use chrono::{DateTime, Utc};
use roster_core::error::RosterResult;
use roster_core::models::role::Role;
use roster_core::models::user::{NewUser, User};
use roster_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::role::fetch_role;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    role_ids: Vec<String>,
    created_by: String,
    updated_by: Option<String>,
    approved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    role_ids: Vec<String>,
    created_by: String,
    updated_by: Option<String>,
    approved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, id: Uuid, roles: Vec<Role>) -> User {
        User {
            id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            roles,
            created_by: self.created_by,
            updated_by: self.updated_by,
            approved: self.approved,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl UserRowWithId {
    fn into_user(self, id: Uuid, roles: Vec<Role>) -> User {
        User {
            id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            roles,
            created_by: self.created_by,
            updated_by: self.updated_by,
            approved: self.approved,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

async fn load_roles<C: Connection>(
    db: &Surreal<C>,
    ids: &[String],
) -> Result<Vec<Role>, DbError> {
    let mut roles = Vec::with_capacity(ids.len());
    for id in ids {
        roles.push(fetch_role(db, id).await?);
    }
    Ok(roles)
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: NewUser) -> RosterResult<User> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let role_ids: Vec<String> = input.roles.iter().map(|r| r.id.to_string()).collect();

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 username = $username, \
                 first_name = $first_name, last_name = $last_name, \
                 email = $email, \
                 role_ids = $role_ids, \
                 created_by = $created_by, updated_by = $updated_by, \
                 approved = false",
            )
            .bind(("id", id_str.clone()))
            .bind(("username", input.username))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("email", input.email))
            .bind(("role_ids", role_ids))
            .bind(("created_by", input.created_by))
            .bind(("updated_by", input.updated_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| {
            DbError::Query(format!("create returned no rows for user {id_str}"))
        })?;

        Ok(row.into_user(id, input.roles))
    }

    async fn find_by_id(&self, id: Uuid) -> RosterResult<Option<User>> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let roles = load_roles(&self.db, &row.role_ids).await?;
        Ok(Some(row.into_user(id, roles)))
    }

    async fn find_by_username(&self, username: &str) -> RosterResult<Option<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE username = $username",
            )
            .bind(("username", username.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };

        let id = Uuid::parse_str(&row.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid UUID: {e}")))?;
        let roles = load_roles(&self.db, &row.role_ids).await?;
        Ok(Some(row.into_user(id, roles)))
    }

    // UPSERT so that a record deleted by a removal can be re-created
    // when the removal's audit write fails and must be compensated.
    async fn save(&self, user: &User) -> RosterResult<User> {
        let id_str = user.id.to_string();
        let role_ids: Vec<String> = user.roles.iter().map(|r| r.id.to_string()).collect();

        let result = self
            .db
            .query(
                "UPSERT type::record('user', $id) SET \
                 username = $username, \
                 first_name = $first_name, last_name = $last_name, \
                 email = $email, \
                 role_ids = $role_ids, \
                 created_by = $created_by, updated_by = $updated_by, \
                 approved = $approved, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("username", user.username.clone()))
            .bind(("first_name", user.first_name.clone()))
            .bind(("last_name", user.last_name.clone()))
            .bind(("email", user.email.clone()))
            .bind(("role_ids", role_ids))
            .bind(("created_by", user.created_by.clone()))
            .bind(("updated_by", user.updated_by.clone()))
            .bind(("approved", user.approved))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| {
            DbError::Query(format!("save returned no rows for user {id_str}"))
        })?;

        Ok(row.into_user(user.id, user.roles.clone()))
    }

    async fn delete(&self, id: Uuid) -> RosterResult<()> {
        self.db
            .query("DELETE type::record('user', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self) -> RosterResult<Vec<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            let id = Uuid::parse_str(&row.record_id)
                .map_err(|e| DbError::Corrupt(format!("invalid UUID: {e}")))?;
            let roles = load_roles(&self.db, &row.role_ids).await?;
            users.push(row.into_user(id, roles));
        }

        Ok(users)
    }
}
