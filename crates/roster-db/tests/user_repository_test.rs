//! Integration tests for the User repository using in-memory SurrealDB.

use roster_core::models::role::{NewRole, Role};
use roster_core::models::user::NewUser;
use roster_core::repository::{RoleStore, UserRepository};
use roster_db::repository::{SurrealRoleStore, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;

/// Spin up in-memory DB, run migrations, seed one role.
async fn setup() -> (SurrealUserRepository<Db>, Role) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    roster_db::run_migrations(&db).await.unwrap();

    let role = SurrealRoleStore::new(db.clone())
        .create(NewRole {
            name: "ROLE_USER".into(),
        })
        .await
        .unwrap();

    (SurrealUserRepository::new(db), role)
}

fn new_user(username: &str, roles: Vec<Role>) -> NewUser {
    NewUser {
        username: username.into(),
        first_name: "Test".into(),
        last_name: "User".into(),
        email: format!("{username}@example.com"),
        roles,
        created_by: "admin".into(),
        updated_by: None,
    }
}

#[tokio::test]
async fn create_and_find_by_id() {
    let (repo, role) = setup().await;

    let user = repo.create(new_user("alice", vec![role.clone()])).await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.created_by, "admin");
    assert!(!user.approved);
    assert_eq!(user.roles.len(), 1);

    let fetched = repo.find_by_id(user.id).await.unwrap().expect("user");
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.roles[0].id, role.id);
    assert_eq!(fetched.roles[0].name, "ROLE_USER");
}

#[tokio::test]
async fn find_by_username() {
    let (repo, role) = setup().await;

    let user = repo.create(new_user("bob", vec![role])).await.unwrap();

    let fetched = repo.find_by_username("bob").await.unwrap().expect("user");
    assert_eq!(fetched.id, user.id);
}

#[tokio::test]
async fn absent_records_return_none() {
    let (repo, _) = setup().await;

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn save_persists_in_place_mutations() {
    let (repo, role) = setup().await;

    let mut user = repo.create(new_user("carol", vec![])).await.unwrap();

    user.first_name = "Caroline".into();
    user.approved = true;
    user.updated_by = Some("admin".into());
    user.roles.push(role.clone());

    repo.save(&user).await.unwrap();

    let fetched = repo.find_by_id(user.id).await.unwrap().expect("user");
    assert_eq!(fetched.first_name, "Caroline");
    assert!(fetched.approved);
    assert_eq!(fetched.updated_by.as_deref(), Some("admin"));
    assert_eq!(fetched.roles.len(), 1);
    assert_eq!(fetched.roles[0].id, role.id);
    // Untouched fields survive the round-trip.
    assert_eq!(fetched.email, "carol@example.com");
}

#[tokio::test]
async fn delete_is_physical() {
    let (repo, _) = setup().await;

    let user = repo.create(new_user("dave", vec![])).await.unwrap();
    repo.delete(user.id).await.unwrap();

    assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    assert!(repo.find_by_username("dave").await.unwrap().is_none());
}

#[tokio::test]
async fn save_recreates_a_deleted_record() {
    let (repo, role) = setup().await;

    let user = repo.create(new_user("erin", vec![role])).await.unwrap();
    repo.delete(user.id).await.unwrap();

    // Compensation path: re-saving restores the record under the same id.
    repo.save(&user).await.unwrap();

    let fetched = repo.find_by_id(user.id).await.unwrap().expect("user");
    assert_eq!(fetched.username, "erin");
    assert_eq!(fetched.roles.len(), 1);
}

#[tokio::test]
async fn list_returns_insertion_order() {
    let (repo, _) = setup().await;

    for name in ["u-one", "u-two", "u-three"] {
        repo.create(new_user(name, vec![])).await.unwrap();
    }

    let names: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, ["u-one", "u-two", "u-three"]);
}

#[tokio::test]
async fn duplicate_username_rejected() {
    let (repo, _) = setup().await;

    repo.create(new_user("unique", vec![])).await.unwrap();

    let result = repo.create(new_user("unique", vec![])).await;
    assert!(result.is_err(), "duplicate username should be rejected");
}
