//! Integration tests for the user lifecycle service.

use std::collections::BTreeSet;

use roster_core::error::RosterError;
use roster_core::models::audit::AuditAction;
use roster_core::models::role::NewRole;
use roster_core::repository::{AuditLogRepository, RoleStore, UserRepository};
use roster_db::repository::{SurrealAuditLogRepository, SurrealRoleStore, SurrealUserRepository};
use roster_service::access::{ADMIN, USER};
use roster_service::{Actor, CreateUserInput, UpdateUserInput, UserService};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;
type Service =
    UserService<SurrealUserRepository<Db>, SurrealRoleStore<Db>, SurrealAuditLogRepository<Db>>;

/// Spin up in-memory DB, run migrations, seed the ROLE_USER and
/// ROLE_ADMIN domain roles.
async fn setup() -> (
    Service,
    SurrealUserRepository<Db>,
    SurrealAuditLogRepository<Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    roster_db::run_migrations(&db).await.unwrap();

    let roles = SurrealRoleStore::new(db.clone());
    for name in ["ROLE_USER", "ROLE_ADMIN"] {
        roles.create(NewRole { name: name.into() }).await.unwrap();
    }

    let users = SurrealUserRepository::new(db.clone());
    let audit = SurrealAuditLogRepository::new(db.clone());
    let service = UserService::new(users.clone(), roles, audit.clone());

    (service, users, audit)
}

fn admin() -> Actor {
    Actor::new("admin", [ADMIN])
}

fn plain_user(name: &str) -> Actor {
    Actor::new(name, [USER])
}

fn alice_input() -> CreateUserInput {
    CreateUserInput {
        username: "alice".into(),
        first_name: "Alice".into(),
        last_name: "Smith".into(),
        email: "alice@example.com".into(),
        roles: BTreeSet::from(["ROLE_USER".to_string()]),
        created_by: Some("admin".into()),
        updated_by: None,
    }
}

/// Seed a user record so that approver/remover existence checks can
/// resolve the acting admin.
async fn seed_admin_record(service: &Service) {
    service
        .create_user(
            CreateUserInput {
                username: "admin".into(),
                first_name: String::new(),
                last_name: String::new(),
                email: "admin@example.com".into(),
                roles: BTreeSet::new(),
                created_by: Some("system".into()),
                updated_by: None,
            },
            &admin(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn create_user_starts_unapproved_and_is_audited() {
    let (service, _users, audit) = setup().await;

    let view = service.create_user(alice_input(), &admin()).await.unwrap();

    assert_eq!(view.username, "alice");
    assert!(!view.approved);
    assert_eq!(view.roles, BTreeSet::from(["ROLE_USER".to_string()]));

    let entries = audit.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::CreateUser);
    assert_eq!(entries[0].performed_by, "admin");
    assert_eq!(entries[0].user_id, view.id);
    assert!(entries[0].details.contains("alice"));
}

#[tokio::test]
async fn create_user_empty_username_rejected() {
    let (service, _, _) = setup().await;

    let mut input = alice_input();
    input.username = String::new();

    let err = service.create_user(input, &admin()).await.unwrap_err();
    match err {
        RosterError::Validation { message } => {
            assert_eq!(message, "Username cannot be empty");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn create_user_null_created_by_rejected() {
    let (service, _, _) = setup().await;

    let mut input = alice_input();
    input.created_by = None;

    let err = service.create_user(input, &admin()).await.unwrap_err();
    match err {
        RosterError::Validation { message } => {
            assert_eq!(message, "CreatedBy cannot be null");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn create_user_unknown_role_is_not_persisted() {
    let (service, users, audit) = setup().await;

    let mut input = alice_input();
    input.roles.insert("ROLE_GHOST".into());

    let err = service.create_user(input, &admin()).await.unwrap_err();
    assert_eq!(err.to_string(), "Role not found: ROLE_GHOST");

    // No partial user record and no audit entry may exist afterward.
    assert!(users.find_by_username("alice").await.unwrap().is_none());
    assert!(audit.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_user_requires_admin_role() {
    let (service, _, _) = setup().await;

    let err = service
        .create_user(alice_input(), &plain_user("bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::AccessDenied { .. }));
}

#[tokio::test]
async fn assign_roles_unions_with_existing_set() {
    let (service, _, audit) = setup().await;
    let view = service.create_user(alice_input(), &admin()).await.unwrap();

    let view = service
        .assign_roles(
            view.id,
            BTreeSet::from(["ROLE_ADMIN".to_string()]),
            &admin(),
        )
        .await
        .unwrap();

    assert_eq!(
        view.roles,
        BTreeSet::from(["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()])
    );

    // Re-assigning an attached role is a no-op.
    let view = service
        .assign_roles(view.id, BTreeSet::from(["ROLE_USER".to_string()]), &admin())
        .await
        .unwrap();
    assert_eq!(view.roles.len(), 2);

    let assigns: Vec<_> = audit
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.action == AuditAction::AssignRoles)
        .collect();
    assert_eq!(assigns.len(), 2);
}

#[tokio::test]
async fn assign_roles_to_unknown_user_fails() {
    let (service, _, _) = setup().await;
    let missing = Uuid::new_v4();

    let err = service
        .assign_roles(missing, BTreeSet::from(["ROLE_USER".to_string()]), &admin())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), format!("User not found: {missing}"));
}

#[tokio::test]
async fn approve_is_one_way_and_rejects_reapproval() {
    let (service, _, audit) = setup().await;
    seed_admin_record(&service).await;
    let view = service.create_user(alice_input(), &admin()).await.unwrap();

    let approved = service.approve_user(view.id, &admin()).await.unwrap();
    assert!(approved.approved);

    let err = service.approve_user(view.id, &admin()).await.unwrap_err();
    match err {
        RosterError::Validation { message } => {
            assert_eq!(message, "User is already approved.");
        }
        other => panic!("expected Validation, got {other:?}"),
    }

    let approvals: Vec<_> = audit
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.action == AuditAction::ApproveUser)
        .collect();
    assert_eq!(approvals.len(), 1);
}

#[tokio::test]
async fn approve_requires_existing_approver() {
    let (service, _, _) = setup().await;
    let view = service.create_user(alice_input(), &admin()).await.unwrap();

    // "ghost" holds the ADMIN security role but has no user record.
    let err = service
        .approve_user(view.id, &Actor::new("ghost", [ADMIN]))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Approver not found: ghost");
}

#[tokio::test]
async fn update_by_creator_before_approval_succeeds() {
    let (service, _, audit) = setup().await;
    let view = service.create_user(alice_input(), &admin()).await.unwrap();

    let updated = service
        .update_user(
            view.id,
            UpdateUserInput {
                first_name: "Alicia".into(),
                last_name: "Smythe".into(),
                email: "alicia@example.com".into(),
            },
            &admin(),
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Alicia");
    assert_eq!(updated.last_name, "Smythe");
    assert_eq!(updated.email, "alicia@example.com");
    // Username, approval state, and roles are untouched by this path.
    assert_eq!(updated.username, "alice");
    assert!(!updated.approved);
    assert_eq!(updated.roles, view.roles);

    let updates: Vec<_> = audit
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.action == AuditAction::UpdateUser)
        .collect();
    assert_eq!(updates.len(), 1);
}

#[tokio::test]
async fn update_by_non_creator_denied() {
    let (service, _, _) = setup().await;
    let view = service.create_user(alice_input(), &admin()).await.unwrap();

    let err = service
        .update_user(
            view.id,
            UpdateUserInput {
                first_name: "Mallory".into(),
                last_name: String::new(),
                email: String::new(),
            },
            &plain_user("bob"),
        )
        .await
        .unwrap_err();

    match err {
        RosterError::AccessDenied { reason } => {
            assert_eq!(reason, "Only the creator can update the user before approval.");
        }
        other => panic!("expected AccessDenied, got {other:?}"),
    }
}

#[tokio::test]
async fn update_after_approval_denied_even_for_creator() {
    let (service, _, _) = setup().await;
    seed_admin_record(&service).await;
    let view = service.create_user(alice_input(), &admin()).await.unwrap();
    service.approve_user(view.id, &admin()).await.unwrap();

    let err = service
        .update_user(
            view.id,
            UpdateUserInput {
                first_name: "Alicia".into(),
                last_name: String::new(),
                email: String::new(),
            },
            &admin(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::AccessDenied { .. }));
}

#[tokio::test]
async fn remove_user_is_physical_and_audited() {
    let (service, users, audit) = setup().await;
    seed_admin_record(&service).await;
    let view = service.create_user(alice_input(), &admin()).await.unwrap();

    service.remove_user(view.id, &admin()).await.unwrap();

    assert!(users.find_by_id(view.id).await.unwrap().is_none());
    let err = service
        .get_user_profile("alice", &admin())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User not found: alice");

    // The audit entry outlives the record it references.
    let removals: Vec<_> = audit
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.action == AuditAction::RemoveUser)
        .collect();
    assert_eq!(removals.len(), 1);
    assert_eq!(removals[0].user_id, view.id);
}

#[tokio::test]
async fn remove_requires_existing_remover() {
    let (service, users, _) = setup().await;
    let view = service.create_user(alice_input(), &admin()).await.unwrap();

    let err = service
        .remove_user(view.id, &Actor::new("ghost", [ADMIN]))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Remover not found: ghost");

    // Nothing was deleted.
    assert!(users.find_by_id(view.id).await.unwrap().is_some());
}

#[tokio::test]
async fn list_users_in_insertion_order() {
    let (service, _, _) = setup().await;

    for name in ["carol", "dave", "erin"] {
        let mut input = alice_input();
        input.username = name.into();
        input.email = format!("{name}@example.com");
        service.create_user(input, &admin()).await.unwrap();
    }

    let names: Vec<String> = service
        .list_users(&plain_user("bob"))
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.username)
        .collect();

    assert_eq!(names, ["carol", "dave", "erin"]);
}

#[tokio::test]
async fn profile_of_unknown_user_not_found() {
    let (service, _, _) = setup().await;

    let err = service
        .get_user_profile("nobody", &plain_user("bob"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User not found: nobody");
}
