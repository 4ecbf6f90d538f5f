use sanctuary_core::db::open_db_in_memory;
use sanctuary_core::model::user::NewUser;
use sanctuary_core::repo::user_repo::SqliteUserRepository;
use sanctuary_core::service::user_service::UserService;
use sanctuary_core::{Role, ServiceError};

#[test]
fn bootstrap_creates_one_admin_then_closes() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let id = service
        .bootstrap_admin(" Director@Example.org ", "Director")
        .unwrap();
    let admin = service.get_user(id).unwrap().unwrap();
    assert_eq!(admin.email, "director@example.org");
    assert_eq!(admin.role, Role::Admin);

    let err = service
        .bootstrap_admin("someone@example.org", "Someone")
        .unwrap_err();
    assert!(matches!(err, ServiceError::BootstrapClosed));
    assert_eq!(service.list_users().unwrap().len(), 1);
}

#[test]
fn resolved_admin_can_manage_accounts() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    service
        .bootstrap_admin("director@example.org", "Director")
        .unwrap();

    let admin_ctx = service.resolve_principal("DIRECTOR@example.org").unwrap();
    assert_eq!(admin_ctx.principal().map(|p| p.role), Some(Role::Admin));

    let editor_id = service
        .create_user(
            &admin_ctx,
            &NewUser::new("keeper@example.org", "Keeper", Role::Editor),
        )
        .unwrap();
    let duplicate = service
        .create_user(
            &admin_ctx,
            &NewUser::new("Keeper@example.org", "Other", Role::Editor),
        )
        .unwrap_err();
    assert!(matches!(duplicate, ServiceError::DuplicateEmail(_)));

    let editor_ctx = service.resolve_principal("keeper@example.org").unwrap();
    let denied = service
        .create_user(
            &editor_ctx,
            &NewUser::new("intern@example.org", "Intern", Role::Editor),
        )
        .unwrap_err();
    assert!(matches!(
        denied,
        ServiceError::PermissionDenied {
            required: Role::Admin
        }
    ));
    assert!(matches!(
        service.set_user_role(&editor_ctx, editor_id, Role::Admin),
        Err(ServiceError::PermissionDenied { .. })
    ));

    service
        .set_user_role(&admin_ctx, editor_id, Role::Admin)
        .unwrap();
    let promoted = service
        .find_user_by_email("keeper@example.org")
        .unwrap()
        .unwrap();
    assert_eq!(promoted.role, Role::Admin);
}

#[test]
fn unknown_login_cannot_be_resolved() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let err = service.resolve_principal("ghost@example.org").unwrap_err();
    assert!(matches!(err, ServiceError::UnknownUser(ref email) if email == "ghost@example.org"));
    assert_eq!(err.code(), "unknown_user");
}

#[test]
fn set_role_on_missing_user_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    service
        .bootstrap_admin("director@example.org", "Director")
        .unwrap();
    let admin_ctx = service.resolve_principal("director@example.org").unwrap();

    let err = service
        .set_user_role(&admin_ctx, uuid::Uuid::new_v4(), Role::Editor)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "user", .. }));
}

#[test]
fn bootstrap_rejects_malformed_email() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let err = service.bootstrap_admin("not-an-email", "Director").unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(service.list_users().unwrap().is_empty());
}

#[test]
fn deserialized_mixed_case_email_is_stored_normalized() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    service
        .bootstrap_admin("director@example.org", "Director")
        .unwrap();
    let admin_ctx = service.resolve_principal("director@example.org").unwrap();

    let draft: NewUser = serde_json::from_value(serde_json::json!({
        "email": " Ops@Example.org ",
        "display_name": "Operations",
        "role": "editor"
    }))
    .unwrap();
    let id = service.create_user(&admin_ctx, &draft).unwrap();

    let stored = service.get_user(id).unwrap().unwrap();
    assert_eq!(stored.email, "ops@example.org");
    assert!(service.resolve_principal("OPS@example.org").is_ok());

    let duplicate = service
        .create_user(
            &admin_ctx,
            &NewUser::new("ops@example.org", "Ops Again", Role::Editor),
        )
        .unwrap_err();
    assert!(matches!(
        duplicate,
        ServiceError::DuplicateEmail(ref email) if email == "ops@example.org"
    ));
    assert_eq!(service.list_users().unwrap().len(), 2);
}
