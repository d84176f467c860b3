//! Integration tests for the User repository using in-memory SurrealDB.

use chrono::{DateTime, Utc};
use hotelhub_core::error::HubError;
use hotelhub_core::models::token::{Token, TokenValidationInfo};
use hotelhub_core::models::user::{PasswordValidationInfo, Role};
use hotelhub_core::repository::{TokenRepository, UserRepository};
use hotelhub_db::repository::{SurrealTokenRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hotelhub_db::run_migrations(&db).await.unwrap();
    db
}

fn stub_validation() -> PasswordValidationInfo {
    // Never verified in these tests; any opaque blob will do.
    PasswordValidationInfo("$argon2id$v=19$m=19456,t=2,p=1$stub$stub".into())
}

#[tokio::test]
async fn create_and_get_by_username() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let id = repo
        .create("alice", "alice@example.com", &stub_validation(), Role::Member)
        .await
        .unwrap();
    assert!(id >= 1);

    let user = repo.get_by_username("alice").await.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Role::Member);
    assert_eq!(user.password_validation, stub_validation());
}

#[tokio::test]
async fn generated_ids_increase() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let first = repo
        .create("alice", "alice@example.com", &stub_validation(), Role::Member)
        .await
        .unwrap();
    let second = repo
        .create("bob", "bob@example.com", &stub_validation(), Role::Admin)
        .await
        .unwrap();

    assert!(second > first);
}

#[tokio::test]
async fn duplicate_username_rejected() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create("carol", "first@example.com", &stub_validation(), Role::Member)
        .await
        .unwrap();

    let err = repo
        .create("carol", "second@example.com", &stub_validation(), Role::Member)
        .await
        .unwrap_err();

    assert!(
        matches!(err, HubError::AlreadyExists { .. }),
        "expected AlreadyExists, got: {err:?}"
    );
}

#[tokio::test]
async fn username_lookup_is_case_sensitive() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create("Dave", "dave@example.com", &stub_validation(), Role::Member)
        .await
        .unwrap();

    let err = repo.get_by_username("dave").await.unwrap_err();
    assert!(matches!(err, HubError::NotFound { .. }));

    assert!(repo.get_by_username("Dave").await.is_ok());
}

#[tokio::test]
async fn missing_user_not_found() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let err = repo.get_by_username("nobody").await.unwrap_err();
    assert!(matches!(err, HubError::NotFound { .. }));
}

#[tokio::test]
async fn exists_checks() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let id = repo
        .create("eve", "eve@example.com", &stub_validation(), Role::Member)
        .await
        .unwrap();

    assert!(repo.exists_by_username("eve").await.unwrap());
    assert!(!repo.exists_by_username("nobody").await.unwrap());
    assert!(repo.exists_by_id(id).await.unwrap());
    assert!(!repo.exists_by_id(id + 1000).await.unwrap());
}

#[tokio::test]
async fn delete_all_wipes_users_and_tokens() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    let tokens = SurrealTokenRepository::new(db);

    let id = users
        .create("frank", "frank@example.com", &stub_validation(), Role::Member)
        .await
        .unwrap();

    let now: DateTime<Utc> = DateTime::from_timestamp(1_000, 0).unwrap();
    let token = Token {
        validation: TokenValidationInfo("tv-frank".into()),
        user_id: id,
        created_at: now,
        last_used_at: now,
    };
    tokens.create(&token, 3).await.unwrap();

    users.delete_all().await.unwrap();

    assert!(!users.exists_by_username("frank").await.unwrap());
    let err = tokens.get_by_validation(&token.validation).await.unwrap_err();
    assert!(matches!(err, HubError::NotFound { .. }));
}
