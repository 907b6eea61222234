mod common;

use std::sync::Arc;

use account_service::domain::account::errors::AccountError;
use account_service::domain::account::models::NewUser;
use account_service::domain::account::models::Username;
use account_service::domain::account::ports::UserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use common::TestApp;
use common::TestDb;
use reqwest::StatusCode;
use serde_json::json;

fn username(s: &str) -> Username {
    Username::new(s.to_string()).unwrap()
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: username(name),
        password_hash: "$argon2id$test_hash".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let created = repository.create(new_user("alice")).await.unwrap();
    assert_eq!(created.username, username("alice"));
    assert!(repository.exists(&username("alice")).await.unwrap());
    assert!(!repository.exists(&username("Alice")).await.unwrap());

    let found = repository
        .find_by_username(&username("alice"))
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash, created.password_hash);

    assert!(repository
        .find_by_username(&username("bob"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_duplicate_hits_unique_constraint() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());
    repository.create(new_user("alice")).await.unwrap();

    let result = repository.create(new_user("alice")).await;
    assert!(matches!(result, Err(AccountError::DuplicateUsername(_))));
}

#[tokio::test]
async fn test_concurrent_create_single_winner() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = Arc::new(PostgresUserRepository::new(db.pool.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repository = Arc::clone(&repository);
            tokio::spawn(async move { repository.create(new_user("alice")).await })
        })
        .collect();

    let mut created = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AccountError::DuplicateUsername(_)) => duplicates += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, 7);
}

#[tokio::test]
async fn test_rename_keeps_identity() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());
    let created = repository.create(new_user("alice")).await.unwrap();

    repository
        .rename(&username("alice"), &username("alicia"))
        .await
        .unwrap();

    assert!(!repository.exists(&username("alice")).await.unwrap());
    let renamed = repository
        .find_by_username(&username("alicia"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.id, created.id);
    assert_eq!(renamed.password_hash, created.password_hash);
}

#[tokio::test]
async fn test_rename_to_taken_username() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());
    repository.create(new_user("alice")).await.unwrap();
    repository.create(new_user("bob")).await.unwrap();

    let result = repository.rename(&username("alice"), &username("bob")).await;
    assert!(matches!(result, Err(AccountError::DuplicateUsername(_))));
    assert!(repository.exists(&username("alice")).await.unwrap());
}

#[tokio::test]
async fn test_rename_missing_user() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let result = repository
        .rename(&username("ghost"), &username("alicia"))
        .await;
    assert!(matches!(result, Err(AccountError::NotFound(_))));
}

#[tokio::test]
async fn test_concurrent_sign_up_over_postgres() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let app =
        TestApp::spawn_with_repository(Arc::new(PostgresUserRepository::new(db.pool.clone())))
            .await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            tokio::spawn(
                app.post("/signup")
                    .json(&json!({ "username": "alice", "password": "hunter22" }))
                    .send(),
            )
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        let response = handle
            .await
            .expect("Request task panicked")
            .expect("Failed to execute request");
        match response.status() {
            StatusCode::OK => ok += 1,
            StatusCode::BAD_REQUEST => {
                let body: serde_json::Value =
                    response.json().await.expect("Failed to parse response");
                assert_eq!(body, json!({ "error": "Username already taken" }));
            }
            status => panic!("unexpected status: {status}"),
        }
    }

    assert_eq!(ok, 1);
}
