//! Application assembly tests.
//!
//! Every instance gets its own in-memory SQLite database, so tests run in
//! parallel without sharing state.

use common::{AppError, DatabaseConfig, Profile};
use directory_lib::fixtures::bundled_feed;
use domain::{Password, SEED_USER_EMAIL, SEED_USER_PASSWORD};
use web_lib::constants::{ENV_DATABASE_MAX_CONNECTIONS, ENV_DATABASE_URL, ENV_SECRET_KEY};
use web_lib::{AppConfig, Application};

async fn testing_app() -> Application {
    Application::build("testing").await.expect("testing profile builds")
}

// =============================================================================
// Profiles
// =============================================================================

#[tokio::test]
async fn test_testing_profile_seeds_exactly_one_user() {
    let app = testing_app().await;
    let state = app.state();

    assert_eq!(app.profile(), Profile::Testing);
    assert_eq!(state.directory.count().await.unwrap(), 1);

    let user = state
        .directory
        .find_by_email(SEED_USER_EMAIL)
        .await
        .unwrap()
        .expect("seed user exists");
    assert!(user.verify_password(SEED_USER_PASSWORD));
}

#[tokio::test]
async fn test_testing_profile_seeds_feed() {
    let app = testing_app().await;
    let expected = bundled_feed().unwrap();

    let report = app.seed_report().expect("testing profile seeds");
    assert_eq!(report.space_objects, expected.len());

    let stored = app.state().space_objects.list().await.unwrap();
    assert_eq!(stored, expected);
}

#[tokio::test]
async fn test_unknown_profile_is_configuration_error() {
    for name in ["unknown_profile_name", "", "Testing"] {
        let result = Application::build(name).await;
        assert!(
            matches!(result, Err(AppError::Configuration(_))),
            "profile {:?} should be rejected",
            name
        );
    }
}

#[tokio::test]
async fn test_non_testing_profiles_do_not_seed() {
    let lookup = |key: &str| match key {
        ENV_DATABASE_URL => Some("sqlite::memory:".to_string()),
        ENV_DATABASE_MAX_CONNECTIONS => Some("1".to_string()),
        ENV_SECRET_KEY => Some("docker-secret-key-long-enough-for-hs256".to_string()),
        _ => None,
    };
    let config = AppConfig::from_lookup(Profile::Docker, lookup).unwrap();

    let app = Application::from_config(config).await.unwrap();

    assert_eq!(app.profile(), Profile::Docker);
    assert!(app.config().session.secure_cookies);
    assert!(app.seed_report().is_none());
    assert_eq!(app.state().directory.count().await.unwrap(), 0);
    assert_eq!(app.state().space_objects.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unreachable_storage_is_storage_initialization_error() {
    let mut config = AppConfig::from_lookup(Profile::Testing, |_| None).unwrap();
    config.database = DatabaseConfig {
        url: "sqlite:///definitely/missing/dir/astrododge.db?mode=rw".to_string(),
        max_connections: 1,
        min_connections: 1,
        idle_timeout_secs: None,
        max_lifetime_secs: None,
    };

    let result = Application::from_config(config).await;
    assert!(matches!(result, Err(AppError::StorageInitialization(_))));
}

#[tokio::test]
async fn test_instances_are_isolated() {
    let first = testing_app().await;
    let second = testing_app().await;

    let hash = Password::new("password1").unwrap().into_string();
    first
        .state()
        .directory
        .create("only-here@example.com".to_string(), hash)
        .await
        .unwrap();

    assert_eq!(first.state().directory.count().await.unwrap(), 2);
    assert_eq!(second.state().directory.count().await.unwrap(), 1);
}

// =============================================================================
// Session resolution
// =============================================================================

#[tokio::test]
async fn test_seed_user_token_resolves() {
    let app = testing_app().await;
    let state = app.state();
    let user = app.seed_report().unwrap().seed_user.clone();

    let token = state.authority.issue(&user).unwrap();

    assert_eq!(state.authority.resolve(&token).await.unwrap(), Some(user.clone()));
    assert_eq!(state.authority.resolve(&token).await.unwrap(), Some(user));
}

#[tokio::test]
async fn test_deleted_user_token_resolves_to_none() {
    let app = testing_app().await;
    let state = app.state();

    let hash = Password::new("password1").unwrap().into_string();
    let user = state
        .directory
        .create("short-lived@example.com".to_string(), hash)
        .await
        .unwrap();
    let token = state.authority.issue(&user).unwrap();

    state.directory.delete(user.id).await.unwrap();

    assert_eq!(state.authority.resolve(&token).await.unwrap(), None);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = testing_app().await;
    let hash = Password::new("password1").unwrap().into_string();

    let result = app
        .state()
        .directory
        .create(SEED_USER_EMAIL.to_string(), hash)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(app.state().directory.count().await.unwrap(), 1);
}
