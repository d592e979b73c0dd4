//! Postgres-backed tests for the registration and ownership properties that
//! live in the SQL paths. Ignored by default; run against a disposable
//! database with `DATABASE_URL=... cargo test -- --ignored`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::auth::dto::{LoginRequest, RegisterRequest};
use crate::auth::handlers::{login, register};
use crate::auth::AuthUser;
use crate::config::{AppConfig, JwtConfig};
use crate::error::ApiError;
use crate::habits::dto::{CreateHabitRequest, UpdateHabitRequest};
use crate::habits::handlers::{create_habit, delete_habit, get_habit, update_habit};
use crate::profile::dto::ProfileInput;
use crate::profile::handlers::{get_profile, update_profile};
use crate::response::ApiOk;
use crate::state::AppState;

async fn test_state() -> AppState {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("./migrations").run(&db).await.expect("migrate");
    AppState {
        db,
        config: Arc::new(AppConfig {
            database_url: url,
            jwt: JwtConfig {
                secret: "db-test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
        }),
    }
}

fn unique_email() -> String {
    format!("{}@example.com", Uuid::new_v4().simple())
}

fn register_request(email: &str, profile: ProfileInput) -> RegisterRequest {
    RegisterRequest {
        email: email.into(),
        password: "longenough".into(),
        confirm_password: Some("longenough".into()),
        profile,
    }
}

async fn register_user(state: &AppState, email: &str, profile: ProfileInput) -> Uuid {
    let ApiOk(_, _, user) = register(State(state.clone()), Json(register_request(email, profile)))
        .await
        .expect("register");
    user.id
}

async fn create_run_habit(state: &AppState, owner: Uuid) -> Uuid {
    let request = CreateHabitRequest {
        name: Some("Run".into()),
        description: None,
        frequency: Some("daily".into()),
        time: None,
    };
    let ApiOk(_, _, habit) = create_habit(State(state.clone()), AuthUser(owner), Json(request))
        .await
        .expect("create habit");
    habit.id
}

#[tokio::test]
#[ignore = "requires a running Postgres; set DATABASE_URL"]
async fn duplicate_registration_fails_and_first_account_survives() {
    let state = test_state().await;
    let email = unique_email();
    register_user(&state, &email, ProfileInput::default()).await;

    let err = register(
        State(state.clone()),
        Json(register_request(&email, ProfileInput::default())),
    )
    .await
    .unwrap_err();
    let ApiError::Validation(fields) = err else {
        panic!("expected validation error");
    };
    let json = serde_json::to_value(&fields).unwrap();
    assert!(json["email"].as_str().unwrap().contains("already exists"));

    // First account still logs in.
    let login_ok = login(
        State(state),
        Json(LoginRequest {
            username: email,
            password: "longenough".into(),
        }),
    )
    .await;
    assert!(login_ok.is_ok());
}

#[tokio::test]
#[ignore = "requires a running Postgres; set DATABASE_URL"]
async fn register_login_roundtrip_preserves_primary_goal() {
    let state = test_state().await;
    let email = unique_email();
    let profile = ProfileInput {
        primary_goal: Some("Weight Loss".into()),
        ..Default::default()
    };
    let user_id = register_user(&state, &email, profile).await;

    let ApiOk(_, _, session) = login(
        State(state.clone()),
        Json(LoginRequest {
            username: email.clone(),
            password: "longenough".into(),
        }),
    )
    .await
    .expect("login");
    assert_eq!(session.user.email, email);

    let ApiOk(_, _, view) = get_profile(State(state), AuthUser(user_id))
        .await
        .expect("get profile");
    assert_eq!(view.profile.primary_goal.as_deref(), Some("Weight Loss"));
}

#[tokio::test]
#[ignore = "requires a running Postgres; set DATABASE_URL"]
async fn partial_profile_update_merges_and_is_idempotent() {
    let state = test_state().await;
    let seeded = ProfileInput {
        name: Some("Ada".into()),
        primary_goal: Some("Muscle Gain".into()),
        ..Default::default()
    };
    let user_id = register_user(&state, &unique_email(), seeded).await;

    let patch = || ProfileInput {
        age: Some(30),
        ..Default::default()
    };

    let ApiOk(_, _, first) = update_profile(State(state.clone()), AuthUser(user_id), Json(patch()))
        .await
        .expect("update");
    assert_eq!(first.profile.age, Some(30));
    assert_eq!(first.profile.name.as_deref(), Some("Ada"));
    assert_eq!(first.profile.primary_goal.as_deref(), Some("Muscle Gain"));

    // Applying the same partial update again changes nothing.
    let ApiOk(_, _, second) = update_profile(State(state), AuthUser(user_id), Json(patch()))
        .await
        .expect("update again");
    assert_eq!(second.profile.age, first.profile.age);
    assert_eq!(second.profile.name, first.profile.name);
    assert_eq!(second.profile.primary_goal, first.profile.primary_goal);
}

#[tokio::test]
#[ignore = "requires a running Postgres; set DATABASE_URL"]
async fn cross_owner_update_is_uniform_not_found() {
    let state = test_state().await;
    let owner = register_user(&state, &unique_email(), ProfileInput::default()).await;
    let other = register_user(&state, &unique_email(), ProfileInput::default()).await;
    let habit_id = create_run_habit(&state, owner).await;

    let err = update_habit(
        State(state.clone()),
        AuthUser(other),
        Path(habit_id),
        Json(UpdateHabitRequest {
            name: Some("Stolen".into()),
            ..Default::default()
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // The owner's habit is untouched.
    let ApiOk(_, _, mine) = get_habit(State(state), AuthUser(owner), Path(habit_id))
        .await
        .expect("owner fetch");
    assert_eq!(mine.name, "Run");
}

#[tokio::test]
#[ignore = "requires a running Postgres; set DATABASE_URL"]
async fn delete_is_uniform_not_found_once_gone() {
    let state = test_state().await;
    let owner = register_user(&state, &unique_email(), ProfileInput::default()).await;
    let habit_id = create_run_habit(&state, owner).await;

    assert!(
        delete_habit(State(state.clone()), AuthUser(owner), Path(habit_id))
            .await
            .is_ok()
    );

    // Every further delete of the same id is a plain 404, no crash.
    for _ in 0..2 {
        let err = delete_habit(State(state.clone()), AuthUser(owner), Path(habit_id))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
