use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::auth::dto::{LoginRequest, RefreshRequest, RegisterRequest, SessionData, UserView};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::User;
use crate::error::{ApiError, FieldErrors};
use crate::profile::repo::Profile;
use crate::response::ApiOk;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Creates the account and its profile in one transaction: both rows commit
/// or neither does.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<ApiOk<UserView>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let mut errors = FieldErrors::default();
    if !is_valid_email(&payload.email) {
        errors.insert("email", "Enter a valid email address");
    }
    if payload.password.len() < 8 {
        errors.insert("password", "Password must be at least 8 characters");
    }
    if let Some(confirm) = &payload.confirm_password {
        if confirm != &payload.password {
            errors.insert("confirmPassword", "Passwords don't match");
        }
    }
    payload.profile.validate_into(&mut errors);
    if !errors.is_empty() {
        warn!(email = %payload.email, "registration rejected");
    }
    errors.into_result()?;

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Validation(FieldErrors::one(
            "email",
            "A user with this email already exists",
        )));
    }

    let hash = hash_password(&payload.password)?;

    let mut tx = state.db.begin().await?;
    let user = User::create(&mut tx, &payload.email, &hash).await?;
    let profile = Profile::create(&mut tx, user.id, &payload.profile).await?;
    tx.commit().await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(ApiOk(
        StatusCode::CREATED,
        "User registered",
        UserView::new(user, profile),
    ))
}

/// Unknown username and wrong password return the same 401 so identifiers
/// cannot be enumerated.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<ApiOk<SessionData>, ApiError> {
    payload.username = payload.username.trim().to_lowercase();

    let Some(user) = User::find_by_email(&state.db, &payload.username).await? else {
        warn!(username = %payload.username, "login unknown username");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let access = keys.sign_access(user.id)?;
    let refresh = keys.sign_refresh(user.id)?;

    let profile = Profile::find_by_user(&state.db, user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile missing for user {}", user.id))?;

    info!(user_id = %user.id, "user logged in");
    Ok(ApiOk(
        StatusCode::OK,
        "Login successful",
        SessionData {
            refresh,
            access,
            user: UserView::new(user, profile),
        },
    ))
}

/// Exchanges a valid refresh token for a fresh pair.
#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<ApiOk<SessionData>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh).map_err(|_| {
        warn!("invalid refresh token");
        ApiError::Unauthorized("Invalid or expired refresh token".into())
    })?;

    let access = keys.sign_access(claims.sub)?;
    let refresh = keys.sign_refresh(claims.sub)?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;
    let profile = Profile::find_by_user(&state.db, user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile missing for user {}", user.id))?;

    info!(user_id = %user.id, "token refreshed");
    Ok(ApiOk(
        StatusCode::OK,
        "Token refreshed",
        SessionData {
            refresh,
            access,
            user: UserView::new(user, profile),
        },
    ))
}
