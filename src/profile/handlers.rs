use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::dto::UserView;
use crate::auth::repo::User;
use crate::auth::AuthUser;
use crate::choices::ChoiceSets;
use crate::error::{ApiError, FieldErrors};
use crate::profile::dto::ProfileInput;
use crate::profile::repo::Profile;
use crate::response::ApiOk;
use crate::state::AppState;

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile/choices", get(profile_choices))
}

/// Returns the caller's own profile merged with the account identifier.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<ApiOk<UserView>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;
    let profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile missing for user {user_id}"))?;

    Ok(ApiOk(
        StatusCode::OK,
        "Profile fetched",
        UserView::new(user, profile),
    ))
}

/// Partial merge: only keys present in the payload overwrite stored values.
#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileInput>,
) -> Result<ApiOk<UserView>, ApiError> {
    let mut errors = FieldErrors::default();
    payload.validate_into(&mut errors);
    if !errors.is_empty() {
        warn!(user_id = %user_id, "profile update rejected");
    }
    errors.into_result()?;

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".into()))?;
    let profile = Profile::merge_update(&state.db, user_id, &payload)
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile missing for user {user_id}"))?;

    info!(user_id = %user_id, "profile updated");
    Ok(ApiOk(
        StatusCode::OK,
        "Profile updated",
        UserView::new(user, profile),
    ))
}

/// Static option sets for the dropdown fields. No auth required.
#[instrument]
pub async fn profile_choices() -> ApiOk<ChoiceSets> {
    ApiOk(StatusCode::OK, "Profile choices", ChoiceSets::current())
}
