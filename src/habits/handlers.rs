use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::habits::dto::{CreateHabitRequest, HabitView, UpdateHabitRequest};
use crate::habits::repo::Habit;
use crate::response::{ApiOk, NoContent};
use crate::state::AppState;

pub fn habit_routes() -> Router<AppState> {
    Router::new()
        .route("/habits-list", get(list_all_habits))
        .route("/habits", get(list_own_habits))
        .route("/habits/create", post(create_habit))
        .route(
            "/habits/:habit_id",
            get(get_habit).put(update_habit).delete(delete_habit),
        )
}

/// Overview listing across all owners. Authenticated, but deliberately not
/// owner-scoped, unlike every other habit endpoint.
#[instrument(skip(state))]
pub async fn list_all_habits(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<ApiOk<Vec<HabitView>>, ApiError> {
    let habits = Habit::list_all(&state.db).await?;
    let items = habits.into_iter().map(HabitView::from).collect();
    Ok(ApiOk(StatusCode::OK, "Habits fetched", items))
}

#[instrument(skip(state))]
pub async fn list_own_habits(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<ApiOk<Vec<HabitView>>, ApiError> {
    let habits = Habit::list_by_owner(&state.db, user_id).await?;
    let items = habits.into_iter().map(HabitView::from).collect();
    Ok(ApiOk(StatusCode::OK, "Your habits fetched", items))
}

/// Owner is always the authenticated caller; any owner field in the payload
/// is ignored.
#[instrument(skip(state, payload))]
pub async fn create_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<ApiOk<HabitView>, ApiError> {
    let (name, frequency) = payload.validate().map_err(|e| {
        warn!(user_id = %user_id, "habit creation rejected");
        e
    })?;

    let habit = Habit::create(
        &state.db,
        user_id,
        &name,
        payload.description.as_deref(),
        &frequency,
        payload.time,
    )
    .await?;

    info!(user_id = %user_id, habit_id = %habit.id, "habit created");
    Ok(ApiOk(StatusCode::CREATED, "Habit created", habit.into()))
}

#[instrument(skip(state))]
pub async fn get_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(habit_id): Path<Uuid>,
) -> Result<ApiOk<HabitView>, ApiError> {
    let habit = Habit::find_owned(&state.db, user_id, habit_id)
        .await?
        .ok_or(ApiError::NotFound("Habit"))?;
    Ok(ApiOk(StatusCode::OK, "Habit fetched", habit.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(habit_id): Path<Uuid>,
    Json(payload): Json<UpdateHabitRequest>,
) -> Result<ApiOk<HabitView>, ApiError> {
    let payload = payload.validate().map_err(|e| {
        warn!(user_id = %user_id, habit_id = %habit_id, "habit update rejected");
        e
    })?;

    let Some(habit) = Habit::merge_update(&state.db, user_id, habit_id, &payload).await? else {
        warn!(user_id = %user_id, habit_id = %habit_id, "habit update missed");
        return Err(ApiError::NotFound("Habit"));
    };

    info!(user_id = %user_id, habit_id = %habit_id, "habit updated");
    Ok(ApiOk(StatusCode::OK, "Habit updated", habit.into()))
}

#[instrument(skip(state))]
pub async fn delete_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(habit_id): Path<Uuid>,
) -> Result<NoContent, ApiError> {
    if !Habit::delete_owned(&state.db, user_id, habit_id).await? {
        warn!(user_id = %user_id, habit_id = %habit_id, "habit delete missed");
        return Err(ApiError::NotFound("Habit"));
    }

    info!(user_id = %user_id, habit_id = %habit_id, "habit deleted");
    Ok(NoContent)
}
