use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::{OffsetDateTime, Time};
use uuid::Uuid;

use crate::profile::dto::ProfileInput;

/// One row per account, created together with it.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub fitness_level: Option<String>,
    pub motivation_level: Option<String>,
    pub notifications: bool,
    pub preferred_workout_time: Option<String>,
    pub primary_goal: Option<String>,
    pub sleep_time: Option<Time>,
    pub wake_up_time: Option<Time>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "user_id, name, age, gender, weight, height, fitness_level, \
     motivation_level, notifications, preferred_workout_time, primary_goal, \
     sleep_time, wake_up_time, created_at, updated_at";

impl Profile {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    /// Inserts inside the registration transaction; missing fields stay
    /// null (notifications defaults to true).
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> anyhow::Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (user_id, name, age, gender, weight, height,
                fitness_level, motivation_level, notifications,
                preferred_workout_time, primary_goal, sleep_time, wake_up_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, TRUE), $10, $11, $12, $13)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&input.name)
        .bind(input.age)
        .bind(&input.gender)
        .bind(input.weight)
        .bind(input.height)
        .bind(&input.fitness_level)
        .bind(&input.motivation_level)
        .bind(input.notifications)
        .bind(&input.preferred_workout_time)
        .bind(&input.primary_goal)
        .bind(input.sleep_time)
        .bind(input.wake_up_time)
        .fetch_one(&mut **tx)
        .await?;
        Ok(profile)
    }

    /// Partial merge as one atomic statement: absent fields bind NULL and
    /// COALESCE keeps the stored value, so concurrent merges cannot lose
    /// each other's untouched fields.
    pub async fn merge_update(
        db: &PgPool,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles SET
                name = COALESCE($2, name),
                age = COALESCE($3, age),
                gender = COALESCE($4, gender),
                weight = COALESCE($5, weight),
                height = COALESCE($6, height),
                fitness_level = COALESCE($7, fitness_level),
                motivation_level = COALESCE($8, motivation_level),
                notifications = COALESCE($9, notifications),
                preferred_workout_time = COALESCE($10, preferred_workout_time),
                primary_goal = COALESCE($11, primary_goal),
                sleep_time = COALESCE($12, sleep_time),
                wake_up_time = COALESCE($13, wake_up_time),
                updated_at = now()
            WHERE user_id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&input.name)
        .bind(input.age)
        .bind(&input.gender)
        .bind(input.weight)
        .bind(input.height)
        .bind(&input.fitness_level)
        .bind(&input.motivation_level)
        .bind(input.notifications)
        .bind(&input.preferred_workout_time)
        .bind(&input.primary_goal)
        .bind(input.sleep_time)
        .bind(input.wake_up_time)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }
}
