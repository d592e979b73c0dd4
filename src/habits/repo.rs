use sqlx::{FromRow, PgPool};
use time::{OffsetDateTime, Time};
use uuid::Uuid;

use crate::habits::dto::UpdateHabitRequest;

/// Habit record. The owner column is nullable in the schema but every write
/// path stamps the creating identity.
#[derive(Debug, Clone, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub frequency: String,
    pub time: Option<Time>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "id, user_id, name, description, frequency, time, created_at, updated_at";

impl Habit {
    /// Unscoped listing across all owners.
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Habit>> {
        let rows = sqlx::query_as::<_, Habit>(&format!(
            "SELECT {COLUMNS} FROM habits ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_owner(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Habit>> {
        let rows = sqlx::query_as::<_, Habit>(&format!(
            "SELECT {COLUMNS} FROM habits WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Owner-scoped fetch: a miss means nonexistent OR owned by someone else,
    /// and the caller cannot tell which.
    pub async fn find_owned(
        db: &PgPool,
        user_id: Uuid,
        habit_id: Uuid,
    ) -> anyhow::Result<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>(&format!(
            "SELECT {COLUMNS} FROM habits WHERE id = $1 AND user_id = $2"
        ))
        .bind(habit_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(habit)
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
        description: Option<&str>,
        frequency: &str,
        time: Option<Time>,
    ) -> anyhow::Result<Habit> {
        let habit = sqlx::query_as::<_, Habit>(&format!(
            r#"
            INSERT INTO habits (user_id, name, description, frequency, time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(name)
        .bind(description)
        .bind(frequency)
        .bind(time)
        .fetch_one(db)
        .await?;
        Ok(habit)
    }

    /// Owner-scoped partial merge in one atomic statement. Returns None on
    /// the uniform no-match (absent or not owned).
    pub async fn merge_update(
        db: &PgPool,
        user_id: Uuid,
        habit_id: Uuid,
        input: &UpdateHabitRequest,
    ) -> anyhow::Result<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>(&format!(
            r#"
            UPDATE habits SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                frequency = COALESCE($5, frequency),
                time = COALESCE($6, time),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(habit_id)
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.frequency)
        .bind(input.time)
        .fetch_optional(db)
        .await?;
        Ok(habit)
    }

    /// Owner-scoped hard delete. False on the uniform no-match.
    pub async fn delete_owned(db: &PgPool, user_id: Uuid, habit_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
            .bind(habit_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
