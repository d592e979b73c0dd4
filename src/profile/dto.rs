use serde::{Deserialize, Serialize};
use time::Time;

use crate::choices;
use crate::error::FieldErrors;
use crate::profile::repo::Profile;
use crate::timefmt;

/// Writable profile fields. Every field is optional: a missing key means
/// "leave as is" on update and "unset" at registration.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileInput {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub fitness_level: Option<String>,
    pub motivation_level: Option<String>,
    pub notifications: Option<bool>,
    pub preferred_workout_time: Option<String>,
    pub primary_goal: Option<String>,
    #[serde(default, with = "timefmt::option")]
    pub sleep_time: Option<Time>,
    #[serde(default, with = "timefmt::option")]
    pub wake_up_time: Option<Time>,
}

impl ProfileInput {
    /// Choice-set membership for each enum-typed field. Unknown values are
    /// rejected per field, never coerced. Numeric fields are accepted as-is.
    pub fn validate_into(&self, errors: &mut FieldErrors) {
        let checks: [(&str, &Option<String>, &[&str]); 5] = [
            ("gender", &self.gender, choices::GENDERS),
            ("fitness_level", &self.fitness_level, choices::FITNESS_LEVELS),
            (
                "motivation_level",
                &self.motivation_level,
                choices::MOTIVATION_LEVELS,
            ),
            (
                "preferred_workout_time",
                &self.preferred_workout_time,
                choices::WORKOUT_TIMES,
            ),
            ("primary_goal", &self.primary_goal, choices::PRIMARY_GOALS),
        ];
        for (field, value, set) in checks {
            if let Some(v) = value {
                if !choices::is_allowed(set, v) {
                    errors.insert(field, format!("\"{}\" is not a valid choice", v));
                }
            }
        }
    }
}

/// Profile as returned to the client, matching the stored record.
#[derive(Debug, Serialize)]
pub struct ProfileView {
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
    #[serde(with = "timefmt::option")]
    pub sleep_time: Option<Time>,
    #[serde(with = "timefmt::option")]
    pub wake_up_time: Option<Time>,
}

impl From<Profile> for ProfileView {
    fn from(p: Profile) -> Self {
        Self {
            name: p.name,
            age: p.age,
            gender: p.gender,
            weight: p.weight,
            height: p.height,
            fitness_level: p.fitness_level,
            motivation_level: p.motivation_level,
            notifications: p.notifications,
            preferred_workout_time: p.preferred_workout_time,
            primary_goal: p.primary_goal,
            sleep_time: p.sleep_time,
            wake_up_time: p.wake_up_time,
        }
    }
}
