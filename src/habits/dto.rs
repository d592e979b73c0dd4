use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Time};
use uuid::Uuid;

use crate::error::FieldErrors;
use crate::habits::repo::Habit;
use crate::timefmt;

/// Request body for habit creation. Owner is never taken from the payload;
/// the server stamps the authenticated caller.
#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default, with = "timefmt::option")]
    pub time: Option<Time>,
}

impl CreateHabitRequest {
    /// `name` and `frequency` are required and must be non-blank.
    pub fn validate(&self) -> Result<(String, String), crate::error::ApiError> {
        let mut errors = FieldErrors::default();
        let name = self.name.as_deref().map(str::trim).unwrap_or("");
        let frequency = self.frequency.as_deref().map(str::trim).unwrap_or("");
        if name.is_empty() {
            errors.insert("name", "This field is required");
        }
        if frequency.is_empty() {
            errors.insert("frequency", "This field is required");
        }
        errors.into_result()?;
        Ok((name.to_string(), frequency.to_string()))
    }
}

/// Partial update: missing keys keep stored values.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateHabitRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    #[serde(default, with = "timefmt::option")]
    pub time: Option<Time>,
}

impl UpdateHabitRequest {
    /// `name` and `frequency` stay required: present-but-blank values are
    /// rejected per field, never merged. Present values are trimmed like at
    /// creation.
    pub fn validate(mut self) -> Result<Self, crate::error::ApiError> {
        let mut errors = FieldErrors::default();
        if let Some(name) = &self.name {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                errors.insert("name", "This field may not be blank");
            } else {
                self.name = Some(trimmed.to_string());
            }
        }
        if let Some(frequency) = &self.frequency {
            let trimmed = frequency.trim();
            if trimmed.is_empty() {
                errors.insert("frequency", "This field may not be blank");
            } else {
                self.frequency = Some(trimmed.to_string());
            }
        }
        errors.into_result()?;
        Ok(self)
    }
}

/// Habit as returned to the client.
#[derive(Debug, Serialize)]
pub struct HabitView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub frequency: String,
    #[serde(with = "timefmt::option")]
    pub time: Option<Time>,
    pub user: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Habit> for HabitView {
    fn from(h: Habit) -> Self {
        Self {
            id: h.id,
            name: h.name,
            description: h.description,
            frequency: h.frequency,
            time: h.time,
            user: h.user_id,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use time::macros::{datetime, time};

    #[test]
    fn create_requires_name_and_frequency() {
        let req: CreateHabitRequest = serde_json::from_str(r#"{"description": "later"}"#).unwrap();
        let err = req.validate().unwrap_err();
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["name"], "This field is required");
        assert_eq!(json["frequency"], "This field is required");
    }

    #[test]
    fn create_rejects_blank_name() {
        let req: CreateHabitRequest =
            serde_json::from_str(r#"{"name": "   ", "frequency": "daily"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_trims_and_passes() {
        let req: CreateHabitRequest =
            serde_json::from_str(r#"{"name": " Run ", "frequency": "daily", "time": "06:00"}"#)
                .unwrap();
        let (name, frequency) = req.validate().unwrap();
        assert_eq!(name, "Run");
        assert_eq!(frequency, "daily");
        assert_eq!(req.time, Some(time!(06:00:00)));
    }

    #[test]
    fn update_rejects_blank_name_and_frequency() {
        let req: UpdateHabitRequest =
            serde_json::from_str(r#"{"name": "", "frequency": "   "}"#).unwrap();
        let err = req.validate().unwrap_err();
        let ApiError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["name"], "This field may not be blank");
        assert_eq!(json["frequency"], "This field may not be blank");
    }

    #[test]
    fn update_allows_absent_fields() {
        let req: UpdateHabitRequest = serde_json::from_str("{}").unwrap();
        let req = req.validate().unwrap();
        assert!(req.name.is_none());
        assert!(req.frequency.is_none());
    }

    #[test]
    fn update_trims_present_values() {
        let req: UpdateHabitRequest =
            serde_json::from_str(r#"{"name": " Read ", "frequency": " weekly "}"#).unwrap();
        let req = req.validate().unwrap();
        assert_eq!(req.name.as_deref(), Some("Read"));
        assert_eq!(req.frequency.as_deref(), Some("weekly"));
    }

    #[test]
    fn update_ignores_client_supplied_owner() {
        // Unknown keys such as "user" are dropped at the serde boundary.
        let req: UpdateHabitRequest = serde_json::from_str(
            r#"{"name": "Read", "user": "f2fa8790-58ae-41d7-b02a-small-lie"}"#,
        )
        .unwrap();
        assert_eq!(req.name.as_deref(), Some("Read"));
    }

    #[test]
    fn view_serialization_shape() {
        let view = HabitView {
            id: Uuid::new_v4(),
            name: "Run".into(),
            description: None,
            frequency: "daily".into(),
            time: Some(time!(06:00:00)),
            user: Some(Uuid::new_v4()),
            created_at: datetime!(2024-01-01 00:00:00 UTC),
            updated_at: datetime!(2024-01-02 00:00:00 UTC),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["frequency"], "daily");
        assert_eq!(json["time"], "06:00:00");
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
        assert!(json["user"].is_string());
    }
}
