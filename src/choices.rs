//! Fixed choice sets for enum-typed profile fields. Values double as labels.

use serde::Serialize;

pub const GENDERS: &[&str] = &[
    "Male",
    "Female",
    "Non-binary",
    "Other",
    "Prefer not to say",
];

pub const FITNESS_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced", "Professional"];

/// Ordered 1-5.
pub const MOTIVATION_LEVELS: &[&str] = &[
    "1 - Very Low",
    "2 - Low",
    "3 - Average",
    "4 - High",
    "5 - Very High",
];

pub const WORKOUT_TIMES: &[&str] = &[
    "Morning (6-9 AM)",
    "Late Morning (9-12 PM)",
    "Afternoon (12-3 PM)",
    "Late Afternoon (3-6 PM)",
    "Evening (6-9 PM)",
    "Night (9-12 AM)",
];

pub const PRIMARY_GOALS: &[&str] = &[
    "Weight Loss",
    "Muscle Gain",
    "General Fitness",
    "Endurance Training",
    "Event Preparation",
];

pub fn is_allowed(set: &[&str], value: &str) -> bool {
    set.contains(&value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

fn pairs(set: &'static [&'static str]) -> Vec<Choice> {
    set.iter().map(|v| Choice { value: v, label: v }).collect()
}

/// All five categories in one view, each as ordered `{value, label}` pairs.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChoiceSets {
    pub gender: Vec<Choice>,
    pub fitness_level: Vec<Choice>,
    pub motivation_level: Vec<Choice>,
    pub preferred_workout_time: Vec<Choice>,
    pub primary_goal: Vec<Choice>,
}

impl ChoiceSets {
    pub fn current() -> Self {
        Self {
            gender: pairs(GENDERS),
            fitness_level: pairs(FITNESS_LEVELS),
            motivation_level: pairs(MOTIVATION_LEVELS),
            preferred_workout_time: pairs(WORKOUT_TIMES),
            primary_goal: pairs(PRIMARY_GOALS),
        }
    }
}
