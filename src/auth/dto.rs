use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo::User;
use crate::profile::dto::{ProfileInput, ProfileView};
use crate::profile::repo::Profile;

/// Request body for registration. Email doubles as the username. When
/// `confirmPassword` is absent it is treated as matching, like the original
/// client contract.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword", default)]
    pub confirm_password: Option<String>,
    #[serde(default)]
    pub profile: ProfileInput,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Account identifier merged with the profile, as returned to the client.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub profile: ProfileView,
}

impl UserView {
    pub fn new(user: User, profile: Profile) -> Self {
        Self {
            id: user.id,
            email: user.email,
            profile: profile.into(),
        }
    }
}

/// Token pair plus the user, returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct SessionData {
    pub refresh: String,
    pub access: String,
    pub user: UserView,
}
