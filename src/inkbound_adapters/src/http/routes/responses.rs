use chrono::{DateTime, Utc};
use inkbound_core::User;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Sanitized user view. The password hash has no representation here.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: String,
    pub role: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().as_ref().expose_secret().clone(),
            name: user.name().to_string(),
            phone: user.phone().map(str::to_string),
            address: user.address().map(str::to_string),
            avatar: user.avatar_url().to_string(),
            role: user.role().to_string(),
            verified: user.is_verified(),
            created_at: user.created_at(),
        }
    }
}
