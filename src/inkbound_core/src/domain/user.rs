use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::email::Email;

/// Placeholder shown until a user uploads their own avatar.
pub const DEFAULT_AVATAR_URL: &str = "https://cdn.vectorstock.com/i/1000x1000/44/01/default-avatar-photo-placeholder-icon-grey-vector-38594401.webp";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password must not be empty")]
    EmptyPassword,
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Invalid user id")]
    InvalidUserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for UserId {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| UserError::InvalidUserId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UserError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller identity injected by the authorization layer once a bearer token
/// has been validated.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: UserId,
    pub role: Role,
}

/// A registered account. The password hash never leaves this type except
/// through the explicit accessor used by credential checks.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: Secret<String>,
    name: String,
    phone: Option<String>,
    address: Option<String>,
    avatar_url: String,
    role: Role,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl User {
    /// A freshly registered user: default role, default avatar, unverified.
    pub fn new(email: Email, password_hash: Secret<String>, name: String) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_hash,
            name,
            phone: None,
            address: None,
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            role: Role::default(),
            verified: false,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate a user from stored fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        email: Email,
        password_hash: Secret<String>,
        name: String,
        phone: Option<String>,
        address: Option<String>,
        avatar_url: String,
        role: Role,
        verified: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            name,
            phone,
            address,
            avatar_url,
            role,
            verified,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    pub fn has_custom_avatar(&self) -> bool {
        self.avatar_url != DEFAULT_AVATAR_URL
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    pub fn set_password_hash(&mut self, password_hash: Secret<String>) {
        self.password_hash = password_hash;
    }

    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(avatar_url) = update.avatar_url {
            self.avatar_url = avatar_url;
        }
    }
}

/// Partial profile update: absent fields are left untouched, never nulled.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.avatar_url.is_none()
    }
}
