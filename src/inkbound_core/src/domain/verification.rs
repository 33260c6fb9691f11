use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use super::user::UserId;

/// Verification links expire one hour after they are issued.
pub const VERIFICATION_TOKEN_TTL_SECONDS: i64 = 3600;

const CODE_SEPARATOR: char = '.';

#[derive(Debug, Error)]
pub enum VerificationCodeError {
    #[error("Invalid verification link format")]
    Malformed,
}

/// The plaintext secret embedded in a verification link.
///
/// Rendered as `<nonce>.<user-id>`. Both halves are UUIDs, so the separator
/// cannot occur inside either and parsing is unambiguous. Only the hash of
/// the rendered form is ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationCode {
    user_id: UserId,
    nonce: Uuid,
}

impl VerificationCode {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            nonce: Uuid::new_v4(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.nonce, CODE_SEPARATOR, self.user_id)
    }
}

impl FromStr for VerificationCode {
    type Err = VerificationCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (nonce, user_id) = s
            .split_once(CODE_SEPARATOR)
            .ok_or(VerificationCodeError::Malformed)?;

        let nonce = Uuid::parse_str(nonce).map_err(|_| VerificationCodeError::Malformed)?;
        let user_id = Uuid::parse_str(user_id)
            .map(UserId::from)
            .map_err(|_| VerificationCodeError::Malformed)?;

        Ok(Self { user_id, nonce })
    }
}

/// A pending verification as stored in the ledger. Holds only the hash of
/// the code, never the plaintext.
#[derive(Debug, Clone)]
pub struct VerificationToken {
    user_id: UserId,
    secret_hash: Secret<String>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl VerificationToken {
    pub fn new(user_id: UserId, secret_hash: Secret<String>) -> Self {
        let created_at = Utc::now();
        Self {
            user_id,
            secret_hash,
            created_at,
            expires_at: created_at + Duration::seconds(VERIFICATION_TOKEN_TTL_SECONDS),
        }
    }

    pub fn from_parts(
        user_id: UserId,
        secret_hash: Secret<String>,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            secret_hash,
            created_at,
            expires_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn secret_hash(&self) -> &Secret<String> {
        &self.secret_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
