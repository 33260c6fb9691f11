use rand::Rng;
use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

/// Length of the temporary password mailed out by the forgot-password flow.
pub const TEMPORARY_PASSWORD_LENGTH: usize = 10;

const TEMPORARY_PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

/// Plaintext password as supplied by a caller. Length policy is enforced by
/// the individual operations, not here; only empty input is rejected.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.expose_secret().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }

    /// Generate a fresh random password for the forgot-password flow.
    pub fn generate_temporary() -> Self {
        let mut rng = rand::rng();
        let plaintext: String = (0..TEMPORARY_PASSWORD_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..TEMPORARY_PASSWORD_ALPHABET.len());
                TEMPORARY_PASSWORD_ALPHABET[idx] as char
            })
            .collect();

        Self(Secret::from(plaintext))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().is_empty() {
            return Err(UserError::EmptyPassword);
        }
        Ok(Self(value))
    }
}
