use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use inkbound_core::{PasswordHashError, PasswordHasher};
use secrecy::{ExposeSecret, Secret};

/// Argon2id hasher with a fixed work factor, used for account passwords and
/// verification secrets alike.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, plaintext: &Secret<String>) -> Result<Secret<String>, PasswordHashError> {
        let plaintext = plaintext.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                hasher()?
                    .hash_password(plaintext.expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        plaintext: &Secret<String>,
        hash: &Secret<String>,
    ) -> Result<bool, PasswordHashError> {
        let plaintext = plaintext.clone();
        let hash = hash.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = PasswordHash::new(hash.expose_secret())
                    .map_err(|e| PasswordHashError::MalformedHash(e.to_string()))?;

                match hasher()?
                    .verify_password(plaintext.expose_secret().as_bytes(), &expected)
                {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHashError::MalformedHash(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
    }
}

fn hasher<'a>() -> Result<Argon2<'a>, PasswordHashError> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?,
    ))
}
