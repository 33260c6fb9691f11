use chrono::Utc;
use inkbound_core::{AuthContext, Role, UserId};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid token")]
    MalformedToken,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Error)]
pub enum JwtConfigError {
    #[error("refresh secret must be set and distinct from the access secret")]
    RefreshSecretNotDistinct,
}

/// Signing configuration for both credentials issued at login.
#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: Secret<String>,
    /// Refresh tokens fall back to the access secret when unset. This is a
    /// deliberate configuration choice; `validate` rejects it on request.
    pub refresh_secret: Option<Secret<String>>,
    pub token_ttl_seconds: i64,
    pub require_distinct_secrets: bool,
}

impl JwtConfig {
    pub fn effective_refresh_secret(&self) -> &Secret<String> {
        self.refresh_secret.as_ref().unwrap_or(&self.access_secret)
    }

    /// Startup validation of the refresh-secret fallback.
    pub fn validate(&self) -> Result<(), JwtConfigError> {
        if !self.require_distinct_secrets {
            return Ok(());
        }
        match &self.refresh_secret {
            Some(secret) if secret.expose_secret() != self.access_secret.expose_secret() => Ok(()),
            _ => Err(JwtConfigError::RefreshSecretNotDistinct),
        }
    }
}

/// Claims of the access credential: caller identity plus role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Claims of the refresh credential: caller identity only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issue the access + refresh pair for a successful login.
pub fn generate_token_pair(
    user_id: UserId,
    role: Role,
    config: &JwtConfig,
) -> Result<TokenPair, TokenAuthError> {
    let exp = expiry_timestamp(config.token_ttl_seconds)?;

    let access_claims = AccessClaims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp,
    };
    let access_token = create_token(&access_claims, &config.access_secret)?;

    let refresh_claims = RefreshClaims {
        sub: user_id.to_string(),
        exp,
    };
    let refresh_token = create_token(&refresh_claims, config.effective_refresh_secret())?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Validate an access token. Pure and stateless: trusts the signature and
/// the embedded expiry only, no store lookup.
pub fn decode_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<AuthContext, TokenAuthError> {
    let claims = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.access_secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenAuthError::TokenExpired,
        _ => TokenAuthError::MalformedToken,
    })?;

    let user_id: UserId = claims
        .sub
        .parse()
        .map_err(|_| TokenAuthError::MalformedToken)?;
    let role: Role = claims
        .role
        .parse()
        .map_err(|_| TokenAuthError::MalformedToken)?;

    Ok(AuthContext { user_id, role })
}

fn expiry_timestamp(ttl_seconds: i64) -> Result<usize, TokenAuthError> {
    let delta = chrono::Duration::try_seconds(ttl_seconds).ok_or(
        TokenAuthError::UnexpectedError("Failed to create token duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(TokenAuthError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    exp.try_into()
        .map_err(|_| TokenAuthError::UnexpectedError("Failed to cast i64 to usize".to_string()))
}

fn create_token<C: Serialize>(claims: &C, secret: &Secret<String>) -> Result<String, TokenAuthError> {
    encode(
        &jsonwebtoken::Header::default(),
        claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            access_secret: Secret::from("access-secret".to_string()),
            refresh_secret: Some(Secret::from("refresh-secret".to_string())),
            token_ttl_seconds: 600,
            require_distinct_secrets: false,
        }
    }

    #[test]
    fn pair_contains_two_well_formed_tokens() {
        let pair = generate_token_pair(UserId::new(), Role::User, &config()).unwrap();
        assert_eq!(pair.access_token.split('.').count(), 3);
        assert_eq!(pair.refresh_token.split('.').count(), 3);
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn access_token_round_trips_identity_and_role() {
        let config = config();
        let user_id = UserId::new();

        let pair = generate_token_pair(user_id, Role::Admin, &config).unwrap();
        let context = decode_access_token(&pair.access_token, &config).unwrap();

        assert_eq!(context.user_id, user_id);
        assert_eq!(context.role, Role::Admin);
    }

    #[test]
    fn refresh_token_is_not_a_valid_access_token() {
        let config = config();
        let pair = generate_token_pair(UserId::new(), Role::User, &config).unwrap();

        let result = decode_access_token(&pair.refresh_token, &config);
        assert!(matches!(result, Err(TokenAuthError::MalformedToken)));
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let pair = generate_token_pair(UserId::new(), Role::User, &config()).unwrap();

        let other = JwtConfig {
            access_secret: Secret::from("a-different-secret".to_string()),
            ..config()
        };
        let result = decode_access_token(&pair.access_token, &other);
        assert!(matches!(result, Err(TokenAuthError::MalformedToken)));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let config = config();
        // Well past the default validation leeway.
        let exp = (Utc::now() - chrono::Duration::hours(2)).timestamp() as usize;
        let claims = AccessClaims {
            sub: UserId::new().to_string(),
            role: Role::User.to_string(),
            exp,
        };
        let token = create_token(&claims, &config.access_secret).unwrap();

        let result = decode_access_token(&token, &config);
        assert!(matches!(result, Err(TokenAuthError::TokenExpired)));
    }

    #[test]
    fn garbage_is_malformed() {
        let result = decode_access_token("not-a-token", &config());
        assert!(matches!(result, Err(TokenAuthError::MalformedToken)));
    }

    #[test]
    fn refresh_secret_falls_back_to_access_secret() {
        let config = JwtConfig {
            refresh_secret: None,
            ..config()
        };
        assert_eq!(
            config.effective_refresh_secret().expose_secret(),
            config.access_secret.expose_secret()
        );

        // The refresh token then verifies under the access secret.
        let pair = generate_token_pair(UserId::new(), Role::User, &config).unwrap();
        let decoded = decode::<RefreshClaims>(
            &pair.refresh_token,
            &DecodingKey::from_secret(config.access_secret.expose_secret().as_bytes()),
            &Validation::default(),
        );
        assert!(decoded.is_ok());
    }

    #[test]
    fn distinctness_validation_is_opt_in() {
        let lax = JwtConfig {
            refresh_secret: None,
            ..config()
        };
        assert!(lax.validate().is_ok());

        let strict_missing = JwtConfig {
            refresh_secret: None,
            require_distinct_secrets: true,
            ..config()
        };
        assert!(strict_missing.validate().is_err());

        let strict_same = JwtConfig {
            refresh_secret: Some(Secret::from("access-secret".to_string())),
            require_distinct_secrets: true,
            ..config()
        };
        assert!(strict_same.validate().is_err());

        let strict_distinct = JwtConfig {
            require_distinct_secrets: true,
            ..config()
        };
        assert!(strict_distinct.validate().is_ok());
    }
}
