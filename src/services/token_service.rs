use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    dto::auth::{Claims, TokenKind},
    error::{AppError, AppResult},
};

/// HS256 signing material plus the lifetime of each token kind.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Option<Duration>,
    refresh_ttl: Option<Duration>,
}

impl TokenKeys {
    pub fn new(secret: &str, access_ttl: Option<Duration>, refresh_ttl: Option<Duration>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.secret,
            config.access_ttl_minutes.map(Duration::minutes),
            Some(Duration::days(config.refresh_ttl_days)),
        )
    }

    /// Sign a fresh token for `username` with a new random jti.
    pub fn issue(&self, username: &str, kind: TokenKind) -> AppResult<(String, Claims)> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let exp = match ttl {
            Some(ttl) => Some(
                now.checked_add_signed(ttl)
                    .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?
                    .timestamp() as usize,
            ),
            None => None,
        };

        let claims = Claims {
            sub: username.to_string(),
            jti: Uuid::new_v4().to_string(),
            kind,
            iat: now.timestamp() as usize,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

        Ok((token, claims))
    }

    /// Verify the signature and, when present, the expiry. Revocation is checked by the caller.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::warn!(error = %err, "rejected token");
                AppError::Unauthorized
            })
    }
}
