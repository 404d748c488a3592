use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::MAX_TEXT_LEN;
use crate::error::{AppError, AppResult};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_field("username", &self.username)?;
        limit_length("username", &self.username)?;
        require_field("password", &self.password)
    }
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_field("username", &self.username)?;
        require_field("password", &self.password)
    }
}

fn require_field(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!(
            "{field}: This field cannot be blank"
        )));
    }
    Ok(())
}

fn limit_length(field: &str, value: &str) -> AppResult<()> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::BadRequest(format!(
            "{field}: Must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccessToken {
    pub access_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Claims {
    /// Username the token was issued to.
    pub sub: String,
    pub jti: String,
    pub kind: TokenKind,
    pub iat: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevokedResponse {
    pub jti: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SecretAnswer {
    pub answer: i32,
}
