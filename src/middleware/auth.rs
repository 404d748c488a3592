use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    dto::auth::TokenKind, error::AppError, services::auth_service::authenticate, state::AppState,
};

/// Caller holding a valid, unrevoked access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub jti: String,
}

/// Caller holding a valid, unrevoked refresh token.
#[derive(Debug, Clone)]
pub struct RefreshUser {
    pub username: String,
    pub jti: String,
}

/// Raw bearer token, not yet verified.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

pub fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?;

    let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)?;
    Ok(token)
}

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(bearer_token(parts)?.to_string()))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = authenticate(state, token, TokenKind::Access).await?;
        Ok(AuthUser {
            username: claims.sub,
            jti: claims.jti,
        })
    }
}

impl FromRequestParts<AppState> for RefreshUser {
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = authenticate(state, token, TokenKind::Refresh).await?;
        Ok(RefreshUser {
            username: claims.sub,
            jti: claims.jti,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header_value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/baskets");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn extracts_bearer_token() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_or_malformed_header_is_unauthorized() {
        assert!(matches!(bearer_token(&parts_with(None)), Err(AppError::Unauthorized)));
        assert!(matches!(
            bearer_token(&parts_with(Some("Basic dXNlcjpwYXNz"))),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            bearer_token(&parts_with(Some("Bearer   "))),
            Err(AppError::Unauthorized)
        ));
    }
}
