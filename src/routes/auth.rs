use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::auth::{
        AccessToken, LoginRequest, RegisterRequest, RevokedResponse, SecretAnswer, TokenKind,
        TokenPair,
    },
    error::AppResult,
    middleware::auth::{AuthUser, BearerToken, RefreshUser},
    response::{ApiResponse, Meta},
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registration", post(register))
        .route("/login", post(login))
        .route("/logout/access", post(logout_access))
        .route("/logout/refresh", post(logout_refresh))
        .route("/token/refresh", post(refresh))
        .route("/secret", get(secret))
}

#[utoipa::path(
    post,
    path = "/registration",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created, token pair issued", body = ApiResponse<TokenPair>),
        (status = 400, description = "Blank field or username already taken"),
        (status = 500, description = "Something went wrong")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    payload.validate()?;
    let resp = auth_service::register_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<TokenPair>),
        (status = 401, description = "Wrong credentials"),
        (status = 404, description = "Unknown user")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    payload.validate()?;
    let resp = auth_service::login_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/logout/access",
    responses(
        (status = 200, description = "Access token revoked", body = ApiResponse<RevokedResponse>),
        (status = 401, description = "Missing, invalid or revoked token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout_access(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<RevokedResponse>>> {
    auth_service::revoke_token(&state, &user.jti, TokenKind::Access).await?;
    Ok(Json(ApiResponse::success(
        "Access token has been revoked",
        RevokedResponse { jti: user.jti },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/logout/refresh",
    responses(
        (status = 200, description = "Refresh token revoked", body = ApiResponse<RevokedResponse>),
        (status = 401, description = "Missing, invalid or revoked token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout_refresh(
    State(state): State<AppState>,
    user: RefreshUser,
) -> AppResult<Json<ApiResponse<RevokedResponse>>> {
    auth_service::revoke_token(&state, &user.jti, TokenKind::Refresh).await?;
    Ok(Json(ApiResponse::success(
        "Refresh token has been revoked",
        RevokedResponse { jti: user.jti },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/token/refresh",
    responses(
        (status = 200, description = "New access token", body = ApiResponse<AccessToken>),
        (status = 401, description = "Missing, invalid or revoked refresh token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<ApiResponse<AccessToken>>> {
    let resp = auth_service::refresh_access_token(&state, &token).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/secret",
    responses(
        (status = 200, description = "Token check", body = ApiResponse<SecretAnswer>),
        (status = 401, description = "Missing, invalid or revoked token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn secret(user: AuthUser) -> Json<ApiResponse<SecretAnswer>> {
    tracing::debug!(username = %user.username, "secret accessed");
    Json(ApiResponse::success(
        "OK",
        SecretAnswer { answer: 42 },
        Some(Meta::empty()),
    ))
}
