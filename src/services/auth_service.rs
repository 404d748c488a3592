use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr,
};

use crate::{
    dto::auth::{AccessToken, Claims, LoginRequest, RegisterRequest, TokenKind, TokenPair},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    services::revocation_service,
    state::AppState,
};

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<TokenPair>> {
    let RegisterRequest { username, password } = payload;

    let exist = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::DuplicateUser(username));
    }

    let password_hash = hash_password(&password)?;

    let inserted = UserActive {
        id: NotSet,
        username: Set(username.clone()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now()),
    }
    .insert(&state.orm)
    .await;

    let user = match inserted {
        Ok(user) => user,
        // Lost a race with a concurrent registration of the same name.
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(AppError::DuplicateUser(username));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    let tokens = issue_pair(state, &user.username)?;
    Ok(ApiResponse::success(
        format!("User {} was created", user.username),
        tokens,
        Some(Meta::empty()),
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<TokenPair>> {
    let LoginRequest { username, password } = payload;

    let user = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?;
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::UserNotFound(username)),
    };

    if !verify_password(&password, &user.password_hash)? {
        tracing::warn!(username = %user.username, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let tokens = issue_pair(state, &user.username)?;
    Ok(ApiResponse::success(
        format!("Logged in as {}", user.username),
        tokens,
        Some(Meta::empty()),
    ))
}

/// Exchange a valid, unrevoked refresh token for a new access token.
pub async fn refresh_access_token(
    state: &AppState,
    refresh_token: &str,
) -> AppResult<ApiResponse<AccessToken>> {
    let claims = authenticate(state, refresh_token, TokenKind::Refresh).await?;
    let (access_token, _) = state.tokens.issue(&claims.sub, TokenKind::Access)?;

    Ok(ApiResponse::success(
        "Access token refreshed",
        AccessToken { access_token },
        Some(Meta::empty()),
    ))
}

/// Decode `token` and make sure it is of the expected kind and not revoked.
pub async fn authenticate(
    state: &AppState,
    token: &str,
    expected: TokenKind,
) -> AppResult<Claims> {
    let claims = state.tokens.decode(token)?;

    if claims.kind != expected {
        tracing::warn!(
            jti = %claims.jti,
            expected = expected.as_str(),
            got = claims.kind.as_str(),
            "token kind mismatch"
        );
        return Err(AppError::Unauthorized);
    }

    if revocation_service::is_revoked(&state.orm, &claims.jti).await? {
        tracing::warn!(jti = %claims.jti, "revoked token presented");
        return Err(AppError::Unauthorized);
    }

    Ok(claims)
}

pub async fn revoke_token(state: &AppState, jti: &str, kind: TokenKind) -> AppResult<()> {
    revocation_service::revoke(&state.orm, jti, kind).await
}

pub async fn is_revoked(state: &AppState, jti: &str) -> AppResult<bool> {
    revocation_service::is_revoked(&state.orm, jti).await
}

/// Resolve the user a token was issued to.
pub async fn find_user(state: &AppState, username: &str) -> AppResult<UserModel> {
    Users::find()
        .filter(UserCol::Username.eq(username))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::UserNotFound(username.to_string()))
}

fn issue_pair(state: &AppState, username: &str) -> AppResult<TokenPair> {
    let (access_token, _) = state.tokens.issue(username, TokenKind::Access)?;
    let (refresh_token, _) = state.tokens.issue(username, TokenKind::Refresh)?;
    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
