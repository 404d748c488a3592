mod common;

use chrono::Utc;
use green_basket_api::{
    dto::auth::{LoginRequest, RegisterRequest, TokenKind},
    entity::{RevokedTokens, Users},
    error::AppError,
    services::{auth_service, basket_service, revocation_service, user_service},
};
use sea_orm::{EntityTrait, PaginatorTrait};

use common::{item, register, setup_state};

#[tokio::test]
async fn duplicate_registration_keeps_a_single_user() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let first = auth_service::register_user(
        &state,
        RegisterRequest {
            username: "alice".into(),
            password: "s3cret".into(),
        },
    )
    .await?;
    assert_eq!(first.message, "User alice was created");
    let tokens = first.data.expect("token pair");
    assert!(!tokens.access_token.is_empty());
    assert!(!tokens.refresh_token.is_empty());

    let second = auth_service::register_user(
        &state,
        RegisterRequest {
            username: "alice".into(),
            password: "another".into(),
        },
    )
    .await;
    assert!(matches!(second, Err(AppError::DuplicateUser(name)) if name == "alice"));

    assert_eq!(Users::find().count(&state.orm).await?, 1);
    Ok(())
}

#[tokio::test]
async fn login_checks_the_password() -> anyhow::Result<()> {
    let state = setup_state().await?;
    register(&state, "bob", "correct horse").await?;

    let wrong = auth_service::login_user(
        &state,
        LoginRequest {
            username: "bob".into(),
            password: "battery staple".into(),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

    let ok = auth_service::login_user(
        &state,
        LoginRequest {
            username: "bob".into(),
            password: "correct horse".into(),
        },
    )
    .await?;
    assert_eq!(ok.message, "Logged in as bob");
    let tokens = ok.data.expect("token pair");

    let claims = auth_service::authenticate(&state, &tokens.access_token, TokenKind::Access).await?;
    assert_eq!(claims.sub, "bob");
    Ok(())
}

#[tokio::test]
async fn login_for_unknown_user_is_not_found() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let resp = auth_service::login_user(
        &state,
        LoginRequest {
            username: "ghost".into(),
            password: "whatever".into(),
        },
    )
    .await;
    assert!(matches!(resp, Err(AppError::UserNotFound(name)) if name == "ghost"));
    Ok(())
}

#[tokio::test]
async fn revoked_access_token_is_unauthorized() -> anyhow::Result<()> {
    let state = setup_state().await?;
    register(&state, "carol", "pw").await?;

    let (token, claims) = state.tokens.issue("carol", TokenKind::Access)?;
    auth_service::authenticate(&state, &token, TokenKind::Access).await?;

    auth_service::revoke_token(&state, &claims.jti, TokenKind::Access).await?;
    assert!(auth_service::is_revoked(&state, &claims.jti).await?);

    let after = auth_service::authenticate(&state, &token, TokenKind::Access).await;
    assert!(matches!(after, Err(AppError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn revoking_twice_is_a_no_op() -> anyhow::Result<()> {
    let state = setup_state().await?;

    revocation_service::revoke(&state.orm, "jti-1", TokenKind::Refresh).await?;
    revocation_service::revoke(&state.orm, "jti-1", TokenKind::Refresh).await?;

    assert_eq!(RevokedTokens::find().count(&state.orm).await?, 1);
    assert!(revocation_service::is_revoked(&state.orm, "jti-1").await?);
    assert!(!revocation_service::is_revoked(&state.orm, "jti-2").await?);
    Ok(())
}

#[tokio::test]
async fn refresh_issues_a_new_access_token_for_the_same_identity() -> anyhow::Result<()> {
    let state = setup_state().await?;
    register(&state, "dave", "pw").await?;

    let (refresh, _) = state.tokens.issue("dave", TokenKind::Refresh)?;
    let resp = auth_service::refresh_access_token(&state, &refresh).await?;
    let access = resp.data.expect("access token").access_token;

    let claims = auth_service::authenticate(&state, &access, TokenKind::Access).await?;
    assert_eq!(claims.sub, "dave");
    assert_eq!(claims.kind, TokenKind::Access);
    Ok(())
}

#[tokio::test]
async fn revoked_or_misused_refresh_token_cannot_refresh() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let (refresh, claims) = state.tokens.issue("erin", TokenKind::Refresh)?;
    auth_service::revoke_token(&state, &claims.jti, TokenKind::Refresh).await?;
    let revoked = auth_service::refresh_access_token(&state, &refresh).await;
    assert!(matches!(revoked, Err(AppError::Unauthorized)));

    let (access, _) = state.tokens.issue("erin", TokenKind::Access)?;
    let wrong_kind = auth_service::refresh_access_token(&state, &access).await;
    assert!(matches!(wrong_kind, Err(AppError::Unauthorized)));

    let garbage = auth_service::refresh_access_token(&state, "not-a-jwt").await;
    assert!(matches!(garbage, Err(AppError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn refresh_token_is_not_an_access_token() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let (refresh, _) = state.tokens.issue("frank", TokenKind::Refresh)?;
    let resp = auth_service::authenticate(&state, &refresh, TokenKind::Access).await;
    assert!(matches!(resp, Err(AppError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn listing_users_never_exposes_hashes_and_delete_cascades() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let grace = register(&state, "grace", "pw").await?;
    register(&state, "heidi", "pw").await?;
    basket_service::create_basket_at(&state, grace, &[item("1", "Tea", 0.4)], Utc::now()).await?;

    let listed = user_service::list_users(&state).await?;
    let body = serde_json::to_value(&listed)?;
    let users = body["data"]["users"].as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "grace");
    assert!(users[0].get("password_hash").is_none());

    let deleted = user_service::delete_all_users(&state).await?;
    assert_eq!(deleted.message, "2 row(s) deleted");
    assert_eq!(Users::find().count(&state.orm).await?, 0);

    let remaining = green_basket_api::entity::Carts::find().count(&state.orm).await?;
    assert_eq!(remaining, 0);
    Ok(())
}
