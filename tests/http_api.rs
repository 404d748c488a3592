mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use green_basket_api::{routes::create_api_router, state::AppState};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::setup_state;

fn app(state: AppState) -> Router {
    create_api_router().with_state(state)
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

#[tokio::test]
async fn basket_lifecycle_over_http() -> anyhow::Result<()> {
    let app = app(setup_state().await?);

    let (status, body) = call(
        &app,
        "POST",
        "/registration",
        None,
        Some(json!({ "username": "alice", "password": "pw" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let access = body["data"]["access_token"].as_str().expect("access token").to_string();

    let (status, body) = call(
        &app,
        "POST",
        "/baskets",
        Some(&access),
        Some(json!({
            "items": [
                { "ean": "4006381333931", "name": "Oat milk", "price": 1.99, "quantity": 2, "carbon_footprint": 1.5 },
                { "ean": "5000112637922", "name": "Lentils", "price": 2.49, "quantity": 1, "carbon_footprint": 2.5 }
            ]
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["total_footprint"], 4.0);
    let cart_id = body["data"]["id"].as_i64().expect("cart id");

    let (status, body) = call(&app, "GET", "/baskets", Some(&access), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["carts"].as_array().map(Vec::len), Some(1));

    let (status, body) = call(
        &app,
        "POST",
        "/footprint/product",
        Some(&access),
        Some(json!({ "start_at": "2000-01-01", "end_at": "2999-12-31" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 4.0);

    let (status, _) = call(&app, "DELETE", &format!("/baskets/{cart_id}"), Some(&access), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "DELETE", &format!("/baskets/{cart_id}"), Some(&access), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn logout_revokes_the_presented_token() -> anyhow::Result<()> {
    let app = app(setup_state().await?);

    let (_, body) = call(
        &app,
        "POST",
        "/registration",
        None,
        Some(json!({ "username": "bob", "password": "pw" })),
    )
    .await?;
    let access = body["data"]["access_token"].as_str().expect("access token").to_string();
    let refresh = body["data"]["refresh_token"].as_str().expect("refresh token").to_string();

    let (status, body) = call(&app, "GET", "/secret", Some(&access), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["answer"], 42);

    let (status, _) = call(&app, "POST", "/logout/access", Some(&access), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "GET", "/baskets", Some(&access), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(&app, "POST", "/token/refresh", Some(&refresh), None).await?;
    assert_eq!(status, StatusCode::OK);
    let fresh = body["data"]["access_token"].as_str().expect("access token").to_string();

    let (status, _) = call(&app, "GET", "/baskets", Some(&fresh), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "POST", "/logout/refresh", Some(&refresh), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "POST", "/token/refresh", Some(&refresh), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn request_errors_map_to_statuses() -> anyhow::Result<()> {
    let app = app(setup_state().await?);

    let (status, _) = call(&app, "GET", "/baskets", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(
        &app,
        "POST",
        "/registration",
        None,
        Some(json!({ "username": "", "password": "pw" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Bad Request username: This field cannot be blank");

    let (status, body) = call(
        &app,
        "POST",
        "/registration",
        None,
        Some(json!({ "username": "u".repeat(121), "password": "pw" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Bad Request username: Must be at most 120 characters");

    call(
        &app,
        "POST",
        "/registration",
        None,
        Some(json!({ "username": "carol", "password": "pw" })),
    )
    .await?;
    let (status, body) = call(
        &app,
        "POST",
        "/registration",
        None,
        Some(json!({ "username": "carol", "password": "pw" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User carol already exists");

    let (status, _) = call(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "carol", "password": "nope" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = call(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "carol", "password": "pw" })),
    )
    .await?;
    let access = body["data"]["access_token"].as_str().expect("access token").to_string();

    let (status, _) = call(
        &app,
        "POST",
        "/footprint/product",
        Some(&access),
        Some(json!({ "start_at": "2024-05-01", "end_at": "2024-04-01" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "POST", "/baskets", Some(&access), Some(json!({ "items": [] }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, "GET", "/users", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    Ok(())
}
