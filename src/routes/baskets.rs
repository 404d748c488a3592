use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use crate::{
    dto::baskets::{BasketList, CreateBasketRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Cart,
    response::ApiResponse,
    services::{auth_service, basket_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_baskets).post(create_basket))
        .route("/{cart_id}", delete(delete_basket))
}

#[utoipa::path(
    get,
    path = "/baskets",
    responses(
        (status = 200, description = "Baskets of the current user, oldest first", body = ApiResponse<BasketList>),
        (status = 401, description = "Missing, invalid or revoked token")
    ),
    security(("bearer_auth" = [])),
    tag = "Baskets"
)]
pub async fn list_baskets(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<BasketList>>> {
    let owner = auth_service::find_user(&state, &user.username).await?;
    let resp = basket_service::list_baskets(&state, owner.id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/baskets",
    request_body = CreateBasketRequest,
    responses(
        (status = 201, description = "Basket created", body = ApiResponse<Cart>),
        (status = 400, description = "Invalid items"),
        (status = 401, description = "Missing, invalid or revoked token"),
        (status = 500, description = "Something went wrong")
    ),
    security(("bearer_auth" = [])),
    tag = "Baskets"
)]
pub async fn create_basket(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBasketRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Cart>>)> {
    payload.validate()?;
    let owner = auth_service::find_user(&state, &user.username).await?;
    let resp = basket_service::create_basket(&state, owner.id, payload.items).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/baskets/{cart_id}",
    params(
        ("cart_id" = i32, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Basket deleted", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Missing, invalid or revoked token"),
        (status = 404, description = "Basket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Baskets"
)]
pub async fn delete_basket(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cart_id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let owner = auth_service::find_user(&state, &user.username).await?;
    let resp = basket_service::delete_basket(&state, owner.id, cart_id).await?;
    Ok(Json(resp))
}
