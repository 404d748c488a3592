use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::footprint::{FootprintReport, FootprintRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::{auth_service, basket_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/product", post(product_footprint))
}

#[utoipa::path(
    post,
    path = "/footprint/product",
    request_body = FootprintRequest,
    responses(
        (status = 200, description = "Footprint per product over the range", body = ApiResponse<FootprintReport>),
        (status = 400, description = "start_at is later than end_at"),
        (status = 401, description = "Missing, invalid or revoked token")
    ),
    security(("bearer_auth" = [])),
    tag = "Footprint"
)]
pub async fn product_footprint(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FootprintRequest>,
) -> AppResult<Json<ApiResponse<FootprintReport>>> {
    let (start_at, end_at) = payload.range()?;
    let owner = auth_service::find_user(&state, &user.username).await?;
    let resp = basket_service::footprint_report(&state, owner.id, start_at, end_at).await?;
    Ok(Json(resp))
}
