use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    response::ApiResponse,
    services::user_service::{self, DeletedUsers, UserList},
    state::AppState,
};

// Unauthenticated; the user listing never includes password hashes.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_users).delete(delete_users))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List every user", body = ApiResponse<UserList>)
    ),
    tag = "Users"
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/users",
    responses(
        (status = 200, description = "Delete every user and their baskets", body = ApiResponse<DeletedUsers>),
        (status = 500, description = "Something went wrong")
    ),
    tag = "Users"
)]
pub async fn delete_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DeletedUsers>>> {
    let resp = user_service::delete_all_users(&state).await?;
    Ok(Json(resp))
}
