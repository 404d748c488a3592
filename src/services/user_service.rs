use sea_orm::{EntityTrait, QueryOrder, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    entity::{
        CartItems, Carts,
        users::{Column as UserCol, Entity as Users},
    },
    error::AppResult,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedUsers {
    pub deleted: u64,
}

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<UserList>> {
    let users: Vec<User> = Users::find()
        .order_by_asc(UserCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    let total = users.len() as i64;
    Ok(ApiResponse::success(
        "OK",
        UserList { users },
        Some(Meta::total(total)),
    ))
}

/// Remove every user together with their baskets. Revoked tokens are kept.
pub async fn delete_all_users(state: &AppState) -> AppResult<ApiResponse<DeletedUsers>> {
    let txn = state.orm.begin().await?;

    CartItems::delete_many().exec(&txn).await?;
    Carts::delete_many().exec(&txn).await?;
    let result = Users::delete_many().exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(deleted = result.rows_affected, "all users deleted");

    Ok(ApiResponse::success(
        format!("{} row(s) deleted", result.rows_affected),
        DeletedUsers {
            deleted: result.rows_affected,
        },
        Some(Meta::empty()),
    ))
}
