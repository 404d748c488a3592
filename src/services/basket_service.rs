use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseTransaction, EntityTrait,
    FromQueryResult, JoinType, LoaderTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Set, TransactionTrait, sea_query::Expr,
};

use crate::{
    dto::{
        baskets::{BasketItemInput, BasketList},
        footprint::FootprintReport,
    },
    entity::{
        cart_items::{self, ActiveModel as ItemActive, Column as ItemCol, Entity as CartItems},
        carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts},
    },
    error::{AppError, AppResult},
    models::{Cart, FootprintEntry, cart_from_entity},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_basket(
    state: &AppState,
    user_id: i32,
    items: Vec<BasketItemInput>,
) -> AppResult<ApiResponse<Cart>> {
    let cart = create_basket_at(state, user_id, &items, Utc::now()).await?;
    Ok(ApiResponse::success("Basket created", cart, Some(Meta::empty())))
}

/// Persist a basket stamped with `created_at`. The cart and every item go
/// into one transaction; nothing is stored if any insert fails.
pub async fn create_basket_at(
    state: &AppState,
    user_id: i32,
    items: &[BasketItemInput],
    created_at: DateTime<Utc>,
) -> AppResult<Cart> {
    let txn = state.orm.begin().await?;
    let cart = insert_basket(&txn, user_id, items, created_at).await?;
    txn.commit().await?;

    tracing::info!(
        cart_id = cart.id,
        user_id,
        items = cart.items.len(),
        total_footprint = cart.total_footprint,
        "basket created"
    );
    Ok(cart)
}

async fn insert_basket(
    txn: &DatabaseTransaction,
    user_id: i32,
    items: &[BasketItemInput],
    created_at: DateTime<Utc>,
) -> AppResult<Cart> {
    let total_footprint: f64 = items.iter().map(|item| item.carbon_footprint).sum();

    let cart = CartActive {
        id: NotSet,
        user_id: Set(user_id),
        created_at: Set(created_at),
        updated_at: Set(created_at),
        total_footprint: Set(total_footprint),
        paid: Set(false),
    }
    .insert(txn)
    .await?;

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let row = ItemActive {
            id: NotSet,
            cart_id: Set(cart.id),
            ean: Set(item.ean.clone()),
            name: Set(item.name.clone()),
            price: Set(item.price),
            quantity: Set(item.quantity),
            carbon_footprint: Set(item.carbon_footprint),
        }
        .insert(txn)
        .await?;
        rows.push(row);
    }

    Ok(cart_from_entity(cart, rows))
}

pub async fn list_baskets(state: &AppState, user_id: i32) -> AppResult<ApiResponse<BasketList>> {
    let carts = Carts::find()
        .filter(CartCol::UserId.eq(user_id))
        .order_by_asc(CartCol::Id)
        .all(&state.orm)
        .await?;

    let items = carts.load_many(CartItems, &state.orm).await?;

    let carts: Vec<Cart> = carts
        .into_iter()
        .zip(items)
        .map(|(cart, items)| cart_from_entity(cart, items))
        .collect();

    let total = carts.len() as i64;
    Ok(ApiResponse::success(
        "OK",
        BasketList { carts },
        Some(Meta::total(total)),
    ))
}

pub async fn delete_basket(
    state: &AppState,
    user_id: i32,
    cart_id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let cart = Carts::find_by_id(cart_id)
        .filter(CartCol::UserId.eq(user_id))
        .one(&txn)
        .await?;
    let cart = match cart {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    CartItems::delete_many()
        .filter(ItemCol::CartId.eq(cart.id))
        .exec(&txn)
        .await?;
    Carts::delete_by_id(cart.id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(cart_id, user_id, "basket deleted");

    Ok(ApiResponse::success(
        format!("{cart_id} cart deleted"),
        serde_json::json!({ "id": cart_id }),
        Some(Meta::empty()),
    ))
}

#[derive(Debug, FromQueryResult)]
struct FootprintRow {
    ean: String,
    name: String,
    footprint: Option<f64>,
}

/// Footprint per distinct product across the user's carts created within
/// `[start_at, end_at]`, both ends inclusive.
pub async fn footprint_report(
    state: &AppState,
    user_id: i32,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
) -> AppResult<ApiResponse<FootprintReport>> {
    if start_at > end_at {
        return Err(AppError::InvalidRange);
    }

    let rows = CartItems::find()
        .select_only()
        .column(ItemCol::Ean)
        .column(ItemCol::Name)
        .column_as(
            Expr::col((CartItems, ItemCol::CarbonFootprint)).sum(),
            "footprint",
        )
        .join(JoinType::InnerJoin, cart_items::Relation::Carts.def())
        .filter(CartCol::UserId.eq(user_id))
        .filter(CartCol::CreatedAt.between(start_at, end_at))
        .group_by(ItemCol::Ean)
        .group_by(ItemCol::Name)
        .order_by_asc(ItemCol::Ean)
        .order_by_asc(ItemCol::Name)
        .into_model::<FootprintRow>()
        .all(&state.orm)
        .await?;

    let items: Vec<FootprintEntry> = rows
        .into_iter()
        .map(|row| FootprintEntry {
            ean: row.ean,
            name: row.name,
            footprint: row.footprint.unwrap_or_default(),
        })
        .collect();
    let total: f64 = items.iter().map(|entry| entry.footprint).sum();

    let count = items.len() as i64;
    Ok(ApiResponse::success(
        "OK",
        FootprintReport {
            start_at,
            end_at,
            items,
            total,
        },
        Some(Meta::total(count)),
    ))
}
