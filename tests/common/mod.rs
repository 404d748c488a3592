#![allow(dead_code)]

use chrono::Duration;
use green_basket_api::{
    db::create_schema,
    dto::{auth::RegisterRequest, baskets::BasketItemInput},
    services::{auth_service, token_service::TokenKeys},
    state::AppState,
};
use sea_orm::{ConnectOptions, Database};

pub const TEST_SECRET: &str = "test-secret";

/// Fresh in-memory database with the schema built from the entities.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // A single connection, otherwise every pooled connection sees its own empty database.
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let orm = Database::connect(opt).await?;
    create_schema(&orm).await?;

    let tokens = TokenKeys::new(TEST_SECRET, None, Some(Duration::days(30)));
    Ok(AppState::new(orm, tokens))
}

pub async fn register(state: &AppState, username: &str, password: &str) -> anyhow::Result<i32> {
    auth_service::register_user(
        state,
        RegisterRequest {
            username: username.into(),
            password: password.into(),
        },
    )
    .await?;
    let user = auth_service::find_user(state, username).await?;
    Ok(user.id)
}

pub fn item(ean: &str, name: &str, carbon_footprint: f64) -> BasketItemInput {
    BasketItemInput {
        ean: ean.into(),
        name: name.into(),
        price: 2.5,
        quantity: 1,
        carbon_footprint,
    }
}
