use chrono::Utc;
use green_basket_api::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    dto::baskets::BasketItemInput,
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    services::{auth_service::hash_password, basket_service, token_service::TokenKeys},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;
    let state = AppState::new(orm_from_pool(pool), TokenKeys::from_config(&config.jwt));

    let (user_id, created) = ensure_user(&state, "demo", "demo123").await?;
    if created {
        seed_basket(&state, user_id).await?;
    }

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn ensure_user(state: &AppState, username: &str, password: &str) -> anyhow::Result<(i32, bool)> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Username.eq(username))
        .one(&state.orm)
        .await?
    {
        println!("User {username} already present");
        return Ok((existing.id, false));
    }

    let password_hash = hash_password(password)?;
    let user = UserActive {
        id: NotSet,
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now()),
    }
    .insert(&state.orm)
    .await?;

    println!("Created user {username}");
    Ok((user.id, true))
}

async fn seed_basket(state: &AppState, user_id: i32) -> anyhow::Result<()> {
    let items = vec![
        ("3017620422003", "Hazelnut spread 400g", 3.49, 1, 2.1),
        ("5449000000996", "Cola 1.5L", 1.79, 2, 0.9),
        ("3228857000166", "Sliced bread", 1.25, 1, 0.6),
    ]
    .into_iter()
    .map(|(ean, name, price, quantity, carbon_footprint)| BasketItemInput {
        ean: ean.to_string(),
        name: name.to_string(),
        price,
        quantity,
        carbon_footprint,
    })
    .collect::<Vec<_>>();

    let cart = basket_service::create_basket_at(state, user_id, &items, Utc::now())
        .await?;

    println!(
        "Seeded basket {} with total footprint {}",
        cart.id, cart.total_footprint
    );
    Ok(())
}
