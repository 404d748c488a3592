use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{cart_items, carts, users};

/// Public view of a user. The password hash never leaves the service layer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_footprint: f64,
    pub paid: bool,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: i32,
    pub ean: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub carbon_footprint: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FootprintEntry {
    pub ean: String,
    pub name: String,
    pub footprint: f64,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

impl From<cart_items::Model> for CartItem {
    fn from(model: cart_items::Model) -> Self {
        Self {
            id: model.id,
            ean: model.ean,
            name: model.name,
            price: model.price,
            quantity: model.quantity,
            carbon_footprint: model.carbon_footprint,
        }
    }
}

pub(crate) fn cart_from_entity(model: carts::Model, mut items: Vec<cart_items::Model>) -> Cart {
    items.sort_by_key(|item| item.id);
    Cart {
        id: model.id,
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
        total_footprint: model.total_footprint,
        paid: model.paid,
        items: items.into_iter().map(CartItem::from).collect(),
    }
}
