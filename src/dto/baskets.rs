use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::MAX_TEXT_LEN;
use crate::{
    error::{AppError, AppResult},
    models::Cart,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BasketItemInput {
    pub ean: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub carbon_footprint: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBasketRequest {
    pub items: Vec<BasketItemInput>,
}

impl CreateBasketRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.items.is_empty() {
            return Err(AppError::BadRequest("items must not be empty".into()));
        }
        for (idx, item) in self.items.iter().enumerate() {
            item.validate()
                .map_err(|msg| AppError::BadRequest(format!("items[{idx}]: {msg}")))?;
        }
        Ok(())
    }
}

impl BasketItemInput {
    fn validate(&self) -> Result<(), String> {
        if self.ean.trim().is_empty() {
            return Err("ean cannot be blank".into());
        }
        if self.name.trim().is_empty() {
            return Err("name cannot be blank".into());
        }
        if self.ean.chars().count() > MAX_TEXT_LEN {
            return Err(format!("ean must be at most {MAX_TEXT_LEN} characters"));
        }
        if self.name.chars().count() > MAX_TEXT_LEN {
            return Err(format!("name must be at most {MAX_TEXT_LEN} characters"));
        }
        if self.quantity <= 0 {
            return Err("quantity must be greater than 0".into());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number".into());
        }
        if !self.carbon_footprint.is_finite() || self.carbon_footprint < 0.0 {
            return Err("carbon_footprint must be a non-negative number".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BasketList {
    pub carts: Vec<Cart>,
}
