use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::token_service::TokenKeys;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, tokens: TokenKeys) -> Self {
        Self {
            orm,
            tokens: Arc::new(tokens),
        }
    }
}
