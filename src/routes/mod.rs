use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod baskets;
pub mod doc;
pub mod footprint;
pub mod health;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/baskets", baskets::router())
        .nest("/footprint", footprint::router())
}
