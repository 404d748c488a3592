use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AccessToken, LoginRequest, RegisterRequest, RevokedResponse, SecretAnswer, TokenPair},
        baskets::{BasketItemInput, BasketList, CreateBasketRequest},
        footprint::{FootprintReport, FootprintRequest},
    },
    models::{Cart, CartItem, FootprintEntry, User},
    response::{ApiResponse, Meta},
    routes::{auth, baskets, footprint, health, users},
    services::user_service::{DeletedUsers, UserList},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout_access,
        auth::logout_refresh,
        auth::refresh,
        auth::secret,
        users::list_users,
        users::delete_users,
        baskets::list_baskets,
        baskets::create_basket,
        baskets::delete_basket,
        footprint::product_footprint
    ),
    components(
        schemas(
            User,
            Cart,
            CartItem,
            FootprintEntry,
            RegisterRequest,
            LoginRequest,
            TokenPair,
            AccessToken,
            RevokedResponse,
            SecretAnswer,
            UserList,
            DeletedUsers,
            BasketItemInput,
            CreateBasketRequest,
            BasketList,
            FootprintRequest,
            FootprintReport,
            Meta,
            ApiResponse<TokenPair>,
            ApiResponse<Cart>,
            ApiResponse<BasketList>,
            ApiResponse<FootprintReport>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and token lifecycle"),
        (name = "Users", description = "User administration"),
        (name = "Baskets", description = "Shopping basket endpoints"),
        (name = "Footprint", description = "Carbon footprint reports"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
