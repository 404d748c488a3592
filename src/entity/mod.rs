pub mod cart_items;
pub mod carts;
pub mod revoked_tokens;
pub mod users;

pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use revoked_tokens::Entity as RevokedTokens;
pub use users::Entity as Users;
