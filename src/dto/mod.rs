pub mod auth;
pub mod baskets;
pub mod footprint;

/// Width of the `VARCHAR` columns backing usernames and product fields.
pub(crate) const MAX_TEXT_LEN: usize = 120;
