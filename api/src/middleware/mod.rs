//! Request middleware
//!
//! Gate order on a protected route: API key, then bearer token, then (where
//! required) the admin flag. In actix the last `.wrap()` runs first, so a
//! route is wrapped admin-first and the API key gate sits on the scope.

pub mod admin;
pub mod api_key;
pub mod auth;
pub mod cors;
pub mod security;

pub use admin::RequireAdmin;
pub use api_key::ApiKeyAuth;
pub use auth::{AuthContext, JwtAuth};
pub use cors::create_cors;
pub use security::SecurityMiddleware;
