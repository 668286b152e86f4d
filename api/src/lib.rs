//! HTTP layer of the TaskHub verification service
//!
//! Exposed as a library so the integration tests can build the same
//! [`app::create_app`] the binary serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
