//! Repository interfaces and in-process implementations.

pub mod user;

pub use user::{InMemoryUserRepository, UserRepository};
