//! Database module - MySQL implementations using SQLx
//!
//! This module provides the connection pool and the MySQL-backed
//! [`UserRepository`](th_core::repositories::UserRepository).

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlUserRepository;
