//! Route handlers

pub mod user;
