//! # TaskHub Core
//!
//! Core business logic and domain layer for the TaskHub backend.
//! This crate contains domain entities, the token codec, the contact-channel
//! verification workflows, repository and port interfaces, and the error
//! types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{InMemoryUserRepository, UserRepository};
pub use services::{
    EmailVerificationService, EphemeralStore, NotificationDispatcher, NotificationPort,
    PhoneVerificationService, TokenCodec, TokenCodecConfig, VerificationServiceConfig,
    VerifiedEmail,
};
