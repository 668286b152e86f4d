//! Token codec module for signed tokens
//!
//! This module handles every token the backend signs:
//! - Bearer session tokens carrying the principal
//! - Purpose-scoped email verification tokens
//! - URL-safe transport encoding for verification links

mod codec;
mod config;


pub use codec::{decode_transport, encode_transport, TokenCodec};
pub use config::TokenCodecConfig;
