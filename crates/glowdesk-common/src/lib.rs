//! GlowDesk Common - Shared types for the salon platform core
//!
//! This crate provides the pieces every other crate leans on:
//! - Error handling
//! - Platform configuration (root domain, lookup timeouts, session cookie)

#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::PlatformConfig;
pub use error::{GlowError, GlowResult};
