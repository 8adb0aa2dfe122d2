//! Error types for GlowDesk

use thiserror::Error;

/// GlowDesk error type
#[derive(Error, Debug)]
pub enum GlowError {
    /// Configuration error
    #[error("config error: {0}")]
    ConfigError(String),

    /// Backing store unreachable or failed
    #[error("storage error: {0}")]
    StorageError(String),

    /// Authentication failed
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Tenant not found
    #[error("tenant not found: {0}")]
    TenantNotFound(String),

    /// Tenant exists but is not serving traffic
    #[error("tenant suspended: {0}")]
    TenantSuspended(String),

    /// No membership for the (user, tenant) pair
    #[error("membership not found")]
    MembershipNotFound,

    /// A directory lookup exceeded its time bound
    #[error("lookup timed out")]
    LookupTimeout,
}

/// Result type for GlowDesk
pub type GlowResult<T> = Result<T, GlowError>;
