//! Membership Model
//!
//! A membership pairs a user identity with a tenant and exactly one role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::model::{TenantId, UserId};

/// Role within a tenant, plus the platform-wide super-admin role.
///
/// Closed set so allow-list comparisons are checked at compile time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Salon owner
    Owner,
    /// Salon administrator
    Admin,
    /// Front-desk staff
    Secretary,
    /// Booking customer
    Customer,
    /// Platform operator; never tenant-scoped
    SuperAdmin,
}

impl Role {
    /// Stable string form, matching the stored column values
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Secretary => "secretary",
            Self::Customer => "customer",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "secretary" => Ok(Self::Secretary),
            "customer" => Ok(Self::Customer),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error for an unrecognized role string
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Membership row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// Tenant the user belongs to
    pub tenant_id: TenantId,
    /// User identity
    pub user_id: UserId,
    /// The single role for this (user, tenant) pair
    pub role: Role,
    /// When the user was invited/assigned
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Create a membership effective now
    pub fn new(tenant_id: TenantId, user_id: UserId, role: Role) -> Self {
        Self {
            tenant_id,
            user_id,
            role,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            Role::Owner,
            Role::Admin,
            Role::Secretary,
            Role::Customer,
            Role::SuperAdmin,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("stylist".parse::<Role>().is_err());
    }
}
