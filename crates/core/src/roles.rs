//! Staff roles and their dashboard paths.
//!
//! Role names must match the `role` field returned by the backend's
//! `/auth/login` and `/me` endpoints.

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_NURSE: &str = "nurse";
pub const ROLE_CASHIER: &str = "cashier";
pub const ROLE_DOCTOR: &str = "doctor";

/// Login page path.
pub const LOGIN_PATH: &str = "/auth/login";

/// Prefix of every role-scoped page.
pub const DASHBOARD_PREFIX: &str = "/dashboard";

/// Shared management pages, reachable by every role.
pub const MANAGEMENT_PREFIX: &str = "/dashboard/management";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Nurse,
    Cashier,
    Doctor,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Nurse, Role::Cashier, Role::Doctor];

    /// Parse a backend role name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ROLE_ADMIN => Some(Self::Admin),
            ROLE_NURSE => Some(Self::Nurse),
            ROLE_CASHIER => Some(Self::Cashier),
            ROLE_DOCTOR => Some(Self::Doctor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Nurse => ROLE_NURSE,
            Self::Cashier => ROLE_CASHIER,
            Self::Doctor => ROLE_DOCTOR,
        }
    }

    /// Landing page for this role.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Self::Admin => "/dashboard/admin",
            Self::Nurse => "/dashboard/nurse",
            Self::Cashier => "/dashboard/cashier",
            Self::Doctor => "/dashboard/doctor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
