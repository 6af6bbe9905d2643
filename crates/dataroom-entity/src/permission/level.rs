//! ACL enumeration types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-principal, per-file capability.
///
/// Ordered by privilege: Edit > View.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "permission_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Read-only access.
    View,
    /// Can replace content (new versions) in addition to viewing.
    Edit,
}

impl PermissionLevel {
    /// Check if this level allows write operations.
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Edit)
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = dataroom_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            _ => Err(dataroom_core::AppError::validation(format!(
                "Invalid permission level: '{s}'. Expected one of: view, edit"
            ))),
        }
    }
}

/// The kind of principal an ACL entry grants to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "principal_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PrincipalType {
    /// A team member of the owning organization.
    Team,
    /// An invited external guest.
    Guest,
}

impl PrincipalType {
    /// Return the principal type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrincipalType {
    type Err = dataroom_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "team" => Ok(Self::Team),
            "guest" => Ok(Self::Guest),
            _ => Err(dataroom_core::AppError::validation(format!(
                "Invalid principal type: '{s}'. Expected one of: team, guest"
            ))),
        }
    }
}
