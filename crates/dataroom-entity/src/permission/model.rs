//! ACL entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::level::{PermissionLevel, PrincipalType};

/// One principal's grant on a restricted file.
///
/// Entries are consulted only while the file's `is_restricted` flag is set;
/// when restriction is lifted the rows are retained but ignored, so
/// re-enabling restriction restores the prior list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileAclEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The file this grant applies to.
    pub file_id: Uuid,
    /// Whether the principal is a team member or a guest.
    pub principal_type: PrincipalType,
    /// The member or guest-invite ID being granted.
    pub principal_id: Uuid,
    /// Capability granted.
    pub level: PermissionLevel,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create one ACL entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAclEntry {
    /// Whether the principal is a team member or a guest.
    pub principal_type: PrincipalType,
    /// The member or guest-invite ID being granted.
    pub principal_id: Uuid,
    /// Capability granted.
    pub level: PermissionLevel,
}
