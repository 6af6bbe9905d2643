//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Guest verification request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    /// Guest email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// One-time passcode from the invite.
    #[validate(length(min = 1, message = "Passcode is required"))]
    pub passcode: String,
    /// Folder to land in (defaults to the room root).
    pub folder_id: Option<Uuid>,
}

/// NDA details lookup request body (resign flow).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NdaDetailsRequest {
    /// Guest email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// One-time passcode from the invite.
    #[validate(length(min = 1, message = "Passcode is required"))]
    pub passcode: String,
}

/// NDA signing request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignNdaRequest {
    /// Guest email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// One-time passcode from the invite.
    #[validate(length(min = 1, message = "Passcode is required"))]
    pub passcode: String,
    /// Name the guest types to sign.
    #[validate(length(min = 1, message = "Please type your name to sign"))]
    pub signer_name: String,
}

/// Content listing query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentQuery {
    /// Folder to list (absent = room root).
    pub folder_id: Option<Uuid>,
    /// Client request sequence number, echoed back verbatim.
    pub seq: Option<u64>,
}

/// Folder creation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder (absent = room root).
    pub parent_id: Option<Uuid>,
}

/// Download URL issuance query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadQuery {
    /// `preview` (inline) or `final` (attachment). Defaults to `final`.
    pub mode: Option<String>,
}

/// One desired grant in a permission write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AclEntryInput {
    /// `team` or `guest`.
    #[serde(rename = "type")]
    pub principal_type: String,
    /// The member or guest being granted.
    pub reference_id: Uuid,
    /// `view` or `edit`.
    pub permission_level: String,
}

/// Permission replacement request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPermissionsRequest {
    /// Whether the file should be restricted.
    pub is_restricted: bool,
    /// The complete desired grant set.
    #[serde(default)]
    pub entries: Vec<AclEntryInput>,
    /// The `acl_version` read from the permissions dialog.
    pub acl_version: i32,
}

/// Message listing query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesQuery {
    /// Only return messages created after this instant.
    pub since: Option<DateTime<Utc>>,
}

/// Message send request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Message text.
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
}

/// WebSocket feed query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsQuery {
    /// Guest session token (browsers cannot set headers on WS upgrades).
    pub token: String,
}
