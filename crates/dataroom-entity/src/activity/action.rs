//! Activity action vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of audited actions, plus a passthrough for slugs this
/// build does not know yet.
///
/// Actions are persisted as their slug strings so that entries written by a
/// newer deployment still render on an older one: an unrecognized slug
/// keeps its text and humanizes for display instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityAction {
    /// A file was uploaded.
    FileUpload,
    /// A file's metadata or content was edited.
    FileEdited,
    /// A file was moved to the recycle bin.
    FileDeleted,
    /// A guest signed the room's NDA.
    NdaSigned,
    /// A guest invite was sent.
    InviteSent,
    /// A team member joined the room.
    MemberAdded,
    /// A chat message was posted.
    MessageSent,
    /// A comment was added.
    CommentAdded,
    /// A file was viewed or downloaded.
    FileViewed,
    /// A new file version was created.
    VersionCreated,
    /// A file was moved between folders.
    FileMoved,
    /// A guest invite was revoked.
    InviteRevoked,
    /// The room was created.
    RoomCreated,
    /// Room settings changed.
    SettingsUpdated,
    /// Any slug outside the known vocabulary.
    Other(String),
}

impl ActivityAction {
    /// Return the action's slug string.
    pub fn as_slug(&self) -> &str {
        match self {
            Self::FileUpload => "file_upload",
            Self::FileEdited => "file_edited",
            Self::FileDeleted => "file_deleted",
            Self::NdaSigned => "nda_signed",
            Self::InviteSent => "invite_sent",
            Self::MemberAdded => "member_added",
            Self::MessageSent => "message_sent",
            Self::CommentAdded => "comment_added",
            Self::FileViewed => "file_viewed",
            Self::VersionCreated => "version_created",
            Self::FileMoved => "file_moved",
            Self::InviteRevoked => "invite_revoked",
            Self::RoomCreated => "room_created",
            Self::SettingsUpdated => "settings_updated",
            Self::Other(slug) => slug,
        }
    }

    /// Human-readable label for this action.
    ///
    /// Unknown slugs degrade to a humanized form of the slug itself.
    pub fn label(&self) -> String {
        match self {
            Self::FileUpload => "File uploaded".to_string(),
            Self::FileEdited => "File edited".to_string(),
            Self::FileDeleted => "File deleted".to_string(),
            Self::NdaSigned => "NDA signed".to_string(),
            Self::InviteSent => "Invite sent".to_string(),
            Self::MemberAdded => "Member added".to_string(),
            Self::MessageSent => "Message sent".to_string(),
            Self::CommentAdded => "Comment added".to_string(),
            Self::FileViewed => "File viewed".to_string(),
            Self::VersionCreated => "Version created".to_string(),
            Self::FileMoved => "File moved".to_string(),
            Self::InviteRevoked => "Invite revoked".to_string(),
            Self::RoomCreated => "Room created".to_string(),
            Self::SettingsUpdated => "Settings updated".to_string(),
            Self::Other(slug) => humanize_slug(slug),
        }
    }
}

impl From<String> for ActivityAction {
    fn from(slug: String) -> Self {
        match slug.as_str() {
            "file_upload" => Self::FileUpload,
            "file_edited" => Self::FileEdited,
            "file_deleted" => Self::FileDeleted,
            "nda_signed" => Self::NdaSigned,
            "invite_sent" => Self::InviteSent,
            "member_added" => Self::MemberAdded,
            "message_sent" => Self::MessageSent,
            "comment_added" => Self::CommentAdded,
            "file_viewed" => Self::FileViewed,
            "version_created" => Self::VersionCreated,
            "file_moved" => Self::FileMoved,
            "invite_revoked" => Self::InviteRevoked,
            "room_created" => Self::RoomCreated,
            "settings_updated" => Self::SettingsUpdated,
            _ => Self::Other(slug),
        }
    }
}

impl From<ActivityAction> for String {
    fn from(action: ActivityAction) -> Self {
        action.as_slug().to_string()
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

/// Turn `some_unknown_slug` into `Some unknown slug`.
fn humanize_slug(slug: &str) -> String {
    let mut out = slug.replace('_', " ");
    if let Some(first) = out.get(..1) {
        let upper = first.to_uppercase();
        out.replace_range(..1, &upper);
    }
    out
}
