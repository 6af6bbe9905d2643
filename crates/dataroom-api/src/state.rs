//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use dataroom_auth::passcode::PasscodeHasher;
use dataroom_auth::token::codec::SessionTokenCodec;
use dataroom_auth::token::download::DownloadTokenSigner;
use dataroom_core::config::AppConfig;
use dataroom_realtime::RealtimeHub;
use dataroom_storage::StorageManager;

use dataroom_service::activity::ActivityService;
use dataroom_service::chat::ChatService;
use dataroom_service::content::ContentService;
use dataroom_service::file::{DownloadService, FileService, UploadService};
use dataroom_service::folder::FolderService;
use dataroom_service::permission::PermissionService;
use dataroom_service::roster::RosterService;
use dataroom_service::session::SessionService;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Storage provider manager
    pub storage_manager: Arc<StorageManager>,
    /// Per-room realtime hub
    pub realtime: Arc<RealtimeHub>,

    // ── Auth primitives ──────────────────────────────────────
    /// Passcode hasher (Argon2id)
    pub passcode_hasher: Arc<PasscodeHasher>,
    /// Guest session token codec
    pub token_codec: Arc<SessionTokenCodec>,
    /// Download URL signer
    pub download_signer: Arc<DownloadTokenSigner>,

    // ── Services ─────────────────────────────────────────────
    /// Session verifier and NDA flow
    pub session_service: Arc<SessionService>,
    /// Content & permission gateway
    pub content_service: Arc<ContentService>,
    /// Per-file ACL management
    pub permission_service: Arc<PermissionService>,
    /// Upload handling
    pub upload_service: Arc<UploadService>,
    /// Download URL issuance and fetch
    pub download_service: Arc<DownloadService>,
    /// Delete and version history
    pub file_service: Arc<FileService>,
    /// Folder actions
    pub folder_service: Arc<FolderService>,
    /// Room chat
    pub chat_service: Arc<ChatService>,
    /// Activity feed
    pub activity_service: Arc<ActivityService>,
    /// Team/guest roster
    pub roster_service: Arc<RosterService>,
}
