//! Download URL issuance and signed-token fetch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use dataroom_auth::token::download::{DownloadClaims, DownloadMode, DownloadTokenSigner};
use dataroom_core::error::AppError;
use dataroom_core::traits::storage::ByteStream;
use dataroom_entity::activity::ActivityAction;
use dataroom_storage::StorageManager;

use crate::activity::ActivityService;
use crate::context::GuestContext;
use crate::permission::FileAccessResolver;

/// A time-limited download URL handed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedDownload {
    /// The URL to fetch; the embedded token is the entire authorization.
    pub download_url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Issues download URLs and serves signed-token fetches.
///
/// Two variants exist: `final` serves the original as an attachment,
/// `preview` serves the same bytes inline so the browser can render them
/// (print-to-PDF path). There is no server-side format conversion.
#[derive(Debug, Clone)]
pub struct DownloadService {
    /// Access resolver (per-file view checks).
    resolver: Arc<FileAccessResolver>,
    /// Download token signer.
    signer: Arc<DownloadTokenSigner>,
    /// Storage manager.
    storage: Arc<StorageManager>,
    /// Activity recorder.
    activity: Arc<ActivityService>,
    /// Externally visible base URL.
    public_base_url: String,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        resolver: Arc<FileAccessResolver>,
        signer: Arc<DownloadTokenSigner>,
        storage: Arc<StorageManager>,
        activity: Arc<ActivityService>,
        public_base_url: String,
    ) -> Self {
        Self {
            resolver,
            signer,
            storage,
            activity,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issues a time-limited URL for a file the guest may view.
    pub async fn issue(
        &self,
        ctx: &GuestContext,
        file_id: Uuid,
        mode: DownloadMode,
    ) -> Result<IssuedDownload, AppError> {
        let file = self.resolver.require_view(ctx, file_id).await?;

        let (token, expires_at) =
            self.signer
                .sign(file.id, &file.storage_path, &file.name, mode)?;

        info!(guest_id = %ctx.guest_id, file_id = %file.id, ?mode, "Issued download URL");

        self.activity
            .record(
                ctx,
                ActivityAction::FileViewed,
                Some(serde_json::json!({ "file": file.name })),
            )
            .await;

        Ok(IssuedDownload {
            download_url: format!("{}/api/guest/download/{token}", self.public_base_url),
            expires_at,
        })
    }

    /// Serves the bytes behind a signed download token.
    ///
    /// No session is required: the token was minted after an access check
    /// and expires on its own.
    pub async fn fetch(&self, token: &str) -> Result<(DownloadClaims, ByteStream), AppError> {
        let claims = self.signer.verify(token)?;
        let stream = self.storage.provider().read(&claims.path).await?;
        Ok((claims, stream))
    }
}
