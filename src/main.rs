//! Vantage Dataroom — Guest Access Broker
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use dataroom_core::config::AppConfig;
use dataroom_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("DATAROOM_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Vantage Dataroom v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = dataroom_database::DatabasePool::connect(&config.database).await?;
    dataroom_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Storage ──────────────────────────────────────────────────
    let storage_manager = Arc::new(dataroom_storage::StorageManager::new(&config.storage).await?);
    tracing::info!("Storage provider initialized");

    // ── Repositories ─────────────────────────────────────────────
    let room_repo = Arc::new(dataroom_database::repositories::room::RoomRepository::new(
        db_pool.clone(),
    ));
    let guest_repo = Arc::new(dataroom_database::repositories::guest::GuestRepository::new(
        db_pool.clone(),
    ));
    let member_repo = Arc::new(
        dataroom_database::repositories::member::MemberRepository::new(db_pool.clone()),
    );
    let folder_repo = Arc::new(
        dataroom_database::repositories::folder::FolderRepository::new(db_pool.clone()),
    );
    let file_repo = Arc::new(dataroom_database::repositories::file::FileRepository::new(
        db_pool.clone(),
    ));
    let acl_repo = Arc::new(
        dataroom_database::repositories::permission::AclRepository::new(db_pool.clone()),
    );
    let message_repo = Arc::new(
        dataroom_database::repositories::message::MessageRepository::new(db_pool.clone()),
    );
    let activity_repo = Arc::new(
        dataroom_database::repositories::activity::ActivityRepository::new(db_pool.clone()),
    );

    // ── Auth primitives ──────────────────────────────────────────
    let passcode_hasher = Arc::new(dataroom_auth::passcode::PasscodeHasher::new());
    let token_codec = Arc::new(dataroom_auth::token::codec::SessionTokenCodec::new(
        &config.auth,
    ));
    let download_signer = Arc::new(dataroom_auth::token::download::DownloadTokenSigner::new(
        &config.auth,
    ));

    // ── Realtime hub ─────────────────────────────────────────────
    let realtime = Arc::new(dataroom_realtime::RealtimeHub::new(&config.realtime));

    // ── Services ─────────────────────────────────────────────────
    let activity_service = Arc::new(dataroom_service::activity::ActivityService::new(Arc::clone(
        &activity_repo,
    )));
    let roster_service = Arc::new(dataroom_service::roster::RosterService::new(
        Arc::clone(&member_repo),
        Arc::clone(&guest_repo),
    ));
    let resolver = Arc::new(dataroom_service::permission::FileAccessResolver::new(
        Arc::clone(&file_repo),
        Arc::clone(&acl_repo),
    ));
    let content_service = Arc::new(dataroom_service::content::ContentService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&file_repo),
        Arc::clone(&acl_repo),
        Arc::clone(&roster_service),
    ));
    let session_service = Arc::new(dataroom_service::session::SessionService::new(
        Arc::clone(&guest_repo),
        Arc::clone(&room_repo),
        Arc::clone(&passcode_hasher),
        Arc::clone(&token_codec),
        Arc::clone(&content_service),
        Arc::clone(&activity_service),
    ));
    let permission_service = Arc::new(dataroom_service::permission::PermissionService::new(
        Arc::clone(&resolver),
        Arc::clone(&acl_repo),
        Arc::clone(&member_repo),
        Arc::clone(&guest_repo),
        Arc::clone(&realtime),
    ));
    let upload_service = Arc::new(dataroom_service::file::UploadService::new(
        Arc::clone(&file_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&resolver),
        Arc::clone(&storage_manager),
        Arc::clone(&activity_service),
        Arc::clone(&realtime),
        config.storage.max_upload_size_bytes,
    ));
    let download_service = Arc::new(dataroom_service::file::DownloadService::new(
        Arc::clone(&resolver),
        Arc::clone(&download_signer),
        Arc::clone(&storage_manager),
        Arc::clone(&activity_service),
        config.server.public_base_url.clone(),
    ));
    let file_service = Arc::new(dataroom_service::file::FileService::new(
        Arc::clone(&file_repo),
        Arc::clone(&resolver),
        Arc::clone(&roster_service),
        Arc::clone(&activity_service),
        Arc::clone(&realtime),
    ));
    let folder_service = Arc::new(dataroom_service::folder::FolderService::new(
        Arc::clone(&folder_repo),
        Arc::clone(&realtime),
    ));
    let chat_service = Arc::new(dataroom_service::chat::ChatService::new(
        Arc::clone(&message_repo),
        Arc::clone(&activity_service),
        Arc::clone(&realtime),
    ));

    tracing::info!("Services initialized");

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = dataroom_api::AppState {
        config: Arc::new(config.clone()),
        db_pool,
        storage_manager,
        realtime,
        passcode_hasher,
        token_codec,
        download_signer,
        session_service,
        content_service,
        permission_service,
        upload_service,
        download_service,
        file_service,
        folder_service,
        chat_service,
        activity_service,
        roster_service,
    };

    let app = dataroom_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Dataroom server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Dataroom server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
