//! Route definitions for the guest access broker HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(session_routes())
        .merge(content_routes())
        .merge(file_routes())
        .merge(folder_routes())
        .merge(chat_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        // Multipart bodies need headroom over the raw file size.
        .layer(DefaultBodyLimit::max(max_upload + 64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Verification and NDA resign flow (credential-keyed, no session).
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/guest/verify", post(handlers::session::verify))
        .route("/guest/nda", post(handlers::session::nda_details))
        .route("/guest/nda/sign", post(handlers::session::sign_nda))
}

/// Content gateway, roster, activity, and the realtime feed.
fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/guest/content", get(handlers::content::list_content))
        .route("/guest/team", get(handlers::team::list_team))
        .route("/guest/activity", get(handlers::activity::list_activity))
        .route("/guest/ws", get(handlers::ws::ws_feed))
}

/// File actions: upload, download, delete, versions, permissions.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/guest/files", post(handlers::file::upload_file))
        .route(
            "/guest/files/{id}/download",
            get(handlers::file::download_file),
        )
        .route("/guest/download/{token}", get(handlers::file::fetch_download))
        .route("/guest/files/{id}", delete(handlers::file::delete_file))
        .route(
            "/guest/files/{id}/versions",
            get(handlers::file::list_versions),
        )
        .route(
            "/guest/files/{id}/versions/{version}/restore",
            post(handlers::file::restore_version),
        )
        .route(
            "/guest/files/{id}/versions/{version}",
            delete(handlers::file::delete_version),
        )
        .route(
            "/guest/files/{id}/permissions",
            get(handlers::permission::get_permissions),
        )
        .route(
            "/guest/files/{id}/permissions",
            put(handlers::permission::set_permissions),
        )
}

/// Folder actions.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/guest/folders", post(handlers::folder::create_folder))
        .route(
            "/guest/folders/{id}",
            delete(handlers::folder::delete_folder),
        )
}

/// Room chat.
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/guest/messages", get(handlers::message::list_messages))
        .route("/guest/messages", post(handlers::message::send_message))
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
