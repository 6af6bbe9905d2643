//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use dataroom_core::config::AppConfig;

/// Test application context.
pub struct TestApp {
    /// The axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries and seeding.
    pub db_pool: PgPool,
    /// Application config.
    pub config: AppConfig,
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

impl TestApp {
    /// Create a new test application with a clean database.
    pub async fn new() -> Self {
        let config = AppConfig::load_file("tests/fixtures/test_config.toml")
            .expect("Failed to load test config");

        let db = dataroom_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");

        dataroom_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let db_pool = db.into_pool();
        Self::clean_database(&db_pool).await;

        let storage_manager = Arc::new(
            dataroom_storage::StorageManager::new(&config.storage)
                .await
                .expect("Failed to init storage"),
        );

        let room_repo = Arc::new(dataroom_database::repositories::room::RoomRepository::new(
            db_pool.clone(),
        ));
        let guest_repo = Arc::new(
            dataroom_database::repositories::guest::GuestRepository::new(db_pool.clone()),
        );
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

        let passcode_hasher = Arc::new(dataroom_auth::passcode::PasscodeHasher::new());
        let token_codec = Arc::new(dataroom_auth::token::codec::SessionTokenCodec::new(
            &config.auth,
        ));
        let download_signer = Arc::new(dataroom_auth::token::download::DownloadTokenSigner::new(
            &config.auth,
        ));

        let realtime = Arc::new(dataroom_realtime::RealtimeHub::new(&config.realtime));

        let activity_service = Arc::new(dataroom_service::activity::ActivityService::new(
            Arc::clone(&activity_repo),
        ));
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

        let app_state = dataroom_api::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
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

        let router = dataroom_api::router::build_router(app_state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database.
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "activity_log",
            "messages",
            "file_acl_entries",
            "file_versions",
            "files",
            "folders",
            "members",
            "guest_invites",
            "data_rooms",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Seed a data room and return its ID.
    pub async fn seed_room(&self, name: &str, nda_version: i32) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"INSERT INTO data_rooms (id, name, organization_id, organization_name, nda_version, nda_content)
               VALUES ($1, $2, $3, 'Acme Corp', $4, 'You agree to keep everything confidential.')"#,
        )
        .bind(id)
        .bind(name)
        .bind(Uuid::new_v4())
        .bind(nda_version)
        .execute(&self.db_pool)
        .await
        .expect("Failed to seed room");
        id
    }

    /// Seed a guest invite and return its ID.
    pub async fn seed_guest(
        &self,
        room_id: Uuid,
        email: &str,
        name: &str,
        passcode: &str,
        nda_signed_version: Option<i32>,
    ) -> Uuid {
        let hasher = dataroom_auth::passcode::PasscodeHasher::new();
        let hash = hasher.hash(passcode).expect("Failed to hash passcode");
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO guest_invites (id, room_id, email, display_name, passcode_hash, nda_signed_version, nda_signed_at)
               VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $6 IS NULL THEN NULL ELSE NOW() END)"#,
        )
        .bind(id)
        .bind(room_id)
        .bind(email)
        .bind(name)
        .bind(&hash)
        .bind(nda_signed_version)
        .execute(&self.db_pool)
        .await
        .expect("Failed to seed guest");
        id
    }

    /// Seed a team member and return their ID.
    pub async fn seed_member(&self, room_id: Uuid, name: &str, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO members (id, room_id, user_name, email) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(room_id)
        .bind(name)
        .bind(email)
        .execute(&self.db_pool)
        .await
        .expect("Failed to seed member");
        id
    }

    /// Verify a guest and return their session token.
    pub async fn verify(&self, email: &str, passcode: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/guest/verify",
                Some(serde_json::json!({ "email": email, "passcode": passcode })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Verification failed: {:?}",
            response.body
        );

        response.body["data"]["session_token"]
            .as_str()
            .expect("No session_token in verify response")
            .to_string()
    }

    /// Make a JSON HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_bytes = body
            .map(|b| serde_json::to_vec(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.request_raw(method, path, "application/json", body_bytes, token)
            .await
    }

    /// Upload one file through the multipart endpoint.
    pub async fn upload(
        &self,
        token: &str,
        folder_id: Option<Uuid>,
        filename: &str,
        content: &[u8],
    ) -> TestResponse {
        let boundary = "----dataroomtestboundary";
        let mut body = Vec::new();

        if let Some(folder_id) = folder_id {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n{folder_id}\r\n"
                )
                .as_bytes(),
            );
        }

        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        self.request_raw(
            "POST",
            "/api/guest/files",
            &format!("multipart/form-data; boundary={boundary}"),
            body,
            Some(token),
        )
        .await
    }

    /// Make a raw HTTP request to the test app.
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Fetch a raw (non-JSON) response body, e.g. a download.
    pub async fn fetch_bytes(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        (status, body.to_vec())
    }
}
