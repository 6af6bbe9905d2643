//! Verification and NDA resign flow.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_verify_with_wrong_passcode_fails_with_message() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;

    let response = app
        .request(
            "POST",
            "/api/guest/verify",
            Some(serde_json::json!({ "email": "a@x.com", "passcode": "WRONG123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let message = response.body["message"].as_str().expect("message");
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_verify_empty_fields_rejected_before_lookup() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/guest/verify",
            Some(serde_json::json!({ "email": "not-an-email", "passcode": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_verify_success_returns_session_and_root_listing() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;

    let response = app
        .request(
            "POST",
            "/api/guest/verify",
            Some(serde_json::json!({ "email": "a@x.com", "passcode": "AB12CD34" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["guest_name"], "Alice");
    assert_eq!(data["room"]["name"], "Deal Room");
    assert_eq!(data["room"]["organization_name"], "Acme Corp");
    assert!(data["session_token"].as_str().is_some());
    assert!(data["content"]["files"].as_array().is_some());
    assert!(data["content"]["current_folder_id"].is_null());
}

#[tokio::test]
async fn test_nda_change_routes_to_resign_then_verify_succeeds() {
    let app = TestApp::new().await;
    // The guest signed revision 1, but the room's NDA is now revision 2.
    let room = app.seed_room("Deal Room", 2).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;

    let response = app
        .request(
            "POST",
            "/api/guest/verify",
            Some(serde_json::json!({ "email": "a@x.com", "passcode": "AB12CD34" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "NDA_UPDATED");
    assert!(response.body["data"].is_null());

    // The secondary lookup still works while locked out, and carries
    // the NDA text the resign screen needs.
    let response = app
        .request(
            "POST",
            "/api/guest/nda",
            Some(serde_json::json!({ "email": "a@x.com", "passcode": "AB12CD34" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let details = &response.body["data"];
    assert_eq!(details["nda_version"], 2);
    assert!(
        !details["nda_content"]
            .as_str()
            .expect("nda_content")
            .is_empty()
    );

    let response = app
        .request(
            "POST",
            "/api/guest/nda/sign",
            Some(serde_json::json!({
                "email": "a@x.com",
                "passcode": "AB12CD34",
                "signer_name": "Alice Example"
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Re-attempting verification now opens a session.
    app.verify("a@x.com", "AB12CD34").await;
}

#[tokio::test]
async fn test_revoked_guest_cannot_verify() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    let guest = app
        .seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;

    sqlx::query("UPDATE guest_invites SET status = 'revoked' WHERE id = $1")
        .bind(guest)
        .execute(&app.db_pool)
        .await
        .expect("revoke");

    let response = app
        .request(
            "POST",
            "/api/guest/verify",
            Some(serde_json::json!({ "email": "a@x.com", "passcode": "AB12CD34" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_archived_room_refuses_guests() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;

    sqlx::query("UPDATE data_rooms SET status = 'archived' WHERE id = $1")
        .bind(room)
        .execute(&app.db_pool)
        .await
        .expect("archive");

    let response = app
        .request(
            "POST",
            "/api/guest/verify",
            Some(serde_json::json!({ "email": "a@x.com", "passcode": "AB12CD34" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticated_calls_require_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/guest/content", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/guest/content", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_nda_change_mid_session_surfaces_on_next_call() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;

    let token = app.verify("a@x.com", "AB12CD34").await;

    // The NDA changes while the guest is browsing.
    sqlx::query("UPDATE data_rooms SET nda_version = 2 WHERE id = $1")
        .bind(room)
        .execute(&app.db_pool)
        .await
        .expect("bump nda");

    let response = app
        .request("GET", "/api/guest/content", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "NDA_UPDATED");
}
