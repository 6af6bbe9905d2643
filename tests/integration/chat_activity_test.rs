//! Room chat, the activity feed, and the team roster.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_messages_append_and_list_in_order() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let token = app.verify("a@x.com", "AB12CD34").await;

    let response = app
        .request(
            "POST",
            "/api/guest/messages",
            Some(serde_json::json!({ "message": "Hello team" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["sender_name"], "Alice");
    assert_eq!(response.body["data"]["is_guest"], true);

    let response = app
        .request(
            "POST",
            "/api/guest/messages",
            Some(serde_json::json!({ "message": "Any update on the Q3 numbers?" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/guest/messages", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let messages = response.body["data"].as_array().expect("messages");
    assert_eq!(messages.len(), 2);
    // Chronological: oldest first.
    assert_eq!(messages[0]["body"], "Hello team");
    assert_eq!(messages[1]["body"], "Any update on the Q3 numbers?");
}

#[tokio::test]
async fn test_empty_message_is_a_validation_error() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let token = app.verify("a@x.com", "AB12CD34").await;

    let response = app
        .request(
            "POST",
            "/api/guest/messages",
            Some(serde_json::json!({ "message": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    // Whitespace-only bodies are rejected too.
    let response = app
        .request(
            "POST",
            "/api/guest/messages",
            Some(serde_json::json!({ "message": "   " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_since_filter_returns_only_newer_messages() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let token = app.verify("a@x.com", "AB12CD34").await;

    let response = app
        .request(
            "POST",
            "/api/guest/messages",
            Some(serde_json::json!({ "message": "first" })),
            Some(&token),
        )
        .await;
    let watermark = response.body["data"]["created_at"]
        .as_str()
        .expect("created_at")
        .to_string();

    let response = app
        .request(
            "POST",
            "/api/guest/messages",
            Some(serde_json::json!({ "message": "second" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let since = watermark.replace('+', "%2B");
    let response = app
        .request(
            "GET",
            &format!("/api/guest/messages?since={since}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let messages = response.body["data"].as_array().expect("messages");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["body"], "second");
}

#[tokio::test]
async fn test_activity_records_guest_actions_newest_first() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let token = app.verify("a@x.com", "AB12CD34").await;

    let response = app.upload(&token, None, "report.pdf", b"pdf").await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/guest/messages",
            Some(serde_json::json!({ "message": "uploaded the report" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/guest/activity", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let entries = response.body["data"].as_array().expect("entries");
    assert_eq!(entries.len(), 2);

    // Newest first: the message postdates the upload.
    assert_eq!(entries[0]["action"], "message_sent");
    assert_eq!(entries[0]["action_label"], "Message sent");
    assert_eq!(entries[1]["action"], "file_upload");
    assert_eq!(entries[1]["action_label"], "File uploaded");
    assert_eq!(entries[1]["actor_name"], "Alice");
    assert_eq!(entries[1]["is_guest"], true);
    assert_eq!(entries[1]["details"]["file"], "report.pdf");
}

#[tokio::test]
async fn test_unknown_activity_action_humanizes_instead_of_erroring() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let token = app.verify("a@x.com", "AB12CD34").await;

    // An entry written by a newer deployment with a slug this build does
    // not know.
    sqlx::query(
        "INSERT INTO activity_log (room_id, actor_name, actor_email, is_guest, action) \
         VALUES ($1, 'Team Bot', 'bot@acme.com', FALSE, 'watermark_applied')",
    )
    .bind(room)
    .execute(&app.db_pool)
    .await
    .expect("seed activity");

    let response = app
        .request("GET", "/api/guest/activity", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let entries = response.body["data"].as_array().expect("entries");
    assert_eq!(entries[0]["action"], "watermark_applied");
    assert_eq!(entries[0]["action_label"], "Watermark applied");
}

#[tokio::test]
async fn test_nda_signing_lands_in_the_activity_feed() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 2).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;

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

    let token = app.verify("a@x.com", "AB12CD34").await;
    let response = app
        .request("GET", "/api/guest/activity", None, Some(&token))
        .await;
    let entries = response.body["data"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "nda_signed");
    assert_eq!(entries[0]["details"]["nda_version"], 2);
}

#[tokio::test]
async fn test_team_roster_lists_members_and_active_guests() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_member(room, "Dana Lee", "dana@acme.com").await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let revoked = app
        .seed_guest(room, "r@x.com", "Rex", "QR34ST56", Some(1))
        .await;
    sqlx::query("UPDATE guest_invites SET status = 'revoked' WHERE id = $1")
        .bind(revoked)
        .execute(&app.db_pool)
        .await
        .expect("revoke");

    let token = app.verify("a@x.com", "AB12CD34").await;
    let response = app
        .request("GET", "/api/guest/team", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let members = response.body["data"]["members"].as_array().expect("members");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["user_name"], "Dana Lee");

    // Revoked invites never show in the roster.
    let guests = response.body["data"]["guests"].as_array().expect("guests");
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0]["name"], "Alice");
}
