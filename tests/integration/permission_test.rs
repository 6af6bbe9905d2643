//! Per-file ACL management: uploader gating, grants, optimistic locking.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_acl_read_requires_being_the_uploader() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    app.seed_guest(room, "b@x.com", "Bob", "EF56GH78", Some(1))
        .await;
    let alice = app.verify("a@x.com", "AB12CD34").await;
    let bob = app.verify("b@x.com", "EF56GH78").await;

    let response = app.upload(&alice, None, "terms.pdf", b"pdf").await;
    let file_id = response.body["data"]["id"].as_str().expect("id").to_string();

    // Bob can view the (unrestricted) file but may not inspect its ACL —
    // and the refusal is distinguishable from "file not found".
    let response = app
        .request(
            "GET",
            &format!("/api/guest/files/{file_id}/permissions"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");

    let response = app
        .request(
            "GET",
            &format!("/api/guest/files/{}/permissions", Uuid::new_v4()),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // The uploader reads the full state plus the principals to pick from.
    let response = app
        .request(
            "GET",
            &format!("/api/guest/files/{file_id}/permissions"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["is_restricted"], false);
    assert_eq!(data["acl_version"], 0);
    assert!(data["entries"].as_array().expect("entries").is_empty());

    // The uploader is not offered as a grantee of their own file.
    let guests = data["available_guests"].as_array().expect("guests");
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0]["name"], "Bob");
}

#[tokio::test]
async fn test_granting_a_guest_restores_visibility_at_the_granted_level() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let bob_id = app
        .seed_guest(room, "b@x.com", "Bob", "EF56GH78", Some(1))
        .await;
    let alice = app.verify("a@x.com", "AB12CD34").await;
    let bob = app.verify("b@x.com", "EF56GH78").await;

    let response = app.upload(&alice, None, "model.xlsx", b"numbers").await;
    let file_id = response.body["data"]["id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(serde_json::json!({
                "is_restricted": true,
                "entries": [
                    { "type": "guest", "reference_id": bob_id, "permission_level": "view" }
                ],
                "acl_version": 0
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["acl_version"], 1);

    let response = app
        .request("GET", "/api/guest/content", None, Some(&bob))
        .await;
    let files = response.body["data"]["files"].as_array().expect("files");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["permission_level"], "view");
    assert_eq!(files[0]["is_own_upload"], false);

    // Elevating the grant to edit changes Bob's projected level.
    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(serde_json::json!({
                "is_restricted": true,
                "entries": [
                    { "type": "guest", "reference_id": bob_id, "permission_level": "edit" }
                ],
                "acl_version": 1
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/guest/content", None, Some(&bob))
        .await;
    let files = response.body["data"]["files"].as_array().expect("files");
    assert_eq!(files[0]["permission_level"], "edit");
}

#[tokio::test]
async fn test_set_permissions_is_idempotent_for_identical_payloads() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let bob_id = app
        .seed_guest(room, "b@x.com", "Bob", "EF56GH78", Some(1))
        .await;
    let alice = app.verify("a@x.com", "AB12CD34").await;

    let response = app.upload(&alice, None, "list.csv", b"rows").await;
    let file_id = response.body["data"]["id"].as_str().expect("id").to_string();

    let payload = |acl_version: i64| {
        serde_json::json!({
            "is_restricted": true,
            "entries": [
                { "type": "guest", "reference_id": bob_id, "permission_level": "view" }
            ],
            "acl_version": acl_version
        })
    };

    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(payload(0)),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Re-sending the same desired state with the fresh version converges
    // on the same result instead of accumulating duplicate entries.
    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(payload(1)),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/guest/files/{file_id}/permissions"),
            None,
            Some(&alice),
        )
        .await;
    let data = &response.body["data"];
    let entries = data["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["reference_id"], bob_id.to_string());
    assert_eq!(entries[0]["permission_level"], "view");
    assert_eq!(entries[0]["name"], "Bob");
}

#[tokio::test]
async fn test_stale_acl_version_is_rejected_as_a_conflict() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let bob_id = app
        .seed_guest(room, "b@x.com", "Bob", "EF56GH78", Some(1))
        .await;
    let alice = app.verify("a@x.com", "AB12CD34").await;

    let response = app.upload(&alice, None, "deck.pptx", b"slides").await;
    let file_id = response.body["data"]["id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(serde_json::json!({
                "is_restricted": true,
                "entries": [
                    { "type": "guest", "reference_id": bob_id, "permission_level": "view" }
                ],
                "acl_version": 0
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // A second tab still holding version 0 loses the race visibly.
    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(serde_json::json!({
                "is_restricted": false,
                "entries": [],
                "acl_version": 0
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");

    // The losing write changed nothing.
    let response = app
        .request(
            "GET",
            &format!("/api/guest/files/{file_id}/permissions"),
            None,
            Some(&alice),
        )
        .await;
    assert_eq!(response.body["data"]["is_restricted"], true);
    assert_eq!(response.body["data"]["acl_version"], 1);
}

#[tokio::test]
async fn test_unrestricting_retains_grants_for_later_restriction() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let bob_id = app
        .seed_guest(room, "b@x.com", "Bob", "EF56GH78", Some(1))
        .await;
    app.seed_guest(room, "c@x.com", "Cara", "JK90MN12", Some(1))
        .await;
    let alice = app.verify("a@x.com", "AB12CD34").await;
    let bob = app.verify("b@x.com", "EF56GH78").await;
    let cara = app.verify("c@x.com", "JK90MN12").await;

    let response = app.upload(&alice, None, "memo.docx", b"text").await;
    let file_id = response.body["data"]["id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(serde_json::json!({
                "is_restricted": true,
                "entries": [
                    { "type": "guest", "reference_id": bob_id, "permission_level": "view" }
                ],
                "acl_version": 0
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Lifting restriction: everyone regains default access; the stored
    // grant list is retained but no longer consulted.
    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(serde_json::json!({
                "is_restricted": false,
                "entries": [],
                "acl_version": 1
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/guest/content", None, Some(&cara))
        .await;
    assert_eq!(
        response.body["data"]["files"]
            .as_array()
            .expect("files")
            .len(),
        1
    );

    // Re-enabling without resending entries restores the retained list:
    // Bob keeps access, Cara loses it again.
    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(serde_json::json!({
                "is_restricted": true,
                "entries": [],
                "acl_version": 2
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/guest/content", None, Some(&bob))
        .await;
    assert_eq!(
        response.body["data"]["files"]
            .as_array()
            .expect("files")
            .len(),
        1
    );

    let response = app
        .request("GET", "/api/guest/content", None, Some(&cara))
        .await;
    assert!(
        response.body["data"]["files"]
            .as_array()
            .expect("files")
            .is_empty()
    );

    let response = app
        .request(
            "GET",
            &format!("/api/guest/files/{file_id}/permissions"),
            None,
            Some(&alice),
        )
        .await;
    let entries = response.body["data"]["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["reference_id"], bob_id.to_string());
}

#[tokio::test]
async fn test_grants_to_principals_outside_the_room_are_rejected() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let alice = app.verify("a@x.com", "AB12CD34").await;

    let response = app.upload(&alice, None, "notes.txt", b"notes").await;
    let file_id = response.body["data"]["id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(serde_json::json!({
                "is_restricted": true,
                "entries": [
                    { "type": "guest", "reference_id": Uuid::new_v4(), "permission_level": "view" }
                ],
                "acl_version": 0
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
