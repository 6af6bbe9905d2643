//! Content gateway: listing, breadcrumbs, visibility filtering.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_listing_shows_uploaded_file_after_refetch() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let token = app.verify("a@x.com", "AB12CD34").await;

    let response = app.upload(&token, None, "report.pdf", b"pdf bytes").await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let response = app
        .request("GET", "/api/guest/content", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let files = response.body["data"]["files"].as_array().expect("files");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "report.pdf");
    assert_eq!(files[0]["is_own_upload"], true);
    assert_eq!(files[0]["permission_level"], "edit");
}

#[tokio::test]
async fn test_breadcrumbs_resolve_full_ancestry_server_side() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let token = app.verify("a@x.com", "AB12CD34").await;

    let response = app
        .request(
            "POST",
            "/api/guest/folders",
            Some(serde_json::json!({ "name": "Financials" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let outer: Uuid = response.body["data"]["id"]
        .as_str()
        .expect("id")
        .parse()
        .expect("uuid");

    let response = app
        .request(
            "POST",
            "/api/guest/folders",
            Some(serde_json::json!({ "name": "Q3", "parent_id": outer })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let inner: Uuid = response.body["data"]["id"]
        .as_str()
        .expect("id")
        .parse()
        .expect("uuid");

    let response = app
        .request(
            "GET",
            &format!("/api/guest/content?folder_id={inner}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let crumbs = response.body["data"]["breadcrumbs"]
        .as_array()
        .expect("breadcrumbs");
    let names: Vec<&str> = crumbs
        .iter()
        .map(|c| c["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Financials", "Q3"]);

    let all_folders = response.body["data"]["all_folders"]
        .as_array()
        .expect("all_folders");
    assert_eq!(all_folders.len(), 2);
}

#[tokio::test]
async fn test_restricted_file_absent_for_ungranted_guest() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    app.seed_guest(room, "b@x.com", "Bob", "EF56GH78", Some(1))
        .await;

    let alice = app.verify("a@x.com", "AB12CD34").await;
    let bob = app.verify("b@x.com", "EF56GH78").await;

    let response = app.upload(&alice, None, "secret.xlsx", b"numbers").await;
    assert_eq!(response.status, StatusCode::OK);
    let file_id = response.body["data"]["id"].as_str().expect("id").to_string();

    // Restrict with an empty grant list: only the uploader may see it.
    let response = app
        .request(
            "PUT",
            &format!("/api/guest/files/{file_id}/permissions"),
            Some(serde_json::json!({
                "is_restricted": true,
                "entries": [],
                "acl_version": 0
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // Absent for Bob — not merely marked inaccessible.
    let response = app
        .request("GET", "/api/guest/content", None, Some(&bob))
        .await;
    let files = response.body["data"]["files"].as_array().expect("files");
    assert!(files.is_empty());

    // Still visible to the uploader, flagged as their own.
    let response = app
        .request("GET", "/api/guest/content", None, Some(&alice))
        .await;
    let files = response.body["data"]["files"].as_array().expect("files");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["is_own_upload"], true);
    assert_eq!(files[0]["is_restricted"], true);
}

#[tokio::test]
async fn test_unrestricted_file_grants_view_to_every_participant() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    app.seed_guest(room, "b@x.com", "Bob", "EF56GH78", Some(1))
        .await;

    let alice = app.verify("a@x.com", "AB12CD34").await;
    let bob = app.verify("b@x.com", "EF56GH78").await;

    let response = app.upload(&alice, None, "open.pdf", b"public").await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/guest/content", None, Some(&bob))
        .await;
    let files = response.body["data"]["files"].as_array().expect("files");
    assert_eq!(files.len(), 1);
    // Own-upload is relative to the requesting guest.
    assert_eq!(files[0]["is_own_upload"], false);
    assert_eq!(files[0]["permission_level"], "view");
}

#[tokio::test]
async fn test_seq_is_echoed_for_client_side_ordering() {
    let app = TestApp::new().await;
    let room = app.seed_room("Deal Room", 1).await;
    app.seed_guest(room, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    let token = app.verify("a@x.com", "AB12CD34").await;

    let response = app
        .request("GET", "/api/guest/content?seq=42", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["seq"], 42);
}

#[tokio::test]
async fn test_foreign_room_folder_reads_as_not_found() {
    let app = TestApp::new().await;
    let room_a = app.seed_room("Room A", 1).await;
    let room_b = app.seed_room("Room B", 1).await;
    app.seed_guest(room_a, "a@x.com", "Alice", "AB12CD34", Some(1))
        .await;
    app.seed_guest(room_b, "b@x.com", "Bob", "EF56GH78", Some(1))
        .await;

    let bob = app.verify("b@x.com", "EF56GH78").await;
    let alice = app.verify("a@x.com", "AB12CD34").await;

    let response = app
        .request(
            "POST",
            "/api/guest/folders",
            Some(serde_json::json!({ "name": "Private" })),
            Some(&alice),
        )
        .await;
    let folder = response.body["data"]["id"].as_str().expect("id").to_string();

    let response = app
        .request(
            "GET",
            &format!("/api/guest/content?folder_id={folder}"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
