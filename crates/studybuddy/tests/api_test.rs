//! end-to-end tests for the `/api/v1` surface.

mod common;

use axum::http::StatusCode;
use common::{TestApp, empty, get, post_json, upload, with_json};
use serde_json::{Value, json};

/// register a student over http, returning (user id, token).
async fn register(app: &TestApp, username: &str, email: &str) -> (u64, String) {
    let (status, body) = app
        .json(post_json(
            "/api/v1/register",
            None,
            json!({ "username": username, "email": email, "first_name": "Test" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let id = body["user"]["id"].as_u64().expect("user id");
    let token = body["token"].as_str().expect("token").to_string();
    (id, token)
}

/// create a superadmin through the workflow and create one department
/// with one subject over http. returns (admin token, subject id).
async fn seed_catalog(app: &TestApp) -> (String, u64) {
    let admin = app
        .workflow
        .ensure_superadmin("root", None)
        .await
        .expect("bootstrap failed");
    let admin_token = app.token_for(&admin).await;

    let (status, dept) = app
        .json(post_json(
            "/api/v1/departments",
            Some(&admin_token),
            json!({ "name": "Computer Science" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let dept_id = dept["id"].as_u64().expect("department id");

    let (status, subject) = app
        .json(post_json(
            &format!("/api/v1/departments/{dept_id}/subjects"),
            Some(&admin_token),
            json!({ "name": "Operating Systems", "semester": 4 }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    (admin_token, subject["id"].as_u64().expect("subject id"))
}

#[tokio::test]
async fn test_register_and_me() {
    let app = TestApp::new().await;
    let (id, token) = register(&app, "asha", "Asha@Example.edu").await;

    let (status, me) = app.json(get("/api/v1/me", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["id"].as_u64(), Some(id));
    assert_eq!(me["user"]["role"], "student");
    assert_eq!(me["can_upload"], false);

    // same address in another case
    let (status, body) = app
        .json(post_json(
            "/api/v1/register",
            None,
            json!({ "username": "asha2", "email": "asha@example.edu" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // students must give an email
    let (status, _) = app
        .json(post_json(
            "/api/v1/register",
            None,
            json!({ "username": "noemail" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_tokens_are_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.json(get("/api/v1/me", "not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let forged = format!("sbk_{}_{}", "0".repeat(16), "0".repeat(64));
    let (status, _) = app.json(get("/api/v1/me", &forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_review_and_bookmark_flow() {
    let app = TestApp::new().await;
    let (admin_token, subject_id) = seed_catalog(&app).await;
    let (student_id, student_token) = register(&app, "ravi", "ravi@example.edu").await;
    let subject_field = subject_id.to_string();
    let fields = [
        ("subject_id", subject_field.as_str()),
        ("title", "Unit 3 notes"),
        ("resource_type", "note"),
    ];

    // not yet an approved uploader
    let (status, _) = app
        .json(upload(&student_token, &fields, Some(("unit3.pdf", b"%PDF-1.4".as_slice()))))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // staff grant upload rights
    let (status, record) = app
        .json(empty(
            "POST",
            &format!("/api/v1/uploaders/{student_id}"),
            &admin_token,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["is_active"], true);

    let (status, resource) = app
        .json(upload(&student_token, &fields, Some(("unit3.pdf", b"%PDF-1.4".as_slice()))))
        .await;
    assert_eq!(status, StatusCode::CREATED, "upload failed: {resource}");
    assert_eq!(resource["status"], "pending");
    let resource_id = resource["id"].as_u64().expect("resource id");

    // pending uploads are hidden from the public listing
    let listing = format!("/api/v1/subjects/{subject_id}/resources?type=note");
    let (_, listed) = app.json(get(&listing, &student_token)).await;
    assert_eq!(listed, json!([]));

    // students cannot review
    let (status, _) = app
        .json(empty(
            "POST",
            &format!("/api/v1/review/{resource_id}/approve"),
            &student_token,
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, queue) = app.json(get("/api/v1/review", &admin_token)).await;
    assert_eq!(queue.as_array().map(Vec::len), Some(1));

    let (status, approved) = app
        .json(empty(
            "POST",
            &format!("/api/v1/review/{resource_id}/approve"),
            &admin_token,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");

    let (_, listed) = app.json(get(&listing, &student_token)).await;
    assert_eq!(listed[0]["id"].as_u64(), Some(resource_id));

    // the stored file comes back under its original name
    let (status, data) = app
        .send(get(
            &format!("/api/v1/resources/{resource_id}/file"),
            &student_token,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data, b"%PDF-1.4");

    // bookmarks
    let (status, toggled) = app
        .json(post_json(
            "/api/v1/bookmarks/toggle",
            Some(&student_token),
            json!({ "resource_id": resource_id }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["bookmarked"], true);

    let (_, detail) = app
        .json(get(&format!("/api/v1/subjects/{subject_id}"), &student_token))
        .await;
    assert_eq!(detail["bookmarked_ids"], json!([resource_id]));
    assert_eq!(detail["is_approved_uploader"], true);
    assert_eq!(detail["notes"].as_array().map(Vec::len), Some(1));

    let (_, toggled) = app
        .json(post_json(
            "/api/v1/bookmarks/toggle",
            Some(&student_token),
            json!({ "resource_id": resource_id }),
        ))
        .await;
    assert_eq!(toggled["bookmarked"], false);

    let (_, status_body) = app.json(get("/api/v1/bookmarks/status", &student_token)).await;
    assert_eq!(status_body["bookmarked_ids"], json!([]));
}

#[tokio::test]
async fn test_upload_validation() {
    let app = TestApp::new().await;
    let (admin_token, subject_id) = seed_catalog(&app).await;
    let subject_field = subject_id.to_string();

    // missing file
    let (status, _) = app
        .json(upload(
            &admin_token,
            &[("subject_id", subject_field.as_str()), ("title", "x")],
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // over the configured limit
    let big = vec![b'a'; 2048];
    let (status, _) = app
        .json(upload(
            &admin_token,
            &[("subject_id", subject_field.as_str()), ("title", "big")],
            Some(("big.bin", big.as_slice())),
        ))
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // unknown subject leaves no file behind
    let (status, _) = app
        .json(upload(
            &admin_token,
            &[("subject_id", "9999"), ("title", "lost")],
            Some(("lost.pdf", b"data".as_slice())),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.stored_files(), 0);

    // staff uploads skip review
    let (status, resource) = app
        .json(upload(
            &admin_token,
            &[
                ("subject_id", subject_field.as_str()),
                ("title", "Midsem paper"),
                ("resource_type", "pyq"),
            ],
            Some(("midsem.pdf", b"paper".as_slice())),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resource["status"], "approved");
    assert_eq!(resource["resource_type"], "pyq");
}

#[tokio::test]
async fn test_refused_upload_writes_nothing() {
    let app = TestApp::new().await;
    let (admin_token, subject_id) = seed_catalog(&app).await;
    let (_, student_token) = register(&app, "tara", "tara@example.edu").await;
    let subject_field = subject_id.to_string();

    let (status, body) = app
        .json(upload(
            &student_token,
            &[("subject_id", subject_field.as_str()), ("title", "Notes")],
            Some(("notes.pdf", b"%PDF-1.4 not approved".as_slice())),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());
    assert_eq!(app.stored_files(), 0);

    // staff uploading to a missing subject is refused before storage too
    let (status, _) = app
        .json(upload(
            &admin_token,
            &[("subject_id", "424242"), ("title", "Notes")],
            Some(("notes.pdf", b"%PDF-1.4".as_slice())),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!app.media.path().join("resources").exists());
}

#[tokio::test]
async fn test_bookmarks_hide_pending_uploads() {
    let app = TestApp::new().await;
    let (admin_token, subject_id) = seed_catalog(&app).await;
    let (owner_id, owner_token) = register(&app, "sana", "sana@example.edu").await;
    let (_, other_token) = register(&app, "omar", "omar@example.edu").await;
    app.json(empty(
        "POST",
        &format!("/api/v1/uploaders/{owner_id}"),
        &admin_token,
    ))
    .await;

    let subject_field = subject_id.to_string();
    let (status, resource) = app
        .json(upload(
            &owner_token,
            &[("subject_id", subject_field.as_str()), ("title", "Draft")],
            Some(("draft.pdf", b"draft".as_slice())),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let resource_id = resource["id"].as_u64().expect("resource id");

    let (status, _) = app
        .json(post_json(
            "/api/v1/bookmarks/toggle",
            Some(&other_token),
            json!({ "resource_id": resource_id }),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .json(empty(
            "POST",
            &format!("/api/v1/bookmarks/{resource_id}"),
            &other_token,
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, saved) = app.json(get("/api/v1/bookmarks", &other_token)).await;
    assert_eq!(saved, json!([]));
}

#[tokio::test]
async fn test_owner_edit_and_delete() {
    let app = TestApp::new().await;
    let (admin_token, subject_id) = seed_catalog(&app).await;
    let (student_id, student_token) = register(&app, "meera", "meera@example.edu").await;
    let (_, other_token) = register(&app, "kiran", "kiran@example.edu").await;
    app.json(empty(
        "POST",
        &format!("/api/v1/uploaders/{student_id}"),
        &admin_token,
    ))
    .await;

    let subject_field = subject_id.to_string();
    let (_, resource) = app
        .json(upload(
            &student_token,
            &[("subject_id", subject_field.as_str()), ("title", "Draft")],
            Some(("draft.pdf", b"draft".as_slice())),
        ))
        .await;
    let uri = format!("/api/v1/resources/{}", resource["id"]);

    // hidden from other students while pending
    let (status, _) = app.json(get(&uri, &other_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, edited) = app
        .json(with_json(
            "PATCH",
            &uri,
            Some(&student_token),
            json!({ "title": "Final" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["title"], "Final");

    let (status, _) = app
        .json(with_json(
            "PATCH",
            &uri,
            Some(&student_token),
            json!({ "title": "   " }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.json(empty("DELETE", &uri, &other_token)).await;
    assert_ne!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.json(empty("DELETE", &uri, &student_token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.json(get(&uri, &student_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_management() {
    let app = TestApp::new().await;
    let (admin_token, _) = seed_catalog(&app).await;
    let (student_id, student_token) = register(&app, "dev", "dev@example.edu").await;

    // only superadmins promote
    let (status, _) = app
        .json(empty(
            "POST",
            &format!("/api/v1/faculty/{student_id}"),
            &student_token,
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, promoted) = app
        .json(empty(
            "POST",
            &format!("/api/v1/faculty/{student_id}"),
            &admin_token,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(promoted["role"], "faculty");

    // the new faculty member can now see the dashboard
    let (status, stats) = app.json(get("/api/v1/dashboard/stats", &student_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["departments"], 1);

    let (_, faculty) = app.json(get("/api/v1/dashboard/faculty", &admin_token)).await;
    assert_eq!(faculty.as_array().map(Vec::len), Some(1));

    let (status, demoted) = app
        .json(empty(
            "DELETE",
            &format!("/api/v1/faculty/{student_id}"),
            &admin_token,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(demoted["role"], "student");

    // superadmins cannot change their own role
    let (_, me) = app.json(get("/api/v1/me", &admin_token)).await;
    let admin_id = me["user"]["id"].as_u64().expect("admin id");
    let (status, _) = app
        .json(empty(
            "DELETE",
            &format!("/api/v1/faculty/{admin_id}"),
            &admin_token,
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_search() {
    let app = TestApp::new().await;
    let (admin_token, _) = seed_catalog(&app).await;
    register(&app, "zoe", "zoe@example.edu").await;
    register(&app, "adam", "adam@example.edu").await;

    let (status, page) = app
        .json(get("/api/v1/dashboard/users?sort=name_asc", &admin_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = page["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|row| row["user"]["username"].as_str())
        .collect();
    assert_eq!(names, vec!["adam", "zoe"]);

    let (_, page) = app
        .json(get("/api/v1/dashboard/candidates?q=zo", &admin_token))
        .await;
    assert_eq!(page["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(page["items"][0]["username"], Value::from("zoe"));
}

#[tokio::test]
async fn test_malformed_json_is_a_json_400() {
    let app = TestApp::new().await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/register")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .expect("failed to build request");

    let (status, body) = app.json(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
