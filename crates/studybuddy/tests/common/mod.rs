//! shared helpers for the http integration tests.
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use studybuddy::{ChatClient, create_app};
use studybuddy_db::StudybuddyDb;
use studybuddy_types::{Config, User};
use studybuddy_workflow::Workflow;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "studybuddy-test-boundary";

/// an app over an in-memory database and a temporary media root.
pub struct TestApp {
    pub app: Router,
    pub workflow: Workflow<StudybuddyDb>,
    pub media: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_chat(None).await
    }

    pub async fn with_chat(chat: Option<ChatClient>) -> Self {
        let db = StudybuddyDb::new_in_memory()
            .await
            .expect("failed to create in-memory database");
        let media = TempDir::new().expect("failed to create media dir");

        let mut config = Config::default();
        config.media.root = media.path().to_path_buf();
        config.media.max_upload_bytes = 1024;

        let app = create_app(db.clone(), config, chat);
        Self {
            app,
            workflow: Workflow::new(db),
            media,
        }
    }

    /// a bearer token for a user created straight through the workflow.
    pub async fn token_for(&self, user: &User) -> String {
        let (secret, _) = self
            .workflow
            .issue_api_key(user.id, "test", 0)
            .await
            .expect("failed to issue key");
        secret.as_str().to_string()
    }

    /// number of files under `<media_root>/resources`.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.media.path().join("resources"))
            .map(|dir| dir.count())
            .unwrap_or(0)
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (status, body.to_vec())
    }

    /// send a request and parse the body as json (null when empty).
    pub async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = self.send(request).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("response is not json")
        };
        (status, value)
    }
}

pub fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    with_json("POST", uri, token, body)
}

pub fn with_json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn empty(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("failed to build request")
}

/// a multipart upload with the given text fields and an optional file.
pub fn upload(token: &str, fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/resources")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("failed to build request")
}
