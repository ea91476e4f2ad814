//! studybuddy library - http api and application setup.
//!
//! this crate provides the server side of studybuddy:
//! - [`handlers`]: http request handlers for the rest api, health check and chat
//! - [`cli`]: command-line interface implementation
//! - [`files`]: storage for uploaded resource files
//! - [`chat`]: the study assistant relay

pub mod chat;
pub mod cli;
pub mod files;
pub mod handlers;

pub use chat::{ChatClient, ChatError};
pub use files::{FileStore, FileStoreError};

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use studybuddy_db::StudybuddyDb;
use studybuddy_types::Config;
use studybuddy_workflow::Workflow;
use tower_http::trace::TraceLayer;

/// room left in a request body for multipart framing and metadata fields.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// role-gated operations over the database.
    pub workflow: Workflow<StudybuddyDb>,
    /// server configuration.
    pub config: Config,
    /// uploaded file storage.
    pub files: FileStore,
    /// chat relay client (none if chat is disabled or has no api key).
    pub chat: Option<ChatClient>,
}

impl AppState {
    /// the database behind the workflow.
    pub fn db(&self) -> &StudybuddyDb {
        self.workflow.db()
    }
}

/// create the axum application with all routes.
pub fn create_app(db: StudybuddyDb, config: Config, chat: Option<ChatClient>) -> Router {
    let files = FileStore::new(config.media.root.clone(), config.media.max_upload_bytes);
    let body_limit = config.media.max_upload_bytes + MULTIPART_OVERHEAD;

    let state = AppState {
        workflow: Workflow::new(db),
        config,
        files,
        chat,
    };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/ws/chat", get(handlers::chat_ws))
        .nest("/api/v1", handlers::api_v1::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
