//! http handlers for studybuddy.

mod api_auth;
pub mod api_v1;
mod chat;
mod error;
mod health;

pub use api_auth::{ApiAuthError, ApiKeyContext};
pub use chat::chat_ws;
pub use error::{ApiError, JsonBody};
pub use health::health;
