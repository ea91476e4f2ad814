//! api key authentication for REST endpoints
//!
//! api keys use a split-token pattern: `sbk_{selector}_{verifier}`
//!
//! ## Authentication Flow
//!
//! 1. Extract `Authorization: Bearer <token>` header
//! 2. Parse the token and take its selector
//! 3. Look up the api key by selector
//! 4. Verify the token against the stored hash (constant-time)
//! 5. Check expiration
//! 6. Update `last_used_at` in the background

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use studybuddy_db::Database;
use studybuddy_types::{ApiKey, ApiKeySecret, User};
use tracing::{debug, warn};

use crate::AppState;

/// the authenticated caller of an api request
#[derive(Debug, Clone)]
pub struct ApiKeyContext {
    /// the authenticated user
    pub user: User,
    /// the api key used
    pub api_key: ApiKey,
}

/// error type for api authentication failures
#[derive(Debug)]
pub enum ApiAuthError {
    /// missing Authorization header
    MissingHeader,
    /// invalid Authorization header format
    InvalidHeader,
    /// invalid token format
    InvalidToken,
    /// token not found or invalid
    InvalidCredentials,
    /// token has expired
    Expired,
    /// database error
    Internal(String),
}

impl ApiAuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::MissingHeader => "missing Authorization header",
            Self::InvalidHeader => "invalid Authorization header format",
            Self::InvalidToken => "invalid token format",
            Self::InvalidCredentials => "invalid credentials",
            Self::Expired => "token has expired",
            Self::Internal(_) => "internal server error",
        }
    }
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            warn!("api authentication failed: {e}");
        }
        let status = self.status_code();
        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

/// parse a Bearer token from the Authorization header
fn parse_bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ").map(str::trim)
}

impl FromRequestParts<AppState> for ApiKeyContext {
    type Rejection = ApiAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(ApiAuthError::MissingHeader)?
            .to_str()
            .map_err(|_| ApiAuthError::InvalidHeader)?;

        let token = parse_bearer_token(auth_header).ok_or(ApiAuthError::InvalidHeader)?;
        let secret = ApiKeySecret::new(token).map_err(|_| ApiAuthError::InvalidToken)?;

        let api_key = state
            .db()
            .get_api_key_by_selector(secret.selector())
            .await
            .map_err(|e| ApiAuthError::Internal(e.to_string()))?
            .ok_or(ApiAuthError::InvalidCredentials)?;

        if !api_key.verify(&secret) {
            debug!(key_id = api_key.id, "api key verification failed");
            return Err(ApiAuthError::InvalidCredentials);
        }

        if api_key.is_expired() {
            return Err(ApiAuthError::Expired);
        }

        let user = state
            .db()
            .get_user(api_key.user_id)
            .await
            .map_err(|e| ApiAuthError::Internal(e.to_string()))?
            .ok_or(ApiAuthError::InvalidCredentials)?;

        // update last_used_at (fire and forget)
        let db = state.db().clone();
        let key_id = api_key.id;
        tokio::spawn(async move {
            let _ = db.touch_api_key(key_id).await;
        });

        Ok(ApiKeyContext { user, api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_token_valid() {
        assert_eq!(parse_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(
            parse_bearer_token("Bearer sbk_selector_verifier"),
            Some("sbk_selector_verifier")
        );
        assert_eq!(parse_bearer_token("Bearer  abc123 "), Some("abc123"));
    }

    #[test]
    fn test_parse_bearer_token_invalid() {
        assert_eq!(parse_bearer_token("Basic abc123"), None);
        assert_eq!(parse_bearer_token("bearer abc123"), None); // case sensitive
        assert_eq!(parse_bearer_token("Bearerabc123"), None);
        assert_eq!(parse_bearer_token(""), None);
    }

    #[test]
    fn test_api_auth_error_status_codes() {
        for err in [
            ApiAuthError::MissingHeader,
            ApiAuthError::InvalidHeader,
            ApiAuthError::InvalidToken,
            ApiAuthError::InvalidCredentials,
            ApiAuthError::Expired,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
        assert_eq!(
            ApiAuthError::Internal("err".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
