//! rest api v1 handlers.
//!
//! every endpoint except registration requires a bearer api key.

mod access;
mod accounts;
mod bookmarks;
mod catalog;
mod dashboard;
mod resources;

use axum::Router;

use crate::AppState;

/// create the api v1 router with all endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(accounts::router())
        .merge(catalog::router())
        .merge(resources::router())
        .merge(bookmarks::router())
        .merge(access::router())
        .nest("/dashboard", dashboard::router())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds() {
        // overlapping routes panic at construction
        let _router: Router<AppState> = router();
    }
}
