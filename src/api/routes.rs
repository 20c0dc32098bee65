//! API Routes
//!
//! Configures the Axum router with all sharenv endpoints.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{export_handler, health_handler, install_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Install instructions
/// - `GET /health` - Health check endpoint
/// - `GET /*token` - Variables and aliases as shell statements
///
/// The token route takes the rest of the path, slashes included. Static
/// routes win over it, so a token equal to `health` cannot be used.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(install_handler))
        .route("/health", get(health_handler))
        .route("/*token", get(export_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SecretToken;
    use crate::cache::VarStore;
    use crate::shell::ValueSelector;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app(dir: &std::path::Path) -> Router {
        let store = VarStore::new(dir.join("vars"), dir.join("aliases"), Duration::from_secs(1));
        let state = AppState::new(store, ValueSelector::seeded(1), SecretToken::new("abc"));
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = tempdir().unwrap();
        let app = create_test_app(dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let dir = tempdir().unwrap();
        let app = create_test_app(dir.path());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_token_endpoint_wrong_token_is_ok() {
        let dir = tempdir().unwrap();
        let app = create_test_app(dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/not-the-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_token_route_takes_rest_of_path() {
        let dir = tempdir().unwrap();
        let app = create_test_app(dir.path());

        for uri in ["/abc/", "/a/b", "/%FF"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "status for {}", uri);
        }
    }

    #[tokio::test]
    async fn test_post_not_allowed() {
        let dir = tempdir().unwrap();
        let app = create_test_app(dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
