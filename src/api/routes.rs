//! Router assembly: resource groups, API docs and global middleware.

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::{app_user, health, plan, streak, sudoku, theme, user_role};
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Builds the application router. Requests running longer than
/// `request_timeout` are answered with 408.
///
/// Layers run last-added first, so the request id is in place before the
/// logging middleware opens its span.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, api) = api_router().split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(timeout_layer(request_timeout))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

// `TimeoutLayer::new` is deprecated in later 0.6 releases.
#[allow(deprecated)]
fn timeout_layer(request_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::new(request_timeout)
}

fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/user-role", user_role::user_role_routes())
        .nest("/api/plan", plan::plan_routes())
        .nest("/api/app-user", app_user::app_user_routes())
        .nest("/api/streak", streak::streak_routes())
        .nest("/api/theme", theme::theme_routes())
        .nest("/api/sudoku", sudoku::sudoku_routes())
        .merge(health::health_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(timeout_layer(Duration::from_millis(20)));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_openapi_lists_every_resource_group() {
        let (_, api) = api_router().split_for_parts();

        let paths: Vec<&String> = api.paths.paths.keys().collect();
        for expected in [
            "/api/user-role/get-all",
            "/api/plan/update/{id}",
            "/api/app-user/leaderboard",
            "/api/streak/get-by-initial-date-before",
            "/api/theme/get-by-name/{name}",
            "/api/sudoku/update/{id}",
            "/api/sudoku/delete/{id}",
            "/health",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
