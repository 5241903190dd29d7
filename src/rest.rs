//! HTTP REST surface: one lookup endpoint plus a health check.
//!
//! The three failure classes stay distinct on the wire: missing handle
//! is a 400, an unreachable upstream propagates its status (502 when
//! none is known), and anything unexpected is a generic 500. A handle
//! that is simply not on the page is a 200 with `found=false`.

use crate::config::Config;
use crate::error::{LookupError, LookupResult};
use crate::extract;
use crate::fetch::Fetcher;
use crate::report::{Identifier, RankReport};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared per-process state. Every request is otherwise stateless.
pub struct AppState {
    pub fetcher: Fetcher,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            fetcher: Fetcher::new(config.fetch_timeout),
            config,
        }
    }
}

/// Build the axum Router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/rank", get(handle_rank))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start(state: Arc<AppState>) -> anyhow::Result<()> {
    let port = state.config.port;
    let app = router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    info!("rank API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(serde::Deserialize, Default)]
struct RankParams {
    handle: Option<String>,
}

/// `GET /api/v1/rank?handle=@alice`
async fn handle_rank(
    Query(params): Query<RankParams>,
    State(state): State<Arc<AppState>>,
) -> LookupResult<Json<RankReport>> {
    let id = Identifier::new(params.handle.as_deref().unwrap_or_default());
    if id.normalized().is_empty() {
        return Err(LookupError::MissingHandle);
    }

    let body = state.fetcher.fetch_page(&state.config.source_url).await?;

    // scraper::Html is not Send, so the parse/extract pipeline runs in
    // a blocking task instead of across an await point.
    let report = tokio::task::spawn_blocking(move || extract::lookup_in_page(&body, &id))
        .await
        .map_err(|e| LookupError::Internal(format!("extraction task failed: {e}")))?;

    info!(
        handle = %report.handle,
        found = report.found,
        rank = %report.display_rank(),
        "lookup complete"
    );
    Ok(Json(report))
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(Arc::new(AppState::new(Config::default())))
    }

    #[tokio::test]
    async fn test_health_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_handle_is_400() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/rank")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bare_at_sign_is_400() {
        // "@" normalizes to an empty handle; no fetch is attempted.
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/rank?handle=%40")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_503_response_keeps_status() {
        let err = LookupError::Upstream {
            status: Some(503),
            message: "unavailable".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
