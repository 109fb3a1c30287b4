//! Dashboard HTTP API
//!
//! HTTP layer for the wastewater dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - The dashboard page
//!
//! ## Dashboard
//! - `GET /api/v1/controls` - Control options (locations, date bounds)
//! - `GET /api/v1/figures` - Plotly figures for the current filter
//! - `GET /api/v1/charts` - Typed chart specifications for the current filter
//! - `GET /api/v1/export` - Filtered samples as CSV
//!
//! Filter parameters: `location`, `start_date`, `end_date` (YYYY-MM-DD), `log`.
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use wbe_dashboard::api::{serve, ApiConfig, AppState};
//! use wbe_dashboard::data::load_csv;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = load_csv("samples.csv".as_ref())?;
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(dataset, "Wastewater", config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/controls", get(routes::controls::get_controls))
        .route("/figures", get(routes::figures::get_figures))
        .route("/charts", get(routes::figures::get_charts))
        .route("/export", get(routes::export::export_csv));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::dashboard))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the HTTP server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_str;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    const CSV: &str = "sample.loc,sample.date,wildtype,LDL
Holt,2023-01-03,1500,100
Mason,2023-01-04,50,100
Holt,2023-02-10,900,100
Okemos,2023-03-15,2500,100
Mason,2023-03-20,700,100";

    fn create_test_app() -> Router {
        let dataset = load_str(CSV).unwrap();
        build_router(AppState::new(dataset, "Test Dashboard", ApiConfig::default()))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (status, _) = get_json(create_test_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = get_json(create_test_app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["samples"], 5);
        assert_eq!(body["locations"], 3);
        assert_eq!(body["first_sample"], "2023-01-03");
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/api/v1/figures"));
    }

    #[tokio::test]
    async fn test_controls() {
        let (status, body) = get_json(create_test_app(), "/api/v1/controls").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Test Dashboard");
        assert_eq!(body["locations"][0]["value"], "all");
        assert_eq!(body["locations"].as_array().unwrap().len(), 4);
        assert_eq!(body["date_range"]["min_date_allowed"], "2023-01-03");
        assert_eq!(body["date_range"]["max_date_allowed"], "2023-03-20");
    }

    #[tokio::test]
    async fn test_figures_default_filter() {
        let (status, body) = get_json(create_test_app(), "/api/v1/figures").await;

        assert_eq!(status, StatusCode::OK);
        // The Mason sample below its detection limit is dropped
        assert_eq!(body["row_count"], 4);
        assert_eq!(body["time_series"]["layout"]["yaxis"]["type"], "linear");
        assert_eq!(body["line"]["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_figures_with_filter_and_log() {
        let (status, body) = get_json(
            create_test_app(),
            "/api/v1/figures?location=Holt&start_date=2023-01-01&end_date=2023-01-31&log=true",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["row_count"], 1);
        for key in ["time_series", "box_plot", "line", "histogram"] {
            assert_eq!(body[key]["layout"]["yaxis"]["type"], "log");
        }
    }

    #[tokio::test]
    async fn test_figures_reversed_range_is_empty() {
        let (status, body) = get_json(
            create_test_app(),
            "/api/v1/figures?start_date=2023-03-01&end_date=2023-01-01",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["row_count"], 0);
        assert_eq!(body["histogram"]["data"][0]["x"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_figures_malformed_date_rejected() {
        let (status, _) = get_json(create_test_app(), "/api/v1/figures?start_date=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_charts_typed_specs() {
        let (status, body) = get_json(create_test_app(), "/api/v1/charts?location=Okemos").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["row_count"], 1);
        assert_eq!(body["line"]["body"]["type"], "line");
        assert_eq!(body["histogram"]["body"]["bin_count"], 20);
    }

    #[tokio::test]
    async fn test_export_csv() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?location=Mason")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Mason,2023-03-20,700,100,700,true"));
    }

    #[tokio::test]
    async fn test_export_disabled() {
        let dataset = load_str(CSV).unwrap();
        let config = ApiConfig {
            enable_export: false,
            ..Default::default()
        };
        let app = build_router(AppState::new(dataset, "t", config));

        let (status, body) = get_json(app, "/api/v1/export").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
