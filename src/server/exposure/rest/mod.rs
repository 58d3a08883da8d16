//! REST API exposure
//!
//! Consumes the shared [`AppState`] and produces an Axum `Router` with the
//! health, root and appointment routes plus the HTTP middleware stack.

use crate::appointments::handlers::{AppState, health_check, root, route_not_found};
use crate::config::ServerConfig;
use crate::server::router::build_appointment_routes;
use anyhow::Result;
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check and root routes
    /// - Appointment routes under `/api`
    /// - Custom routes
    /// - A JSON 404 fallback, request tracing and optional CORS
    pub fn build_router(
        state: AppState,
        config: &ServerConfig,
        custom_routes: Vec<Router>,
    ) -> Result<Router> {
        let mut app: Router = Self::health_routes()
            .merge(build_appointment_routes())
            .with_state(state);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        let mut app = app
            .fallback(route_not_found)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        if config.cors {
            app = app.layer(CorsLayer::permissive());
        }

        Ok(app)
    }

    /// Build health check and root routes
    fn health_routes() -> Router<AppState> {
        Router::new()
            .route("/", get(root))
            .route("/health", get(health_check))
            .route("/healthz", get(health_check))
    }
}
