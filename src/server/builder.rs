//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use crate::appointments::{AppState, AppointmentService};
use crate::config::AppConfig;
use crate::core::{Appointment, DataService};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the appointment HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_data_service(InMemoryDataService::<Appointment>::new())
///     .with_config(AppConfig::default())
///     .build()?;
/// ```
pub struct ServerBuilder {
    data_service: Option<Arc<dyn DataService<Appointment>>>,
    config: AppConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            data_service: None,
            config: AppConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the appointment persistence backend (required)
    pub fn with_data_service(mut self, service: impl DataService<Appointment> + 'static) -> Self {
        self.data_service = Some(Arc::new(service));
        self
    }

    /// Set the application configuration
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the appointment API, such as
    /// staff dashboards or webhooks.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let extra = Router::new().route("/metrics", get(metrics_handler));
    ///
    /// ServerBuilder::new()
    ///     .with_data_service(service)
    ///     .with_custom_routes(extra)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        let store = self.data_service.ok_or_else(|| {
            anyhow::anyhow!("DataService is required. Call .with_data_service()")
        })?;

        let state = AppState::new(AppointmentService::from_arc(store));
        RestExposure::build_router(state, &self.config.server, self.custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_data_service(service)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
