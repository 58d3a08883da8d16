//! Integration test infrastructure for storage backends.
//!
//! Builds the real application router on top of any backend so the
//! appointment API can be validated end to end
//! (HTTP → handler → AppointmentService → DataService → response).
//!
//! # Architecture
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (built by build_test_router via ServerBuilder)
//!         ├─ POST   /api/appointments
//!         ├─ GET    /api/appointments
//!         ├─ GET    /api/appointments/upcoming
//!         ├─ GET    /api/appointments/{id}
//!         └─ PATCH  /api/appointments/{id}/{confirm,cancel,complete}
//! ```

#[macro_use]
pub mod rest_tests;

use agenda::config::AppConfig;
use agenda::core::{Appointment, DataService};
use agenda::server::ServerBuilder;
use axum::Router;

/// Build the application Router for the given storage backend.
///
/// # Usage
/// ```rust,ignore
/// let router = build_test_router(InMemoryDataService::<Appointment>::new());
/// let server = axum_test::TestServer::new(router).unwrap();
/// ```
pub fn build_test_router(data_service: impl DataService<Appointment> + 'static) -> Router {
    let mut config = AppConfig::default();
    config.server.cors = false;

    ServerBuilder::new()
        .with_data_service(data_service)
        .with_config(config)
        .build()
        .expect("router should build with a data service")
}
