//! # Agenda
//!
//! Booking backend for identity-document (RG) appointments: citizens request
//! a slot, staff confirm, cancel or complete it, and both sides browse the
//! agenda through a JSON API.
//!
//! ## Features
//!
//! - **Validation**: every booking request is normalized and checked field by field
//! - **Lifecycle**: `pending → confirmed → completed`, cancellation from any open state
//! - **Queries**: free-text search, status filter, pagination and an upcoming view
//! - **Pluggable storage**: in-memory by default, MongoDB behind `mongodb_backend`
//! - **Configuration**: YAML file plus `HOST`, `PORT` and `MONGODB_URI` overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use agenda::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_data_service(InMemoryDataService::<Appointment>::new())
//!         .with_config(AppConfig::default())
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod appointments;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AgendaError, AgendaResult, Appointment, AppointmentFilter, AppointmentStatus,
        DataService, Entity, NewAppointment, PaginatedResponse, PaginationMeta, QueryParams,
        ServiceType, lifecycle,
    };

    // === Appointments ===
    pub use crate::appointments::{AppState, AppointmentService};

    // === Storage ===
    pub use crate::storage::InMemoryDataService;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDataService;

    // === Config ===
    pub use crate::config::{AppConfig, LogConfig, ServerConfig, StorageBackend, StorageConfig};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::{
        Router,
        routing::{get, patch, post},
    };
}
