//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that wires a persistence backend
//! into the appointment service and registers:
//! - Appointment routes under `/api`
//! - Health and root routes
//! - A JSON fallback for unknown routes

pub mod builder;
pub mod exposure;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
