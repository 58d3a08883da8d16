//! Appointment management module
//!
//! This module provides the appointment service and the HTTP handlers
//! exposing it.

pub mod handlers;
pub mod service;

pub use handlers::AppState;
pub use service::AppointmentService;
