//! Router builder utilities for appointment routes

use crate::appointments::handlers::{
    AppState, cancel_appointment, complete_appointment, confirm_appointment, create_appointment,
    get_appointment, list_appointments, upcoming_appointments,
};
use axum::{
    Router,
    routing::{get, patch},
};

/// Build appointment routes
///
/// - POST /api/appointments - Create an appointment
/// - GET /api/appointments - List with search, status filter and pagination
/// - GET /api/appointments/upcoming - Appointments in the next `days` days
/// - GET /api/appointments/{id} - Get one appointment
/// - PATCH /api/appointments/{id}/confirm
/// - PATCH /api/appointments/{id}/cancel
/// - PATCH /api/appointments/{id}/complete
pub fn build_appointment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route("/api/appointments/upcoming", get(upcoming_appointments))
        .route("/api/appointments/{id}", get(get_appointment))
        .route("/api/appointments/{id}/confirm", patch(confirm_appointment))
        .route("/api/appointments/{id}/cancel", patch(cancel_appointment))
        .route("/api/appointments/{id}/complete", patch(complete_appointment))
}
