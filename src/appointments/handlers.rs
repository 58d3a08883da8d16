//! HTTP handlers for appointment operations
//!
//! Handlers parse the request, delegate to [`AppointmentService`] and let
//! [`AgendaError`] render every failure as a JSON error body.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, Uri},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::time::Instant;
use uuid::Uuid;

use crate::appointments::service::AppointmentService;
use crate::core::error::RequestError;
use crate::core::query::UpcomingParams;
use crate::core::{AgendaError, Appointment, NewAppointment, PaginatedResponse, QueryParams};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: AppointmentService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: AppointmentService) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }
}

/// Optional body of the cancel endpoint
#[derive(Debug, Default, Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

/// Response for the upcoming endpoint
#[derive(Debug, Serialize)]
pub struct UpcomingResponse {
    pub data: Vec<Appointment>,
    pub count: usize,
    pub days: u32,
}

/// Response for the health endpoints
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the router was built
    pub uptime: f64,
}

/// Response for the root endpoint
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

fn parse_id(raw: &str) -> Result<Uuid, RequestError> {
    Uuid::parse_str(raw).map_err(|_| RequestError::InvalidEntityId { id: raw.to_string() })
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, RequestError> {
    serde_json::from_slice(body).map_err(|e| RequestError::InvalidBody {
        message: e.to_string(),
    })
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, RequestError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| RequestError::InvalidQuery {
            param: "query".to_string(),
            message: rejection.body_text(),
        })
}

/// POST /api/appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Appointment>), AgendaError> {
    let body: Value = parse_body(&body)?;
    let object = body.as_object().ok_or_else(|| RequestError::InvalidBody {
        message: "request body must be a JSON object".to_string(),
    })?;
    let input = NewAppointment::from_json_object(object)?;
    let created = state.service.create(input).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/appointments
pub async fn list_appointments(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<PaginatedResponse<Appointment>>, AgendaError> {
    let params = query_params(query)?;
    let filter = params.filter()?;

    let page = state
        .service
        .list(&filter, params.page(), params.limit())
        .await?;

    Ok(Json(page))
}

/// GET /api/appointments/upcoming
pub async fn upcoming_appointments(
    State(state): State<AppState>,
    query: Result<Query<UpcomingParams>, QueryRejection>,
) -> Result<Json<UpcomingResponse>, AgendaError> {
    let UpcomingParams { days } = query_params(query)?;
    let data = state.service.find_upcoming(days).await?;

    Ok(Json(UpcomingResponse {
        count: data.len(),
        data,
        days,
    }))
}

/// GET /api/appointments/{id}
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AgendaError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(&id).await?))
}

/// PATCH /api/appointments/{id}/confirm
pub async fn confirm_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AgendaError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.confirm(&id).await?))
}

/// PATCH /api/appointments/{id}/cancel
///
/// The body is optional; an empty body cancels without a reason.
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Appointment>, AgendaError> {
    let id = parse_id(&id)?;
    let request: CancelRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CancelRequest::default()
    } else {
        parse_body(&body)?
    };

    Ok(Json(state.service.cancel(&id, request.reason).await?))
}

/// PATCH /api/appointments/{id}/complete
pub async fn complete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AgendaError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.complete(&id).await?))
}

/// GET /health and /healthz
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Agendamento Identidade API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// Fallback for unmatched routes
pub async fn route_not_found(uri: Uri) -> AgendaError {
    RequestError::RouteNotFound {
        path: uri.path().to_string(),
    }
    .into()
}
