//! Typed error handling for agenda-rs
//!
//! Every fallible operation of the crate ends in an [`AgendaError`], which
//! knows its HTTP status and a stable machine-readable code, so handlers can
//! simply return `Result<_, AgendaError>`.
//!
//! # Error Categories
//!
//! - [`AppointmentError`]: unknown records and forbidden lifecycle transitions
//! - [`ValidationError`]: per-field input validation failures
//! - [`RequestError`]: malformed ids, bodies or query strings
//! - [`StorageError`]: persistence backend failures
//! - [`ConfigError`]: configuration loading failures
//!
//! # Example
//!
//! ```rust,ignore
//! match service.confirm(&id).await {
//!     Ok(appointment) => println!("confirmed {}", appointment.id),
//!     Err(AgendaError::Appointment(AppointmentError::InvalidTransition { from, .. })) => {
//!         println!("cannot confirm an appointment that is {}", from);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use crate::core::appointment::AppointmentStatus;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type of the crate
#[derive(Debug, Error)]
pub enum AgendaError {
    /// Appointment lookups and lifecycle errors
    #[error(transparent)]
    Appointment(#[from] AppointmentError),

    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AgendaError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AgendaError::Appointment(e) => e.status_code(),
            AgendaError::Validation(_) => StatusCode::BAD_REQUEST,
            AgendaError::Request(e) => e.status_code(),
            AgendaError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AgendaError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AgendaError::Appointment(e) => e.error_code(),
            AgendaError::Validation(_) => "VALIDATION_ERROR",
            AgendaError::Request(e) => e.error_code(),
            AgendaError::Storage(_) => "STORAGE_ERROR",
            AgendaError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AgendaError::Appointment(AppointmentError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            AgendaError::Appointment(AppointmentError::InvalidTransition { id, from, to }) => {
                Some(serde_json::json!({
                    "id": id.to_string(),
                    "from": from,
                    "to": to
                }))
            }
            AgendaError::Validation(e) => Some(serde_json::json!({ "fields": e.fields() })),
            _ => None,
        }
    }
}

impl IntoResponse for AgendaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Appointment Errors
// =============================================================================

/// Errors related to appointment records
#[derive(Debug, Error)]
pub enum AppointmentError {
    /// No appointment with this id
    #[error("appointment with id '{id}' not found")]
    NotFound { id: Uuid },

    /// The requested status change is not allowed from the current status
    #[error("cannot move appointment '{id}' from {from} to {to}")]
    InvalidTransition {
        id: Uuid,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

impl AppointmentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppointmentError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppointmentError::InvalidTransition { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppointmentError::NotFound { .. } => "APPOINTMENT_NOT_FOUND",
            AppointmentError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{}': {}", .0.field, .0.message)]
    FieldError(FieldValidationError),

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_fields(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

impl ValidationError {
    /// Build a single-field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::FieldError(FieldValidationError::new(field, message))
    }

    /// All offending fields, in reporting order
    pub fn fields(&self) -> Vec<FieldValidationError> {
        match self {
            ValidationError::FieldError(e) => vec![e.clone()],
            ValidationError::FieldErrors(errors) => errors.clone(),
        }
    }
}

fn join_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Invalid appointment id format
    #[error("Invalid appointment ID format: '{id}'")]
    InvalidEntityId { id: String },

    /// Invalid request body
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Invalid query string parameter
    #[error("Invalid query parameter '{param}': {message}")]
    InvalidQuery { param: String, message: String },

    /// No route matches the request
    #[error("Route not found: {path}")]
    RouteNotFound { path: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            RequestError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
            RequestError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query or write failed
    #[error("{operation} failed: {message}")]
    OperationFailed { operation: String, message: String },
}

impl StorageError {
    /// Wrap a backend failure for the named operation
    pub fn operation(operation: &str, err: anyhow::Error) -> Self {
        StorageError::OperationFailed {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for AgendaError {
    fn from(err: std::io::Error) -> Self {
        AgendaError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for AgendaError {
    fn from(err: serde_yaml::Error) -> Self {
        AgendaError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Result alias used across the crate
pub type AgendaResult<T> = std::result::Result<T, AgendaError>;
