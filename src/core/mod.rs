//! Core module containing the appointment domain: model, validation,
//! lifecycle, querying and the storage trait

pub mod appointment;
pub mod entity;
pub mod error;
pub mod field;
pub mod lifecycle;
pub mod query;
pub mod service;
pub mod validation;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment, ServiceType};
pub use entity::Entity;
pub use error::{AgendaError, AgendaResult};
pub use field::FieldFormat;
pub use query::{AppointmentFilter, PaginatedResponse, PaginationMeta, QueryParams};
pub use service::DataService;
