//! The appointment record, its enums, and creation-time validation

use crate::core::entity::Entity;
use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::field::FieldFormat;
use crate::core::validation::FieldReport;
use crate::core::validation::filters::{empty_as_none, lowercase, trim};
use crate::core::validation::validators::{char_length, format, max_chars, one_of, required};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identity-document services that can be booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "Emissão de RG")]
    Issuance,
    #[serde(rename = "Renovação de RG")]
    Renewal,
    #[serde(rename = "Alteração de Dados")]
    DataChange,
    #[serde(rename = "Duplicata de RG")]
    Duplicate,
    #[serde(rename = "Consulta")]
    Consultation,
}

impl ServiceType {
    /// Wire names, in declaration order
    pub const NAMES: &'static [&'static str] = &[
        "Emissão de RG",
        "Renovação de RG",
        "Alteração de Dados",
        "Duplicata de RG",
        "Consulta",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Issuance => "Emissão de RG",
            ServiceType::Renewal => "Renovação de RG",
            ServiceType::DataChange => "Alteração de Dados",
            ServiceType::Duplicate => "Duplicata de RG",
            ServiceType::Consultation => "Consulta",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Emissão de RG" => Ok(ServiceType::Issuance),
            "Renovação de RG" => Ok(ServiceType::Renewal),
            "Alteração de Dados" => Ok(ServiceType::DataChange),
            "Duplicata de RG" => Ok(ServiceType::Duplicate),
            "Consulta" => Ok(ServiceType::Consultation),
            other => Err(format!("unknown service type '{}'", other)),
        }
    }
}

/// Appointment status
///
/// Allowed moves are encoded in [`AppointmentStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Wire names, in declaration order
    pub const NAMES: &'static [&'static str] = &["pending", "confirmed", "completed", "cancelled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a record in this status may move to `next`.
    ///
    /// Cancelling an already cancelled record is allowed so that a second
    /// cancellation can replace the reason.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Cancelled, Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!(
                "status must be one of: {} (got '{}')",
                AppointmentStatus::NAMES.join(", "),
                other
            )),
        }
    }
}

/// Booking request as submitted by a client
///
/// Every field is optional at this stage so that missing values surface as
/// field errors instead of deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewAppointment {
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_id: Option<String>,
    pub service_type: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub scheduled_date: Option<String>,
    /// `HH:mm`
    pub scheduled_time: Option<String>,
    pub notes: Option<String>,
}

impl NewAppointment {
    /// Read a booking request from a decoded JSON object.
    ///
    /// Unknown keys are ignored and `null` counts as absent. A known field
    /// holding anything but a string is reported as a field error, in field
    /// order.
    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut type_errors = Vec::new();
        let mut text = |field: &str| match object.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                type_errors.push(FieldValidationError::new(
                    field,
                    format!("{} must be a string", field),
                ));
                None
            }
        };

        let input = Self {
            client_name: text("clientName"),
            email: text("email"),
            phone: text("phone"),
            document_id: text("documentId"),
            service_type: text("serviceType"),
            scheduled_date: text("scheduledDate"),
            scheduled_time: text("scheduledTime"),
            notes: text("notes"),
        };

        if type_errors.is_empty() {
            Ok(input)
        } else {
            Err(ValidationError::FieldErrors(type_errors))
        }
    }

    /// Apply the input filters (trim everything, lowercase the email,
    /// drop a blank document id)
    pub fn normalized(self) -> Self {
        Self {
            client_name: trim(self.client_name),
            email: lowercase(self.email),
            phone: trim(self.phone),
            document_id: empty_as_none(self.document_id),
            service_type: trim(self.service_type),
            scheduled_date: trim(self.scheduled_date),
            scheduled_time: trim(self.scheduled_time),
            notes: trim(self.notes),
        }
    }
}

/// Parse a scheduled date given either as RFC 3339 or as a plain
/// `YYYY-MM-DD` day (taken as midnight UTC)
pub fn parse_scheduled_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Check a booking request against every field rule.
///
/// Pure: reads `input` and `now` only. Returns one error per offending
/// field, in field order; an empty list means the request is valid.
pub fn validate_new_appointment(
    input: &NewAppointment,
    now: DateTime<Utc>,
) -> Vec<FieldValidationError> {
    let mut report = FieldReport::new();

    report.check(
        "clientName",
        input.client_name.as_deref(),
        &[&required(), &char_length(3, 100)],
    );
    report.check(
        "email",
        input.email.as_deref(),
        &[&required(), &format(FieldFormat::Email, "email is invalid")],
    );
    report.check(
        "phone",
        input.phone.as_deref(),
        &[
            &required(),
            &format(FieldFormat::Phone, "phone must have 10 or 11 digits"),
        ],
    );
    report.check(
        "serviceType",
        input.service_type.as_deref(),
        &[&required(), &one_of(ServiceType::NAMES)],
    );

    if report.check("scheduledDate", input.scheduled_date.as_deref(), &[&required()]) {
        match input.scheduled_date.as_deref().and_then(parse_scheduled_date) {
            None => report.push(
                "scheduledDate",
                "scheduledDate must be a YYYY-MM-DD date or an RFC 3339 timestamp",
            ),
            Some(date) if date <= now => {
                report.push("scheduledDate", "scheduledDate cannot be in the past")
            }
            Some(_) => {}
        }
    }

    report.check(
        "scheduledTime",
        input.scheduled_time.as_deref(),
        &[
            &required(),
            &format(FieldFormat::Time24h, "scheduledTime must use the HH:mm format"),
        ],
    );
    report.check("notes", input.notes.as_deref(), &[&max_chars(1000)]);

    report.into_errors()
}

/// A persisted booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub document_id: Option<String>,
    pub service_type: ServiceType,
    pub scheduled_date: DateTime<Utc>,
    pub scheduled_time: String,
    pub status: AppointmentStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
}

impl Appointment {
    /// Normalize and validate a booking request, then build a `pending`
    /// record stamped with `now`.
    pub fn create(input: NewAppointment, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let input = input.normalized();

        let errors = validate_new_appointment(&input, now);
        if !errors.is_empty() {
            return Err(ValidationError::FieldErrors(errors));
        }

        let service_type = input
            .service_type
            .as_deref()
            .unwrap_or_default()
            .parse::<ServiceType>()
            .map_err(|e| ValidationError::field("serviceType", e))?;
        let scheduled_date = input
            .scheduled_date
            .as_deref()
            .and_then(parse_scheduled_date)
            .ok_or_else(|| ValidationError::field("scheduledDate", "scheduledDate is required"))?;

        Ok(Self {
            id: Uuid::new_v4(),
            client_name: input.client_name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            phone: input.phone.unwrap_or_default(),
            document_id: input.document_id,
            service_type,
            scheduled_date,
            scheduled_time: input.scheduled_time.unwrap_or_default(),
            status: AppointmentStatus::Pending,
            notes: input.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            cancelled_at: None,
            cancellation_reason: None,
        })
    }
}

impl Entity for Appointment {
    fn resource_name() -> &'static str {
        "appointments"
    }

    fn resource_name_singular() -> &'static str {
        "appointment"
    }

    fn id(&self) -> Uuid {
        self.id
    }
}
