//! Appointment lifecycle transitions
//!
//! ```text
//! pending ──confirm──▶ confirmed ──complete──▶ completed
//!    │                     │
//!    └──────cancel─────────┴──▶ cancelled ◀─┐
//!                                  └─cancel─┘
//! ```
//!
//! Every transition stamps `updated_at`. `complete` is a manual staff
//! action; nothing in the crate completes an appointment on its own.

use crate::core::appointment::{Appointment, AppointmentStatus};
use crate::core::error::AppointmentError;
use chrono::{DateTime, Utc};

fn ensure_transition(
    appointment: &Appointment,
    next: AppointmentStatus,
) -> Result<(), AppointmentError> {
    if appointment.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(AppointmentError::InvalidTransition {
            id: appointment.id,
            from: appointment.status,
            to: next,
        })
    }
}

/// Confirm a pending appointment
pub fn confirm(appointment: &mut Appointment, now: DateTime<Utc>) -> Result<(), AppointmentError> {
    ensure_transition(appointment, AppointmentStatus::Confirmed)?;
    appointment.status = AppointmentStatus::Confirmed;
    appointment.updated_at = now;
    Ok(())
}

/// Cancel an appointment that has not been completed.
///
/// Cancelling twice keeps the record cancelled and overwrites the reason and
/// cancellation time with the latest call.
pub fn cancel(
    appointment: &mut Appointment,
    reason: impl Into<String>,
    now: DateTime<Utc>,
) -> Result<(), AppointmentError> {
    ensure_transition(appointment, AppointmentStatus::Cancelled)?;
    appointment.status = AppointmentStatus::Cancelled;
    appointment.cancelled_at = Some(now);
    appointment.cancellation_reason = Some(reason.into());
    appointment.updated_at = now;
    Ok(())
}

/// Mark a confirmed appointment as attended
pub fn complete(appointment: &mut Appointment, now: DateTime<Utc>) -> Result<(), AppointmentError> {
    ensure_transition(appointment, AppointmentStatus::Completed)?;
    appointment.status = AppointmentStatus::Completed;
    appointment.updated_at = now;
    Ok(())
}
