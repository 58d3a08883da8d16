//! Appointment service: validation, lifecycle and queries over a `DataService`

use crate::core::error::{AgendaResult, AppointmentError, RequestError, StorageError};
use crate::core::query::{AppointmentFilter, PaginatedResponse, sort_by_schedule_desc};
use crate::core::{Appointment, AppointmentStatus, DataService, NewAppointment, lifecycle};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Entry point for every appointment operation
///
/// Each mutation reads one record, applies a lifecycle transition in memory
/// and writes the record back through the persistence collaborator.
#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn DataService<Appointment>>,
}

impl AppointmentService {
    pub fn new(store: impl DataService<Appointment> + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<dyn DataService<Appointment>>) -> Self {
        Self { store }
    }

    /// Validate a booking request and persist it as `pending`
    pub async fn create(&self, input: NewAppointment) -> AgendaResult<Appointment> {
        let appointment = Appointment::create(input, Utc::now()).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejected appointment request");
        })?;

        let created = self
            .store
            .create(appointment)
            .await
            .map_err(|e| StorageError::operation("create appointment", e))?;

        tracing::info!(
            appointment_id = %created.id,
            service_type = %created.service_type,
            scheduled_date = %created.scheduled_date,
            "Appointment created"
        );
        Ok(created)
    }

    /// Fetch one appointment
    pub async fn get(&self, id: &Uuid) -> AgendaResult<Appointment> {
        self.store
            .get(id)
            .await
            .map_err(|e| StorageError::operation("get appointment", e))?
            .ok_or_else(|| AppointmentError::NotFound { id: *id }.into())
    }

    /// Confirm a pending appointment
    pub async fn confirm(&self, id: &Uuid) -> AgendaResult<Appointment> {
        self.transition(id, "confirm", lifecycle::confirm).await
    }

    /// Cancel an appointment; a missing reason is stored as an empty string
    pub async fn cancel(&self, id: &Uuid, reason: Option<String>) -> AgendaResult<Appointment> {
        let reason = reason.map(|r| r.trim().to_string()).unwrap_or_default();
        self.transition(id, "cancel", move |appointment, now| {
            lifecycle::cancel(appointment, reason, now)
        })
        .await
    }

    /// Mark a confirmed appointment as completed (manual staff action)
    pub async fn complete(&self, id: &Uuid) -> AgendaResult<Appointment> {
        self.transition(id, "complete", lifecycle::complete).await
    }

    async fn transition<F>(&self, id: &Uuid, action: &str, apply: F) -> AgendaResult<Appointment>
    where
        F: FnOnce(&mut Appointment, DateTime<Utc>) -> Result<(), AppointmentError>,
    {
        let mut appointment = self.get(id).await?;
        let from = appointment.status;

        if let Err(e) = apply(&mut appointment, Utc::now()) {
            tracing::warn!(appointment_id = %id, %from, action, "Transition rejected");
            return Err(e.into());
        }

        let updated = self
            .store
            .update(id, appointment)
            .await
            .map_err(|e| StorageError::operation("update appointment", e))?;

        tracing::info!(
            appointment_id = %id,
            %from,
            to = %updated.status,
            "Appointment {}",
            action
        );
        Ok(updated)
    }

    /// Filter, sort by scheduled date (latest first) and paginate
    pub async fn list(
        &self,
        filter: &AppointmentFilter,
        page: usize,
        limit: usize,
    ) -> AgendaResult<PaginatedResponse<Appointment>> {
        let mut matching: Vec<Appointment> = self
            .all()
            .await?
            .into_iter()
            .filter(|a| filter.matches(a))
            .collect();
        sort_by_schedule_desc(&mut matching);

        tracing::debug!(
            total = matching.len(),
            page,
            limit,
            status = ?filter.status,
            "Listing appointments"
        );
        Ok(PaginatedResponse::from_items(matching, page, limit))
    }

    /// Non-cancelled appointments scheduled within the next `days` days
    pub async fn find_upcoming(&self, days: u32) -> AgendaResult<Vec<Appointment>> {
        self.find_upcoming_at(days, Utc::now()).await
    }

    /// Same as [`find_upcoming`](Self::find_upcoming) with an explicit clock,
    /// sorted soonest first
    pub async fn find_upcoming_at(
        &self,
        days: u32,
        now: DateTime<Utc>,
    ) -> AgendaResult<Vec<Appointment>> {
        let until = Duration::try_days(i64::from(days))
            .and_then(|window| now.checked_add_signed(window))
            .ok_or_else(|| RequestError::InvalidQuery {
                param: "days".to_string(),
                message: format!("days={} reaches past the latest representable date", days),
            })?;

        let mut upcoming: Vec<Appointment> = self
            .all()
            .await?
            .into_iter()
            .filter(|a| a.status != AppointmentStatus::Cancelled)
            .filter(|a| a.scheduled_date >= now && a.scheduled_date <= until)
            .collect();
        upcoming.sort_by(|a, b| a.scheduled_date.cmp(&b.scheduled_date));

        Ok(upcoming)
    }

    /// Every appointment currently in `status`
    pub async fn find_by_status(&self, status: AppointmentStatus) -> AgendaResult<Vec<Appointment>> {
        let filter = AppointmentFilter::with_status(status);
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|a| filter.matches(a))
            .collect())
    }

    async fn all(&self) -> AgendaResult<Vec<Appointment>> {
        Ok(self
            .store
            .list()
            .await
            .map_err(|e| StorageError::operation("list appointments", e))?)
    }
}
