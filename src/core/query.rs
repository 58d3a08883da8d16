//! Query parameters, filtering and pagination utilities

use crate::core::appointment::{Appointment, AppointmentStatus};
use crate::core::error::RequestError;
use serde::{Deserialize, Serialize};

/// Query parameters for the appointment list
///
/// # Example
/// ```text
/// GET /api/appointments?page=2&limit=10
/// GET /api/appointments?search=silva&status=pending
/// GET /api/appointments?status=all
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Free text matched against name, email, phone and document id
    pub search: Option<String>,

    /// Exact status, or `all` for no status filter
    pub status: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            search: None,
            status: None,
        }
    }
}

/// Default page size
pub const DEFAULT_LIMIT: usize = 10;

/// Largest page size a client may request
pub const MAX_LIMIT: usize = 100;

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, clamped to `1..=MAX_LIMIT`
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Build the typed filter, rejecting unknown status names
    pub fn filter(&self) -> Result<AppointmentFilter, RequestError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(raw.parse::<AppointmentStatus>().map_err(|message| {
                RequestError::InvalidQuery {
                    param: "status".to_string(),
                    message,
                }
            })?),
        };

        Ok(AppointmentFilter {
            search: self.search.clone(),
            status,
        })
    }
}

/// Query parameters for the upcoming appointments view
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpcomingParams {
    /// Size of the look-ahead window in days
    pub days: u32,
}

impl Default for UpcomingParams {
    fn default() -> Self {
        Self { days: 7 }
    }
}

/// Criteria narrowing a list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    /// Case-insensitive substring over client name, email, phone and document id
    pub search: Option<String>,

    /// Exact status match
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    pub fn with_status(status: AppointmentStatus) -> Self {
        Self {
            search: None,
            status: Some(status),
        }
    }

    pub fn with_search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            status: None,
        }
    }

    /// Whether `appointment` satisfies every criterion that is set
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if self.status.is_some_and(|status| appointment.status != status) {
            return false;
        }

        let needle = match self.search.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(needle) => needle.to_lowercase(),
        };

        [
            Some(appointment.client_name.as_str()),
            Some(appointment.email.as_str()),
            Some(appointment.phone.as_str()),
            appointment.document_id.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

/// Sort by scheduled date, latest first; ties go to the most recently created
pub fn sort_by_schedule_desc(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        b.scheduled_date
            .cmp(&a.scheduled_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Cut one page out of an already filtered and sorted collection
    pub fn from_items(items: Vec<T>, page: usize, limit: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total = items.len();
        let data = items
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        Self {
            data,
            pagination: PaginationMeta::new(page, limit, total),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}
