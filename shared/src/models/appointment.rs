//! Appointment Model

use serde::{Deserialize, Serialize};

use super::client::ClientSummary;
use super::professional::ProfessionalSummary;
use super::service::ServiceSummary;
use crate::reference::Ref;

/// Appointment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

/// Where the booking came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentSource {
    #[default]
    Manual,
    Online,
}

/// Scheduled booking
///
/// Relational fields may arrive populated or as bare ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub service: Ref<ServiceSummary>,
    #[serde(default)]
    pub professional: Ref<ProfessionalSummary>,
    #[serde(default)]
    pub client: Ref<ClientSummary>,
    /// ISO 8601 instant
    pub start: String,
    /// ISO 8601 instant, usually computed by the backend from the service duration
    #[serde(default)]
    pub end: Option<String>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub source: Option<AppointmentSource>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    /// Whether this appointment is booked with the given professional.
    pub fn belongs_to(&self, professional_id: &str) -> bool {
        self.professional.is(professional_id)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }
}

/// Create/update appointment payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub service: String,
    pub professional: String,
    pub client: String,
    /// ISO 8601 instant
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<AppointmentSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentPayload {
    /// Fill the create defaults: confirmed, manually booked.
    pub fn with_create_defaults(mut self) -> Self {
        self.status.get_or_insert(AppointmentStatus::Confirmed);
        self.source.get_or_insert(AppointmentSource::Manual);
        self
    }
}
