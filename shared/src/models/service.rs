//! Service Model

use serde::{Deserialize, Serialize};

use crate::reference::Named;

/// Bookable offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    /// Calendar color, takes precedence over the professional's color
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub allow_overlap: bool,
    /// Only meaningful when `allow_overlap` is set
    #[serde(default)]
    pub max_concurrent_appointments: Option<u32>,
    /// Soft-disable flag
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Service {
    /// Concurrent appointments allowed for this service; always 1 without overlap.
    pub fn effective_max_concurrent(&self) -> u32 {
        if self.allow_overlap {
            self.max_concurrent_appointments.unwrap_or(1).max(1)
        } else {
            1
        }
    }

    /// Split a catalog into active and soft-disabled services, keeping order.
    pub fn partition_active(services: &[Service]) -> (Vec<&Service>, Vec<&Service>) {
        services.iter().partition(|s| s.is_active)
    }
}

/// Populated `service` reference (appointments, professional capability set)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

/// Create/update service payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub allow_overlap: bool,
    pub max_concurrent_appointments: u32,
}

impl Named for Service {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

impl Named for ServiceSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}
