//! Professional Model (staff, working hours, time off)

use serde::{Deserialize, Serialize};

use super::service::ServiceSummary;
use super::user::UserSummary;
use crate::reference::{Named, Ref};

/// Weekly availability window for one weekday.
///
/// `day_of_week` uses 0 = Sunday .. 6 = Saturday. A day without an entry is a
/// day off. Times are 24h `HH:MM` strings and are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHour {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

impl WorkingHour {
    pub fn new(day_of_week: u8, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            day_of_week,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// Blocked interval (vacation, leave). `start`/`end` are ISO 8601 instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOff {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    #[serde(rename = "_id")]
    pub id: String,
    /// Backing user account, usually populated
    #[serde(default)]
    pub user_id: Option<Ref<UserSummary>>,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Capability set: only these services may be booked with this professional
    #[serde(default)]
    pub services: Vec<Ref<ServiceSummary>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub allow_overlap: bool,
    #[serde(default)]
    pub working_hours: Vec<WorkingHour>,
    #[serde(default)]
    pub time_off: Vec<TimeOff>,
}

impl Professional {
    /// Ids of the services this professional performs.
    pub fn service_ids(&self) -> Vec<&str> {
        self.services
            .iter()
            .filter(|s| !s.is_missing())
            .map(|s| s.id())
            .collect()
    }

    /// Whether `service_id` is in the capability set.
    pub fn offers(&self, service_id: &str) -> bool {
        self.services.iter().any(|s| s.is(service_id))
    }

    /// Working hour entry for a weekday (0 = Sunday).
    pub fn working_hour(&self, day_of_week: u8) -> Option<&WorkingHour> {
        self.working_hours
            .iter()
            .find(|w| w.day_of_week == day_of_week)
    }

    /// Name shown in selectors and calendar titles.
    pub fn display_name(&self) -> String {
        Named::name(self)
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
            .to_string()
    }

    fn user(&self) -> Option<&UserSummary> {
        self.user_id.as_ref().and_then(|u| u.populated())
    }
}

impl Named for Professional {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.user().and_then(|u| u.name.as_deref()))
    }

    fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .or_else(|| self.user().and_then(|u| u.email.as_deref()))
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// Populated `professional` field of an appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<Ref<UserSummary>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Named for ProfessionalSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty()).or_else(|| {
            self.user_id
                .as_ref()
                .and_then(|u| u.populated())
                .and_then(|u| u.name.as_deref())
        })
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// Create/update professional payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub services: Vec<String>,
    pub allow_overlap: bool,
    pub working_hours: Vec<WorkingHour>,
    pub time_off: Vec<TimeOff>,
}

/// Response of `POST /professionals`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessionalResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub professional: Option<Professional>,
    /// Initial password of the user account created for the professional
    #[serde(default)]
    pub temp_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_professional_from_wire_with_populated_user() {
        let json = r##"{
            "_id": "pro1",
            "userId": {"_id": "u1", "name": "Laura", "email": "laura@x.com", "role": "staff"},
            "business": "b1",
            "services": [{"_id": "s1", "name": "Corte"}, "s2"],
            "color": "#22c55e",
            "workingHours": [{"dayOfWeek": 1, "startTime": "09:00", "endTime": "18:00"}],
            "timeOff": [{"_id": "t1", "start": "2025-01-10T10:00:00.000Z", "end": "2025-01-10T12:00:00.000Z"}]
        }"##;
        let pro: Professional = serde_json::from_str(json).unwrap();

        assert_eq!(pro.display_name(), "Laura");
        assert_eq!(pro.service_ids(), vec!["s1", "s2"]);
        assert!(pro.offers("s2"));
        assert!(!pro.offers("s3"));
        assert!(!pro.allow_overlap);
        assert_eq!(pro.working_hour(1).unwrap().end_time, "18:00");
        assert!(pro.working_hour(2).is_none());
        assert_eq!(pro.time_off[0].reason, None);
    }

    #[test]
    fn test_display_name_prefers_own_name() {
        let json = r##"{"_id":"pro2","name":"Dr. Ruiz","userId":"u2"}"##;
        let pro: Professional = serde_json::from_str(json).unwrap();
        assert_eq!(pro.display_name(), "Dr. Ruiz");

        let json = r##"{"_id":"pro3"}"##;
        let pro: Professional = serde_json::from_str(json).unwrap();
        assert_eq!(pro.display_name(), "pro3");
        assert!(pro.working_hours.is_empty());
    }

    #[test]
    fn test_time_off_serializes_without_missing_fields() {
        let t = TimeOff {
            id: None,
            start: "2025-01-10T10:00:00.000Z".into(),
            end: "2025-01-10T12:00:00.000Z".into(),
            reason: None,
        };
        let value = serde_json::to_value(&t).unwrap();
        assert!(value.get("_id").is_none());
        assert!(value.get("reason").is_none());
    }
}
