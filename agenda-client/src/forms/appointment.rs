//! Appointment form

use chrono::Duration;
use chrono_tz::Tz;
use shared::time::{iso_to_local_input, local_input_to_utc, to_iso};
use shared::{Appointment, AppointmentPayload, AppointmentStatus, Professional, Service};

use super::{Form, FormContext, FormErrors, optional};
use crate::messages::Text;

/// Starts up to this far behind "now" are still accepted.
const PAST_TOLERANCE_MINUTES: i64 = 5;

/// Raw appointment input. `start_local` is a `datetime-local` value in the
/// business timezone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub client_id: String,
    pub professional_id: String,
    pub service_id: String,
    pub start_local: String,
    pub notes: String,
    pub status: Option<AppointmentStatus>,
    /// Start loaded from an existing appointment
    original_start: Option<String>,
}

impl AppointmentForm {
    /// Create form pre-filled from a calendar slot.
    pub fn with_start_local(start_local: impl Into<String>) -> Self {
        Self {
            start_local: start_local.into(),
            ..Default::default()
        }
    }

    /// Edit form for an existing appointment.
    pub fn from_appointment(appointment: &Appointment, tz: Tz) -> Self {
        let start_local = iso_to_local_input(&appointment.start, tz);
        Self {
            client_id: appointment.client.id().to_string(),
            professional_id: appointment.professional.id().to_string(),
            service_id: appointment.service.id().to_string(),
            start_local: start_local.clone(),
            notes: appointment.notes.clone().unwrap_or_default(),
            status: Some(appointment.status),
            original_start: Some(start_local),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.original_start.is_some()
    }

    /// Select a professional; a chosen service outside their capability set
    /// is cleared.
    pub fn set_professional(&mut self, professional_id: &str, professionals: &[Professional]) {
        self.professional_id = professional_id.to_string();
        if self.service_id.is_empty() {
            return;
        }
        let offered = professionals
            .iter()
            .find(|p| p.id == professional_id)
            .is_some_and(|p| p.offers(&self.service_id));
        if !offered {
            tracing::debug!(
                professional = professional_id,
                service = %self.service_id,
                "Service not offered by professional, clearing"
            );
            self.service_id.clear();
        }
    }

    /// Active services selectable for the current professional (all when none
    /// is selected). The currently chosen service stays listed even if it was
    /// disabled later.
    pub fn available_services<'a>(
        &self,
        services: &'a [Service],
        professionals: &[Professional],
    ) -> Vec<&'a Service> {
        let selected = professionals
            .iter()
            .find(|p| !self.professional_id.is_empty() && p.id == self.professional_id);
        services
            .iter()
            .filter(|s| s.is_active || s.id == self.service_id)
            .filter(|s| selected.is_none_or(|pro| pro.offers(&s.id)))
            .collect()
    }

    fn start_unchanged(&self) -> bool {
        self.original_start.as_deref() == Some(self.start_local.trim())
    }
}

impl Form for AppointmentForm {
    type Payload = AppointmentPayload;

    fn validate(&self, ctx: &FormContext) -> Result<AppointmentPayload, FormErrors> {
        let locale = ctx.locale;
        let mut errors = FormErrors::new();

        if self.client_id.trim().is_empty() {
            errors.require("client", Text::ClientRequired, locale);
        }
        if self.professional_id.trim().is_empty() {
            errors.require("professional", Text::ProfessionalRequired, locale);
        }
        if self.service_id.trim().is_empty() {
            errors.require("service", Text::ServiceRequired, locale);
        }

        let mut start = None;
        if self.start_local.trim().is_empty() {
            errors.require("start", Text::StartRequired, locale);
        } else {
            match local_input_to_utc(&self.start_local, ctx.timezone) {
                Ok(instant) => {
                    let limit = ctx.now - Duration::minutes(PAST_TOLERANCE_MINUTES);
                    if instant < limit && !self.start_unchanged() {
                        errors.require("start", Text::StartInPast, locale);
                    }
                    start = Some(instant);
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected start input");
                    errors.require("start", Text::StartInvalid, locale);
                }
            }
        }

        let Some(start) = start else {
            return Err(errors);
        };
        errors.into_result(|| AppointmentPayload {
            service: self.service_id.trim().to_string(),
            professional: self.professional_id.trim().to_string(),
            client: self.client_id.trim().to_string(),
            start: to_iso(start),
            end: None,
            status: self.status,
            source: None,
            notes: optional(&self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use chrono::{DateTime, Utc};
    use shared::time::parse_instant;

    fn tz() -> Tz {
        chrono_tz::America::Argentina::Buenos_Aires
    }

    // 2025-03-03 12:00 local
    fn ctx() -> FormContext {
        let now = "2025-03-03T15:00:00Z".parse::<DateTime<Utc>>().unwrap();
        FormContext::new(Locale::Es, tz()).at(now)
    }

    fn filled(start_local: &str) -> AppointmentForm {
        AppointmentForm {
            client_id: "c1".into(),
            professional_id: "p1".into(),
            service_id: "s1".into(),
            ..AppointmentForm::with_start_local(start_local)
        }
    }

    fn professional(id: &str, services: &[&str]) -> Professional {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": id,
            "services": services,
        }))
        .unwrap()
    }

    #[test]
    fn test_start_converted_to_instant() {
        let payload = filled("2025-03-03T14:30").validate(&ctx()).unwrap();
        assert_eq!(payload.start, "2025-03-03T17:30:00.000Z");
        assert_eq!(payload.status, None);

        // re-parsing yields the same instant
        let again = parse_instant(&payload.start).unwrap();
        assert_eq!(again, local_input_to_utc("2025-03-03T14:30", tz()).unwrap());
    }

    #[test]
    fn test_start_in_past_rejected() {
        let errors = filled("2025-03-03T11:50").validate(&ctx()).unwrap_err();
        assert_eq!(
            errors.field("start"),
            Some("El turno no puede estar en el pasado")
        );

        // within tolerance
        assert!(filled("2025-03-03T11:56").validate(&ctx()).is_ok());
    }

    #[test]
    fn test_required_and_invalid_fields() {
        let errors = AppointmentForm::default().validate(&ctx()).unwrap_err();
        assert_eq!(errors.field("client"), Some("Seleccioná un cliente"));
        assert_eq!(errors.field("professional"), Some("Seleccioná un profesional"));
        assert_eq!(errors.field("service"), Some("Seleccioná un servicio"));
        assert_eq!(errors.field("start"), Some("Indicá la fecha y hora de inicio"));

        let errors = filled("mañana").validate(&ctx()).unwrap_err();
        assert_eq!(errors.field("start"), Some("Fecha y hora inválidas"));
    }

    #[test]
    fn test_switching_professional_clears_foreign_service() {
        let pros = vec![professional("p1", &["s1", "s2"]), professional("q1", &["s3"])];
        let mut form = filled("2025-03-03T14:30");

        form.set_professional("p1", &pros);
        assert_eq!(form.service_id, "s1");

        form.set_professional("q1", &pros);
        assert_eq!(form.professional_id, "q1");
        assert!(form.service_id.is_empty());
    }

    #[test]
    fn test_available_services_follow_professional() {
        let services: Vec<Service> = serde_json::from_value(serde_json::json!([
            {"_id": "s1", "name": "Corte", "durationMinutes": 30},
            {"_id": "s2", "name": "Color", "durationMinutes": 90},
            {"_id": "s3", "name": "Barba", "durationMinutes": 20}
        ]))
        .unwrap();
        let pros = vec![professional("p1", &["s1", "s2"])];

        let mut form = AppointmentForm::default();
        assert_eq!(form.available_services(&services, &pros).len(), 3);

        form.set_professional("p1", &pros);
        let names: Vec<_> = form
            .available_services(&services, &pros)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["Corte", "Color"]);
    }

    #[test]
    fn test_available_services_skip_inactive() {
        let services: Vec<Service> = serde_json::from_value(serde_json::json!([
            {"_id": "s1", "name": "Corte", "durationMinutes": 30},
            {"_id": "s2", "name": "Color", "durationMinutes": 90, "isActive": false}
        ]))
        .unwrap();
        let pros = vec![professional("p1", &["s1", "s2"])];

        let mut form = AppointmentForm::default();
        form.set_professional("p1", &pros);
        let ids: Vec<_> = form
            .available_services(&services, &pros)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["s1"]);

        // an existing booking keeps its disabled service selectable
        form.service_id = "s2".into();
        assert_eq!(form.available_services(&services, &pros).len(), 2);
    }

    #[test]
    fn test_editing_keeps_unchanged_past_start() {
        let appointment: Appointment = serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "service": {"_id": "s1", "name": "Corte"},
            "professional": "p1",
            "client": {"_id": "c1", "name": "Ana"},
            "start": "2025-03-01T13:00:00.000Z",
            "status": "confirmed",
            "notes": "Primera visita"
        }))
        .unwrap();
        let mut form = AppointmentForm::from_appointment(&appointment, tz());
        assert!(form.is_editing());
        assert_eq!(form.start_local, "2025-03-01T10:00");

        let payload = form.validate(&ctx()).unwrap();
        assert_eq!(payload.status, Some(AppointmentStatus::Confirmed));
        assert_eq!(payload.notes.as_deref(), Some("Primera visita"));

        form.start_local = "2025-03-02T10:00".into();
        assert!(form.validate(&ctx()).is_err());
    }
}
