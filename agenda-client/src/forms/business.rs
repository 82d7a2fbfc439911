//! Business settings form

use shared::time::parse_timezone;
use shared::{
    Business, BusinessPayload, DEFAULT_APPOINTMENT_INTERVAL_MIN, DEFAULT_TIMEZONE, OpeningHours,
};
use validator::Validate;

use super::{Form, FormContext, FormErrors, optional};
use crate::messages::Text;

/// Raw business settings input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// IANA zone name
    pub timezone: String,
    pub is_active: bool,
    pub appointment_interval_min: Option<i64>,
    pub opening_hours: OpeningHours,
}

#[derive(Debug, Validate)]
struct BusinessRules {
    #[validate(length(min = 2, code = "name_too_short"))]
    name: String,
    #[validate(email(code = "email_invalid"))]
    email: Option<String>,
    #[validate(length(min = 6, code = "phone_too_short"))]
    phone: Option<String>,
    #[validate(range(min = 5, code = "interval_min"))]
    appointment_interval_min: Option<i64>,
}

impl Default for BusinessForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            is_active: true,
            appointment_interval_min: Some(i64::from(DEFAULT_APPOINTMENT_INTERVAL_MIN)),
            opening_hours: OpeningHours::default(),
        }
    }
}

impl BusinessForm {
    /// Load a stored business; opening hours are normalized.
    pub fn from_business(business: &Business) -> Self {
        Self {
            name: business.name.clone(),
            email: business.email.clone().unwrap_or_default(),
            phone: business.phone.clone().unwrap_or_default(),
            address: business.address.clone().unwrap_or_default(),
            timezone: business.timezone.clone(),
            is_active: business.is_active,
            appointment_interval_min: Some(i64::from(business.appointment_interval_min)),
            opening_hours: business.opening_hours(),
        }
    }
}

impl Form for BusinessForm {
    type Payload = BusinessPayload;

    fn validate(&self, ctx: &FormContext) -> Result<BusinessPayload, FormErrors> {
        let locale = ctx.locale;
        let rules = BusinessRules {
            name: self.name.trim().to_string(),
            email: optional(&self.email),
            phone: optional(&self.phone),
            appointment_interval_min: self.appointment_interval_min,
        };

        let mut errors = FormErrors::new();
        if rules.name.is_empty() {
            errors.require("name", Text::NameRequired, locale);
        }
        if rules.appointment_interval_min.is_none() {
            errors.require("appointment_interval_min", Text::IntervalMin, locale);
        }
        if let Err(e) = rules.validate() {
            errors.merge_validation(&e, locale);
        }
        let timezone = self.timezone.trim();
        if parse_timezone(timezone).is_err() {
            errors.require("timezone", Text::TimezoneUnknown, locale);
        }

        errors.into_result(|| BusinessPayload {
            name: rules.name,
            email: rules.email,
            phone: rules.phone,
            address: optional(&self.address),
            timezone: timezone.to_string(),
            is_active: self.is_active,
            appointment_interval_min: rules
                .appointment_interval_min
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(DEFAULT_APPOINTMENT_INTERVAL_MIN),
            opening_hours: self.opening_hours.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use shared::DayKey;

    fn ctx() -> FormContext {
        FormContext::new(Locale::Es, chrono_tz::UTC)
    }

    #[test]
    fn test_from_business_normalizes_hours() {
        let business: Business = serde_json::from_value(serde_json::json!({
            "_id": "b1",
            "name": "Peluquería Centro",
            "openingHours": {"sat": {"enabled": true, "startTime": "09:00", "endTime": "12:00"}}
        }))
        .unwrap();
        let form = BusinessForm::from_business(&business);
        assert_eq!(form.timezone, "America/Argentina/Buenos_Aires");
        assert_eq!(form.appointment_interval_min, Some(30));
        assert_eq!(form.opening_hours.day(DayKey::Sat).ranges.len(), 1);

        let payload = form.validate(&ctx()).unwrap();
        assert_eq!(payload.name, "Peluquería Centro");
        assert_eq!(payload.email, None);
        assert_eq!(payload.opening_hours.sat.ranges[0].end_time, "12:00");
    }

    #[test]
    fn test_interval_and_timezone_rules() {
        let form = BusinessForm {
            name: "Centro".into(),
            timezone: "Mars/Olympus".into(),
            appointment_interval_min: Some(3),
            ..Default::default()
        };
        let errors = form.validate(&ctx()).unwrap_err();
        assert_eq!(
            errors.field("appointment_interval_min"),
            Some("El intervalo debe ser de al menos 5 minutos")
        );
        assert_eq!(errors.field("timezone"), Some("Zona horaria desconocida"));
    }

    #[test]
    fn test_name_required() {
        let errors = BusinessForm::default().validate(&ctx()).unwrap_err();
        assert_eq!(errors.field("name"), Some("El nombre es obligatorio"));
        assert_eq!(errors.fields().len(), 1);
    }
}
