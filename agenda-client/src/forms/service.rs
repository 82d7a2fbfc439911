//! Service form

use shared::{Service, ServicePayload};
use validator::Validate;

use super::{Form, FormContext, FormErrors, optional};
use crate::messages::Text;

/// Raw service input
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceForm {
    pub name: String,
    pub description: String,
    pub duration_minutes: Option<i64>,
    pub price: Option<f64>,
    pub color: String,
    pub allow_overlap: bool,
    /// Only read when `allow_overlap` is set
    pub max_concurrent_appointments: Option<i64>,
}

#[derive(Debug, Validate)]
struct ServiceRules {
    #[validate(length(min = 2, code = "name_too_short"))]
    name: String,
    #[validate(range(min = 1, code = "duration_positive"))]
    duration_minutes: Option<i64>,
    #[validate(range(min = 0.0, code = "price_negative"))]
    price: Option<f64>,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            duration_minutes: Some(60),
            price: None,
            color: String::new(),
            allow_overlap: false,
            max_concurrent_appointments: Some(1),
        }
    }
}

impl ServiceForm {
    pub fn from_service(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone().unwrap_or_default(),
            duration_minutes: Some(i64::from(service.duration_minutes)),
            price: Some(service.price),
            color: service.color.clone().unwrap_or_default(),
            allow_overlap: service.allow_overlap,
            max_concurrent_appointments: Some(i64::from(
                service.max_concurrent_appointments.unwrap_or(1),
            )),
        }
    }
}

impl Form for ServiceForm {
    type Payload = ServicePayload;

    fn validate(&self, ctx: &FormContext) -> Result<ServicePayload, FormErrors> {
        let locale = ctx.locale;
        let mut errors = FormErrors::new();

        if self.name.trim().is_empty() {
            errors.require("name", Text::NameRequired, locale);
        }
        // Out-of-range values are reported; the placeholders below never reach a payload.
        let duration_minutes = match self.duration_minutes {
            None => {
                errors.require("duration_minutes", Text::DurationRequired, locale);
                0
            }
            Some(d) if d > i64::from(u32::MAX) => {
                errors.require("duration_minutes", Text::DurationTooLong, locale);
                0
            }
            // below 1 is reported by the range rule
            Some(d) => u32::try_from(d).unwrap_or_default(),
        };
        let max_concurrent_appointments = if self.allow_overlap {
            let field = "max_concurrent_appointments";
            match self.max_concurrent_appointments {
                None => {
                    errors.require(field, Text::MaxConcurrentRequired, locale);
                    1
                }
                Some(n) if n < 1 => {
                    errors.require(field, Text::MaxConcurrentMin, locale);
                    1
                }
                Some(n) => match u32::try_from(n) {
                    Ok(n) => n,
                    Err(_) => {
                        errors.require(field, Text::MaxConcurrentTooHigh, locale);
                        1
                    }
                },
            }
        } else {
            1
        };
        let rules = ServiceRules {
            name: self.name.trim().to_string(),
            duration_minutes: self.duration_minutes,
            price: self.price,
        };
        if let Err(e) = rules.validate() {
            errors.merge_validation(&e, locale);
        }

        errors.into_result(|| ServicePayload {
            name: self.name.trim().to_string(),
            description: optional(&self.description),
            duration_minutes,
            price: self.price,
            category: None,
            color: optional(&self.color),
            allow_overlap: self.allow_overlap,
            max_concurrent_appointments,
        })
    }
}
