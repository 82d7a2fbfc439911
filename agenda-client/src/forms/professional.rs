//! Professional form (basic fields, services, working hours, time off)

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use shared::time::{TimeError, local_input_to_utc, parse_instant, to_iso};
use shared::{Named, Professional, ProfessionalPayload, RangeField, TimeOff, WorkingHour};
use validator::Validate;

use super::{Form, FormContext, FormErrors, optional};
use crate::messages::{Text, text};

const DEFAULT_COLOR: &str = "#6366f1";
const DEFAULT_START: &str = "09:00";
const DEFAULT_END: &str = "18:00";
/// Saturday; days are numbered from Sunday = 0
const LAST_DAY: u8 = 6;

/// Partial update of a time-off row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeOffPatch {
    pub start: Option<String>,
    pub end: Option<String>,
    pub reason: Option<String>,
}

/// Raw professional input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionalForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub color: String,
    pub allow_overlap: bool,
    /// Selected service ids
    pub services: Vec<String>,
    pub working_hours: Vec<WorkingHour>,
    pub time_off: Vec<TimeOff>,
}

#[derive(Debug, Validate)]
struct ProfessionalRules {
    #[validate(length(min = 2, code = "name_too_short"))]
    name: String,
    #[validate(email(code = "email_invalid"))]
    email: String,
    #[validate(length(min = 6, code = "phone_too_short"))]
    phone: String,
}

impl Default for ProfessionalForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            color: DEFAULT_COLOR.to_string(),
            allow_overlap: false,
            services: Vec::new(),
            working_hours: Vec::new(),
            time_off: Vec::new(),
        }
    }
}

impl ProfessionalForm {
    pub fn from_professional(pro: &Professional) -> Self {
        Self {
            name: Named::name(pro).unwrap_or_default().to_string(),
            email: Named::email(pro).unwrap_or_default().to_string(),
            phone: pro.phone.clone().unwrap_or_default(),
            color: pro.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            allow_overlap: pro.allow_overlap,
            services: pro.service_ids().into_iter().map(str::to_string).collect(),
            working_hours: pro.working_hours.clone(),
            time_off: pro.time_off.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------

    pub fn toggle_service(&mut self, service_id: &str) {
        if let Some(pos) = self.services.iter().position(|s| s == service_id) {
            self.services.remove(pos);
        } else {
            self.services.push(service_id.to_string());
        }
    }

    // ------------------------------------------------------------------
    // Working hours
    // ------------------------------------------------------------------

    /// Enable a weekday (09:00–18:00 when new) or drop its entry.
    /// Days past Saturday are ignored.
    pub fn toggle_day(&mut self, day_of_week: u8, enabled: bool) {
        if !valid_day(day_of_week) {
            return;
        }
        if !enabled {
            self.working_hours.retain(|w| w.day_of_week != day_of_week);
        } else if self.hour_for_day(day_of_week).is_none() {
            self.working_hours
                .push(WorkingHour::new(day_of_week, DEFAULT_START, DEFAULT_END));
        }
    }

    /// Change one bound of a weekday, creating the entry with defaults first.
    /// Days past Saturday are ignored.
    pub fn upsert_working_hour(&mut self, day_of_week: u8, field: RangeField, value: &str) {
        if !valid_day(day_of_week) {
            return;
        }
        if self.hour_for_day(day_of_week).is_none() {
            self.working_hours
                .push(WorkingHour::new(day_of_week, DEFAULT_START, DEFAULT_END));
        }
        if let Some(entry) = self
            .working_hours
            .iter_mut()
            .find(|w| w.day_of_week == day_of_week)
        {
            match field {
                RangeField::Start => entry.start_time = value.to_string(),
                RangeField::End => entry.end_time = value.to_string(),
            }
        }
    }

    pub fn hour_for_day(&self, day_of_week: u8) -> Option<&WorkingHour> {
        self.working_hours
            .iter()
            .find(|w| w.day_of_week == day_of_week)
    }

    // ------------------------------------------------------------------
    // Time off
    // ------------------------------------------------------------------

    /// Append a two-hour block starting at `now`.
    pub fn add_time_off(&mut self, now: DateTime<Utc>) {
        self.time_off.push(TimeOff {
            id: None,
            start: to_iso(now),
            end: to_iso(now + Duration::hours(2)),
            reason: None,
        });
    }

    pub fn update_time_off(&mut self, index: usize, patch: TimeOffPatch) {
        let Some(entry) = self.time_off.get_mut(index) else {
            return;
        };
        if let Some(start) = patch.start {
            entry.start = start;
        }
        if let Some(end) = patch.end {
            entry.end = end;
        }
        if let Some(reason) = patch.reason {
            entry.reason = optional(&reason);
        }
    }

    /// Set a time-off bound from a `datetime-local` value in `tz`.
    pub fn set_time_off_local(
        &mut self,
        index: usize,
        field: RangeField,
        local: &str,
        tz: Tz,
    ) -> Result<(), TimeError> {
        let iso = to_iso(local_input_to_utc(local, tz)?);
        let patch = match field {
            RangeField::Start => TimeOffPatch {
                start: Some(iso),
                ..Default::default()
            },
            RangeField::End => TimeOffPatch {
                end: Some(iso),
                ..Default::default()
            },
        };
        self.update_time_off(index, patch);
        Ok(())
    }

    pub fn remove_time_off(&mut self, index: usize) {
        if index < self.time_off.len() {
            self.time_off.remove(index);
        }
    }

    /// First time-off problem, if any.
    fn time_off_error(&self) -> Option<Text> {
        for t in &self.time_off {
            if t.start.trim().is_empty() || t.end.trim().is_empty() {
                return Some(Text::TimeOffIncomplete);
            }
            match (parse_instant(&t.start), parse_instant(&t.end)) {
                (Some(start), Some(end)) if start >= end => return Some(Text::TimeOffOrder),
                (Some(_), Some(_)) => {}
                _ => return Some(Text::TimeOffIncomplete),
            }
        }
        None
    }
}

impl Form for ProfessionalForm {
    type Payload = ProfessionalPayload;

    fn validate(&self, ctx: &FormContext) -> Result<ProfessionalPayload, FormErrors> {
        let locale = ctx.locale;
        let rules = ProfessionalRules {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        };

        let mut errors = FormErrors::new();
        if rules.name.is_empty() {
            errors.require("name", Text::NameRequired, locale);
        }
        if rules.email.is_empty() {
            errors.require("email", Text::EmailRequired, locale);
        }
        if rules.phone.is_empty() {
            errors.require("phone", Text::PhoneRequired, locale);
        }
        if let Err(e) = rules.validate() {
            errors.merge_validation(&e, locale);
        }

        if self.services.is_empty() {
            errors.add_form(text(locale, Text::ServicesRequired));
        }
        if self.working_hours.iter().any(|w| !valid_day(w.day_of_week)) {
            errors.add_form(text(locale, Text::DayOfWeekInvalid));
        }
        if let Some(key) = self.time_off_error() {
            errors.add_form(text(locale, key));
        }

        errors.into_result(|| ProfessionalPayload {
            name: rules.name,
            email: Some(rules.email),
            phone: Some(rules.phone),
            color: optional(&self.color),
            services: self.services.clone(),
            allow_overlap: self.allow_overlap,
            working_hours: self
                .working_hours
                .iter()
                .filter(|w| !w.start_time.is_empty() && !w.end_time.is_empty())
                .cloned()
                .collect(),
            time_off: self
                .time_off
                .iter()
                .filter(|t| !t.start.is_empty() && !t.end.is_empty())
                .cloned()
                .collect(),
        })
    }
}

fn valid_day(day_of_week: u8) -> bool {
    if day_of_week > LAST_DAY {
        tracing::debug!(day_of_week, "Ignoring out-of-range weekday");
        return false;
    }
    true
}
