//! Calendar adapter
//!
//! Maps appointments to the event objects a week/day calendar widget
//! consumes, and maps widget interactions back to screen actions. Pure
//! functions only; no network access happens here.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use shared::time::to_local_input;
use shared::{
    Appointment, AppointmentStatus, ClientSummary, Professional, ProfessionalSummary, Ref,
    ServiceSummary,
};

use crate::availability::{self, BusinessHours};

pub const DEFAULT_BACKGROUND_COLOR: &str = "#6366f1";
pub const DEFAULT_BORDER_COLOR: &str = "#4f46e5";
pub const DEFAULT_TEXT_COLOR: &str = "#f9fafb";
pub const TIME_OFF_COLOR: &str = "rgba(239,68,68,0.25)";

// ============================================================================
// Event shapes
// ============================================================================

/// Rendering mode of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDisplay {
    /// Non-interactive shaded block behind the grid
    Background,
}

/// Event object handed to the calendar widget
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<EventDisplay>,
    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap: Option<bool>,
    pub extended_props: EventProps,
}

impl CalendarEvent {
    pub fn is_time_off(&self) -> bool {
        self.extended_props.is_time_off
    }
}

/// Metadata carried along with an event
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventProps {
    pub is_time_off: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Ref<ClientSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional: Option<Ref<ProfessionalSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Ref<ServiceSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ============================================================================
// Forward mapping
// ============================================================================

/// Which professional's appointments are shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfessionalFilter {
    #[default]
    All,
    One(String),
}

impl ProfessionalFilter {
    /// `"all"` or an empty value selects everyone.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => Self::All,
            id => Self::One(id.to_string()),
        }
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        match self {
            Self::All => true,
            Self::One(id) => appointment.belongs_to(id),
        }
    }

    pub fn professional_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::One(id) => Some(id),
        }
    }
}

/// `"{service} · {client} ({professional})"`
pub fn event_title(appointment: &Appointment) -> String {
    format!(
        "{} · {} ({})",
        appointment.service.resolve_name(),
        appointment.client.resolve_name(),
        appointment.professional.resolve_name()
    )
}

/// Appointment to calendar event.
///
/// Colors: service color, else professional color, else the default accent.
pub fn appointment_event(appointment: &Appointment) -> CalendarEvent {
    let color = appointment
        .service
        .color()
        .or_else(|| appointment.professional.color());

    CalendarEvent {
        id: appointment.id.clone(),
        title: Some(event_title(appointment)),
        start: appointment.start.clone(),
        end: appointment.end.clone(),
        display: None,
        background_color: color.unwrap_or(DEFAULT_BACKGROUND_COLOR).to_string(),
        border_color: Some(color.unwrap_or(DEFAULT_BORDER_COLOR).to_string()),
        text_color: Some(DEFAULT_TEXT_COLOR.to_string()),
        overlap: None,
        extended_props: EventProps {
            is_time_off: false,
            status: Some(appointment.status),
            client: Some(appointment.client.clone()),
            professional: Some(appointment.professional.clone()),
            service: Some(appointment.service.clone()),
            notes: appointment.notes.clone(),
            reason: None,
        },
    }
}

/// Events for every appointment passing `filter`, in input order.
pub fn appointment_events(
    appointments: &[Appointment],
    filter: &ProfessionalFilter,
) -> Vec<CalendarEvent> {
    appointments
        .iter()
        .filter(|a| filter.matches(a))
        .map(appointment_event)
        .collect()
}

// ============================================================================
// Reverse mapping
// ============================================================================

/// Interaction reported by the widget
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarInteraction {
    /// Empty slot range selected
    Select { start: DateTime<Utc> },
    /// Event clicked
    EventClick { event_id: String, is_time_off: bool },
}

impl CalendarInteraction {
    pub fn click(event: &CalendarEvent) -> Self {
        Self::EventClick {
            event_id: event.id.clone(),
            is_time_off: event.is_time_off(),
        }
    }
}

/// What the screen should do in response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarAction {
    /// Open the create form pre-filled with a local start (`YYYY-MM-DDTHH:MM`)
    OpenCreate { start_local: String },
    /// Open the detail view of an appointment
    OpenDetail { appointment_id: String },
    None,
}

pub fn interpret(interaction: &CalendarInteraction, tz: Tz) -> CalendarAction {
    match interaction {
        CalendarInteraction::Select { start } => CalendarAction::OpenCreate {
            start_local: to_local_input(*start, tz),
        },
        CalendarInteraction::EventClick { is_time_off: true, .. } => CalendarAction::None,
        CalendarInteraction::EventClick { event_id, .. } => CalendarAction::OpenDetail {
            appointment_id: event_id.clone(),
        },
    }
}

// ============================================================================
// Widget options
// ============================================================================

/// Static widget configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarOptions {
    pub initial_view: &'static str,
    pub slot_duration: String,
    pub slot_label_interval: &'static str,
    pub slot_min_time: &'static str,
    pub slot_max_time: &'static str,
    /// 1 = Monday
    pub first_day: u8,
    pub all_day_slot: bool,
    pub selectable: bool,
    pub now_indicator: bool,
    pub business_hours: BusinessHours,
}

impl CalendarOptions {
    /// Options with slots of `interval_min` minutes (30 when unset or zero).
    pub fn new(interval_min: Option<u32>) -> Self {
        let minutes = interval_min.filter(|m| *m > 0).unwrap_or(30);
        Self {
            initial_view: "timeGridWeek",
            slot_duration: format!("{:02}:{:02}:00", minutes / 60, minutes % 60),
            slot_label_interval: "01:00",
            slot_min_time: "05:00:00",
            slot_max_time: "23:00:00",
            first_day: 1,
            all_day_slot: false,
            selectable: true,
            now_indicator: true,
            business_hours: BusinessHours::Unconstrained,
        }
    }

    pub fn with_business_hours(mut self, business_hours: BusinessHours) -> Self {
        self.business_hours = business_hours;
        self
    }
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Everything the widget needs for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFeed {
    pub options: CalendarOptions,
    pub events: Vec<CalendarEvent>,
}

/// Appointment events plus the selected professional's constraints.
pub fn build_feed(
    appointments: &[Appointment],
    professional: Option<&Professional>,
    interval_min: Option<u32>,
) -> CalendarFeed {
    let filter = professional
        .map(|p| ProfessionalFilter::One(p.id.clone()))
        .unwrap_or_default();

    let mut events = appointment_events(appointments, &filter);
    if let Some(pro) = professional {
        events.extend(availability::time_off_overlays(pro));
    }

    CalendarFeed {
        options: CalendarOptions::new(interval_min)
            .with_business_hours(availability::business_hours(professional)),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn appointment(value: serde_json::Value) -> Appointment {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Vec<Appointment> {
        vec![
            appointment(json!({
                "_id": "a1",
                "service": {"_id": "s1", "name": "Corte", "color": "#f97316"},
                "professional": {"_id": "p1", "name": "Laura", "color": "#22c55e"},
                "client": {"_id": "c1", "name": "Juan"},
                "start": "2025-03-03T12:00:00.000Z",
                "end": "2025-03-03T12:30:00.000Z",
                "status": "confirmed"
            })),
            appointment(json!({
                "_id": "a2",
                "service": "s2",
                "professional": "p2",
                "client": {"_id": "c2", "email": "ana@x.com"},
                "start": "2025-03-03T13:00:00.000Z",
                "status": "pending",
                "notes": "primera vez"
            })),
        ]
    }

    #[test]
    fn test_title_and_color_precedence() {
        let events = appointment_events(&sample(), &ProfessionalFilter::All);
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].title.as_deref(), Some("Corte · Juan (Laura)"));
        assert_eq!(events[0].background_color, "#f97316");
        assert_eq!(events[0].border_color.as_deref(), Some("#f97316"));
        assert_eq!(events[0].text_color.as_deref(), Some(DEFAULT_TEXT_COLOR));

        assert_eq!(events[1].title.as_deref(), Some("s2 · ana@x.com (p2)"));
        assert_eq!(events[1].background_color, DEFAULT_BACKGROUND_COLOR);
        assert_eq!(events[1].border_color.as_deref(), Some(DEFAULT_BORDER_COLOR));
        assert_eq!(events[1].extended_props.notes.as_deref(), Some("primera vez"));
        assert!(!events[1].is_time_off());
    }

    #[test]
    fn test_professional_color_when_service_has_none() {
        let a = appointment(json!({
            "_id": "a3",
            "service": {"_id": "s3", "name": "Barba"},
            "professional": {"_id": "p1", "color": "#22c55e"},
            "client": "c1",
            "start": "2025-03-03T15:00:00.000Z",
            "status": "confirmed"
        }));
        assert_eq!(appointment_event(&a).background_color, "#22c55e");
    }

    #[test]
    fn test_filter_matches_both_reference_shapes() {
        let appointments = sample();
        let p1 = appointment_events(&appointments, &ProfessionalFilter::parse("p1"));
        assert_eq!(p1.len(), 1);
        assert_eq!(p1[0].id, "a1");

        let p2 = appointment_events(&appointments, &ProfessionalFilter::One("p2".into()));
        assert_eq!(p2[0].id, "a2");

        assert_eq!(ProfessionalFilter::parse("all"), ProfessionalFilter::All);
    }

    #[test]
    fn test_deleted_references_still_render() {
        let orphan = appointment(json!({
            "_id": "a4",
            "service": {"_id": "s1", "name": "Corte"},
            "professional": null,
            "client": null,
            "start": "2025-03-03T16:00:00.000Z",
            "status": "confirmed"
        }));
        let mut appointments = sample();
        appointments.push(orphan);

        let all = appointment_events(&appointments, &ProfessionalFilter::All);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].title.as_deref(), Some("Corte ·  ()"));
        assert_eq!(all[2].background_color, DEFAULT_BACKGROUND_COLOR);

        let p1 = appointment_events(&appointments, &ProfessionalFilter::parse("p1"));
        assert_eq!(p1.len(), 1);
    }

    #[test]
    fn test_interpret_interactions() {
        let tz: Tz = "America/Argentina/Buenos_Aires".parse().unwrap();
        let start = "2025-03-03T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(
            interpret(&CalendarInteraction::Select { start }, tz),
            CalendarAction::OpenCreate {
                start_local: "2025-03-03T09:00".into()
            }
        );

        let events = appointment_events(&sample(), &ProfessionalFilter::All);
        assert_eq!(
            interpret(&CalendarInteraction::click(&events[0]), tz),
            CalendarAction::OpenDetail {
                appointment_id: "a1".into()
            }
        );

        let time_off = CalendarInteraction::EventClick {
            event_id: "timeoff-p1-0".into(),
            is_time_off: true,
        };
        assert_eq!(interpret(&time_off, tz), CalendarAction::None);
    }

    #[test]
    fn test_options_serialization() {
        let value = serde_json::to_value(CalendarOptions::new(Some(15))).unwrap();
        assert_eq!(value["slotDuration"], "00:15:00");
        assert_eq!(value["slotMinTime"], "05:00:00");
        assert_eq!(value["firstDay"], 1);
        assert_eq!(value["allDaySlot"], false);
        assert_eq!(value["businessHours"], true);

        assert_eq!(CalendarOptions::new(Some(90)).slot_duration, "01:30:00");
        assert_eq!(CalendarOptions::default().slot_duration, "00:30:00");
    }

    #[test]
    fn test_feed_includes_time_off_for_selected_professional() {
        let pro: Professional = serde_json::from_value(json!({
            "_id": "p1",
            "workingHours": [{"dayOfWeek": 1, "startTime": "09:00", "endTime": "18:00"}],
            "timeOff": [{"start": "2025-03-04T10:00:00.000Z", "end": "2025-03-04T12:00:00.000Z"}]
        }))
        .unwrap();

        let feed = build_feed(&sample(), Some(&pro), None);
        assert_eq!(feed.events.len(), 2);
        assert_eq!(feed.events[0].id, "a1");
        assert!(feed.events[1].is_time_off());
        assert!(matches!(feed.options.business_hours, BusinessHours::Rules(_)));

        let all = build_feed(&sample(), None, Some(30));
        assert_eq!(all.events.len(), 2);
        assert_eq!(all.options.business_hours, BusinessHours::Unconstrained);
    }
}
