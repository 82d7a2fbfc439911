//! Availability model
//!
//! Derives the calendar's business-hours constraint and the blocked-time
//! overlays from a professional's working hours and time off. Time strings
//! are passed through untouched; nothing here validates them.
//!
//! A professional with no working hours is unconstrained (bookable at any
//! time), not unavailable.

use serde::{Serialize, Serializer};
use shared::{DayKey, OpeningHours, Professional};

use crate::calendar::{CalendarEvent, EventDisplay, EventProps, TIME_OFF_COLOR};

/// One business-hours window of the calendar grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHoursRule {
    /// 0 = Sunday .. 6 = Saturday
    pub days_of_week: Vec<u8>,
    pub start_time: String,
    pub end_time: String,
}

/// Business-hours constraint. Serializes as `true` when unconstrained and as
/// the list of rules otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BusinessHours {
    #[default]
    Unconstrained,
    Rules(Vec<BusinessHoursRule>),
}

impl BusinessHours {
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Self::Unconstrained)
    }

    pub fn rules(&self) -> &[BusinessHoursRule] {
        match self {
            Self::Unconstrained => &[],
            Self::Rules(rules) => rules,
        }
    }
}

impl Serialize for BusinessHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unconstrained => serializer.serialize_bool(true),
            Self::Rules(rules) => rules.serialize(serializer),
        }
    }
}

/// Constraint for the selected professional (`None` = all professionals).
pub fn business_hours(professional: Option<&Professional>) -> BusinessHours {
    let Some(pro) = professional.filter(|p| !p.working_hours.is_empty()) else {
        return BusinessHours::Unconstrained;
    };

    BusinessHours::Rules(
        pro.working_hours
            .iter()
            .map(|wh| BusinessHoursRule {
                days_of_week: vec![wh.day_of_week % 7],
                start_time: wh.start_time.clone(),
                end_time: wh.end_time.clone(),
            })
            .collect(),
    )
}

/// Background events for each time-off block, `[start, end)`.
pub fn time_off_overlays(professional: &Professional) -> Vec<CalendarEvent> {
    professional
        .time_off
        .iter()
        .enumerate()
        .map(|(idx, t)| CalendarEvent {
            id: format!("timeoff-{}-{}", professional.id, idx),
            title: None,
            start: t.start.clone(),
            end: Some(t.end.clone()),
            display: Some(EventDisplay::Background),
            background_color: TIME_OFF_COLOR.to_string(),
            border_color: None,
            text_color: None,
            overlap: Some(true),
            extended_props: EventProps {
                is_time_off: true,
                reason: t.reason.clone(),
                ..Default::default()
            },
        })
        .collect()
}

/// Constraint derived from the business opening hours: one rule per range of
/// each enabled day.
pub fn opening_hours_constraint(hours: &OpeningHours) -> BusinessHours {
    BusinessHours::Rules(
        DayKey::ALL
            .iter()
            .map(|key| (key, hours.day(*key)))
            .filter(|(_, day)| day.enabled)
            .flat_map(|(key, day)| {
                day.ranges.iter().map(|r| BusinessHoursRule {
                    days_of_week: vec![key.day_of_week()],
                    start_time: r.start_time.clone(),
                    end_time: r.end_time.clone(),
                })
            })
            .collect(),
    )
}
