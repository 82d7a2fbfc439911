//! Business Model (tenant settings, opening hours)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Weekday key used by [`OpeningHours`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayKey {
    /// Monday-first order, as shown in the settings screen
    pub const ALL: [DayKey; 7] = [
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
        DayKey::Sun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
            Self::Sun => "sun",
        }
    }

    /// Day number with 0 = Sunday.
    pub fn day_of_week(&self) -> u8 {
        match self {
            Self::Sun => 0,
            Self::Mon => 1,
            Self::Tue => 2,
            Self::Wed => 3,
            Self::Thu => 4,
            Self::Fri => 5,
            Self::Sat => 6,
        }
    }

    /// Inverse of [`DayKey::day_of_week`]; values wrap modulo 7.
    pub fn from_day_of_week(day: u8) -> Self {
        match day % 7 {
            0 => Self::Sun,
            1 => Self::Mon,
            2 => Self::Tue,
            3 => Self::Wed,
            4 => Self::Thu,
            5 => Self::Fri,
            _ => Self::Sat,
        }
    }
}

/// 24h clock range, `HH:MM`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
}

impl TimeRange {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// Field of a [`TimeRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Start,
    End,
}

/// One weekday of the opening hours: a single range or a lunch split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub enabled: bool,
    #[serde(default)]
    pub ranges: Vec<TimeRange>,
}

impl DaySchedule {
    pub fn has_lunch_split(&self) -> bool {
        self.ranges.len() >= 2
    }
}

const MORNING: (&str, &str) = ("08:00", "13:00");
const AFTERNOON: (&str, &str) = ("14:00", "19:00");

fn split_day() -> DaySchedule {
    DaySchedule {
        enabled: true,
        ranges: vec![
            TimeRange::new(MORNING.0, MORNING.1),
            TimeRange::new(AFTERNOON.0, AFTERNOON.1),
        ],
    }
}

/// Per-weekday business availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub mon: DaySchedule,
    pub tue: DaySchedule,
    pub wed: DaySchedule,
    pub thu: DaySchedule,
    pub fri: DaySchedule,
    pub sat: DaySchedule,
    pub sun: DaySchedule,
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            mon: split_day(),
            tue: split_day(),
            wed: split_day(),
            thu: split_day(),
            fri: split_day(),
            sat: DaySchedule {
                enabled: true,
                ranges: vec![TimeRange::new("10:00", "14:00")],
            },
            sun: DaySchedule {
                enabled: false,
                ranges: Vec::new(),
            },
        }
    }
}

impl OpeningHours {
    pub fn day(&self, key: DayKey) -> &DaySchedule {
        match key {
            DayKey::Mon => &self.mon,
            DayKey::Tue => &self.tue,
            DayKey::Wed => &self.wed,
            DayKey::Thu => &self.thu,
            DayKey::Fri => &self.fri,
            DayKey::Sat => &self.sat,
            DayKey::Sun => &self.sun,
        }
    }

    pub fn day_mut(&mut self, key: DayKey) -> &mut DaySchedule {
        match key {
            DayKey::Mon => &mut self.mon,
            DayKey::Tue => &mut self.tue,
            DayKey::Wed => &mut self.wed,
            DayKey::Thu => &mut self.thu,
            DayKey::Fri => &mut self.fri,
            DayKey::Sat => &mut self.sat,
            DayKey::Sun => &mut self.sun,
        }
    }

    /// Rebuild opening hours from whatever the backend stored.
    ///
    /// Starts from [`OpeningHours::default`]. Each day accepts the current
    /// `{enabled, ranges}` shape or the legacy `{enabled, startTime, endTime}`
    /// shape; anything unrecognised keeps the default for that day.
    pub fn normalize(raw: Option<&Value>) -> Self {
        let mut base = Self::default();
        let Some(Value::Object(days)) = raw else {
            return base;
        };

        for key in DayKey::ALL {
            let Some(Value::Object(day)) = days.get(key.as_str()) else {
                continue;
            };
            let current = base.day_mut(key);
            let enabled = day
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(current.enabled);

            if let Some(Value::Array(ranges)) = day.get("ranges") {
                let ranges = ranges
                    .iter()
                    .map(|r| {
                        let field = |name: &str, fallback: &str| {
                            r.get(name)
                                .and_then(Value::as_str)
                                .unwrap_or(fallback)
                                .to_string()
                        };
                        TimeRange {
                            start_time: field("startTime", MORNING.0),
                            end_time: field("endTime", MORNING.1),
                        }
                    })
                    .collect();
                *current = DaySchedule { enabled, ranges };
                continue;
            }

            let legacy = (
                day.get("startTime").and_then(Value::as_str),
                day.get("endTime").and_then(Value::as_str),
            );
            current.enabled = enabled;
            if let (Some(start), Some(end)) = legacy
                && !start.is_empty()
                && !end.is_empty()
            {
                current.ranges = vec![TimeRange::new(start, end)];
            }
        }

        base
    }

    pub fn toggle_day(&mut self, key: DayKey) {
        let day = self.day_mut(key);
        day.enabled = !day.enabled;
    }

    /// Set one bound of a range, creating the range (08:00-13:00) if missing.
    pub fn set_range_time(&mut self, key: DayKey, index: usize, field: RangeField, value: &str) {
        let day = self.day_mut(key);
        while day.ranges.len() <= index {
            day.ranges.push(TimeRange::new(MORNING.0, MORNING.1));
        }
        let range = &mut day.ranges[index];
        match field {
            RangeField::Start => range.start_time = value.to_string(),
            RangeField::End => range.end_time = value.to_string(),
        }
    }

    /// Switch a day between one continuous range and a lunch split.
    pub fn set_lunch_split(&mut self, key: DayKey, with_lunch: bool) {
        let day = self.day_mut(key);
        if with_lunch {
            match day.ranges.len() {
                0 => day.ranges = split_day().ranges,
                1 => {
                    let r = day.ranges[0].clone();
                    day.ranges = vec![
                        TimeRange::new(r.start_time, MORNING.1),
                        TimeRange::new(AFTERNOON.0, r.end_time),
                    ];
                }
                _ => {}
            }
        } else {
            match day.ranges.len() {
                0 => day.ranges = vec![TimeRange::new(MORNING.0, AFTERNOON.1)],
                1 => {}
                _ => {
                    let start = day.ranges[0].start_time.clone();
                    let end = day.ranges[1].end_time.clone();
                    day.ranges = vec![TimeRange::new(start, end)];
                }
            }
        }
    }

    /// Number of days the business opens.
    pub fn enabled_days(&self) -> usize {
        DayKey::ALL.iter().filter(|k| self.day(**k).enabled).count()
    }
}

/// Tenant settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// IANA timezone name
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Calendar slot granularity in minutes
    #[serde(default = "default_interval")]
    pub appointment_interval_min: u32,
    /// Raw stored value; run through [`OpeningHours::normalize`] before use
    #[serde(default)]
    pub opening_hours: Option<Value>,
}

impl Business {
    pub fn opening_hours(&self) -> OpeningHours {
        OpeningHours::normalize(self.opening_hours.as_ref())
    }
}

pub const DEFAULT_TIMEZONE: &str = "America/Argentina/Buenos_Aires";
pub const DEFAULT_APPOINTMENT_INTERVAL_MIN: u32 = 30;

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_active() -> bool {
    true
}

fn default_interval() -> u32 {
    DEFAULT_APPOINTMENT_INTERVAL_MIN
}

/// Create/update business payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub timezone: String,
    pub is_active: bool,
    pub appointment_interval_min: u32,
    pub opening_hours: OpeningHours,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_day_key_round_trip() {
        for key in DayKey::ALL {
            assert_eq!(DayKey::from_day_of_week(key.day_of_week()), key);
        }
        assert_eq!(DayKey::from_day_of_week(7), DayKey::Sun);
    }

    #[test]
    fn test_normalize_non_object_yields_defaults() {
        assert_eq!(OpeningHours::normalize(None), OpeningHours::default());
        assert_eq!(
            OpeningHours::normalize(Some(&json!("garbage"))),
            OpeningHours::default()
        );
    }

    #[test]
    fn test_normalize_current_shape() {
        let raw = json!({
            "mon": {"enabled": false, "ranges": [{"startTime": "07:30"}]},
            "sun": {"enabled": true, "ranges": []}
        });
        let hours = OpeningHours::normalize(Some(&raw));

        assert!(!hours.mon.enabled);
        assert_eq!(hours.mon.ranges, vec![TimeRange::new("07:30", "13:00")]);
        assert!(hours.sun.enabled);
        assert!(hours.sun.ranges.is_empty());
        assert_eq!(hours.tue, OpeningHours::default().tue);
    }

    #[test]
    fn test_normalize_legacy_shape() {
        let raw = json!({
            "sat": {"enabled": "yes", "startTime": "09:00", "endTime": "12:00"},
            "fri": {"enabled": false}
        });
        let hours = OpeningHours::normalize(Some(&raw));

        assert!(hours.sat.enabled);
        assert_eq!(hours.sat.ranges, vec![TimeRange::new("09:00", "12:00")]);
        assert!(!hours.fri.enabled);
        assert_eq!(hours.fri.ranges.len(), 2);
    }

    #[test]
    fn test_lunch_split_and_merge() {
        let mut hours = OpeningHours::default();
        hours.set_lunch_split(DayKey::Mon, false);
        assert_eq!(hours.mon.ranges, vec![TimeRange::new("08:00", "19:00")]);

        hours.mon.ranges = vec![TimeRange::new("09:00", "20:00")];
        hours.set_lunch_split(DayKey::Mon, true);
        assert_eq!(
            hours.mon.ranges,
            vec![
                TimeRange::new("09:00", "13:00"),
                TimeRange::new("14:00", "20:00")
            ]
        );

        hours.set_lunch_split(DayKey::Sun, false);
        assert_eq!(hours.sun.ranges, vec![TimeRange::new("08:00", "19:00")]);
    }

    #[test]
    fn test_set_range_time_creates_missing_range() {
        let mut hours = OpeningHours::default();
        hours.set_range_time(DayKey::Sat, 1, RangeField::End, "18:30");
        assert_eq!(
            hours.sat.ranges,
            vec![
                TimeRange::new("10:00", "14:00"),
                TimeRange::new("08:00", "18:30")
            ]
        );
    }

    #[test]
    fn test_enabled_days_and_toggle() {
        let mut hours = OpeningHours::default();
        assert_eq!(hours.enabled_days(), 6);
        hours.toggle_day(DayKey::Sun);
        assert_eq!(hours.enabled_days(), 7);
    }

    #[test]
    fn test_business_defaults_from_wire() {
        let business: Business =
            serde_json::from_value(json!({"_id": "b1", "name": "Estética"})).unwrap();
        assert_eq!(business.timezone, DEFAULT_TIMEZONE);
        assert_eq!(business.appointment_interval_min, 30);
        assert_eq!(business.opening_hours(), OpeningHours::default());
    }
}
