//! Screen controllers
//!
//! Plain state machines behind the calendar and settings screens. A front
//! end renders their state and forwards user events; network work goes
//! through the repositories.

mod calendar;
mod settings;

pub use calendar::{CalendarPage, Modal};
pub use settings::SettingsPage;
