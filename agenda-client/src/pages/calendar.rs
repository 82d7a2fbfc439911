//! Calendar screen

use chrono_tz::Tz;
use serde_json::Value;
use shared::{Appointment, MutationResponse, Professional};

use crate::calendar::{
    self, CalendarAction, CalendarFeed, CalendarInteraction, ProfessionalFilter,
};
use crate::error::ClientResult;
use crate::forms::{AppointmentForm, FormContext, FormController};
use crate::http::HttpClient;
use crate::messages::Locale;
use crate::repository::{Appointments, Repository};

/// Modal currently shown over the calendar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    None,
    Create,
    Detail { appointment_id: String },
    Edit { appointment_id: String },
}

impl Modal {
    /// Appointment the open modal refers to.
    pub fn appointment_id(&self) -> Option<&str> {
        match self {
            Self::Detail { appointment_id } | Self::Edit { appointment_id } => {
                Some(appointment_id)
            }
            _ => None,
        }
    }
}

/// State of the calendar screen
pub struct CalendarPage {
    locale: Locale,
    timezone: Tz,
    filter: ProfessionalFilter,
    modal: Modal,
    create: FormController<AppointmentForm>,
    edit: FormController<AppointmentForm>,
}

impl CalendarPage {
    pub fn new(locale: Locale, timezone: Tz) -> Self {
        Self {
            locale,
            timezone,
            filter: ProfessionalFilter::All,
            modal: Modal::None,
            create: FormController::new(AppointmentForm::default()),
            edit: FormController::new(AppointmentForm::default()),
        }
    }

    pub fn filter(&self) -> &ProfessionalFilter {
        &self.filter
    }

    /// Select a professional from the filter dropdown (`"all"` for everyone).
    pub fn select_professional(&mut self, value: &str) {
        self.filter = ProfessionalFilter::parse(value);
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn create_form(&mut self) -> &mut FormController<AppointmentForm> {
        &mut self.create
    }

    pub fn edit_form(&mut self) -> &mut FormController<AppointmentForm> {
        &mut self.edit
    }

    fn form_context(&self) -> FormContext {
        FormContext::new(self.locale, self.timezone)
    }

    /// Events and widget options for the current filter.
    pub fn feed(
        &self,
        appointments: &[Appointment],
        professionals: &[Professional],
        interval_min: Option<u32>,
    ) -> CalendarFeed {
        let selected = self
            .filter
            .professional_id()
            .and_then(|id| professionals.iter().find(|p| p.id == id));
        match (selected, &self.filter) {
            (Some(pro), _) => calendar::build_feed(appointments, Some(pro), interval_min),
            // Selected professional not loaded yet: filter without constraints
            (None, ProfessionalFilter::One(_)) => {
                let mut feed = calendar::build_feed(&[], None, interval_min);
                feed.events = calendar::appointment_events(appointments, &self.filter);
                feed
            }
            (None, ProfessionalFilter::All) => {
                calendar::build_feed(appointments, None, interval_min)
            }
        }
    }

    /// Handle a slot selection or event click from the widget.
    pub fn on_interaction(&mut self, interaction: &CalendarInteraction) -> CalendarAction {
        let action = calendar::interpret(interaction, self.timezone);
        match &action {
            CalendarAction::OpenCreate { start_local } => {
                let mut form = AppointmentForm::with_start_local(start_local.clone());
                if let Some(id) = self.filter.professional_id() {
                    form.professional_id = id.to_string();
                }
                self.create.reset(form);
                self.modal = Modal::Create;
            }
            CalendarAction::OpenDetail { appointment_id } => {
                self.modal = Modal::Detail {
                    appointment_id: appointment_id.clone(),
                };
            }
            CalendarAction::None => {}
        }
        action
    }

    /// Switch the detail modal to the edit form. `false` when the shown
    /// appointment is not in `appointments`.
    pub fn start_editing(&mut self, appointments: &[Appointment]) -> bool {
        let Some(appointment) = self
            .modal
            .appointment_id()
            .and_then(|id| appointments.iter().find(|a| a.id == id))
        else {
            return false;
        };
        self.edit
            .reset(AppointmentForm::from_appointment(appointment, self.timezone));
        self.modal = Modal::Edit {
            appointment_id: appointment.id.clone(),
        };
        true
    }

    /// Escape key: close whatever is open.
    pub fn escape(&mut self) {
        self.modal = Modal::None;
    }

    /// Submit the create form. `None` when validation blocked the request.
    pub async fn submit_create<H: HttpClient>(
        &mut self,
        appointments: &Repository<Appointments, H>,
    ) -> Option<ClientResult<MutationResponse>> {
        let ctx = self.form_context();
        let result = self
            .create
            .submit(&ctx, |payload| appointments.create(payload))
            .await?;
        if result.is_ok() {
            self.modal = Modal::None;
        }
        Some(result)
    }

    /// Submit the edit form of the open appointment.
    pub async fn submit_edit<H: HttpClient>(
        &mut self,
        appointments: &Repository<Appointments, H>,
    ) -> Option<ClientResult<Value>> {
        let Modal::Edit { appointment_id } = &self.modal else {
            return None;
        };
        let id = appointment_id.clone();
        let ctx = self.form_context();
        let result = self
            .edit
            .submit(&ctx, |payload| async move {
                appointments.update(&id, &payload).await
            })
            .await?;
        if result.is_ok() {
            self.modal = Modal::None;
        }
        Some(result)
    }

    /// Cancel the open appointment (status change). The modal stays open so
    /// the refetched status can be shown.
    pub async fn cancel_editing<H: HttpClient>(
        &mut self,
        appointments: &Repository<Appointments, H>,
    ) -> Option<ClientResult<Value>> {
        let id = self.modal.appointment_id()?.to_string();
        Some(appointments.cancel(&id).await)
    }

    /// Delete the open appointment.
    pub async fn delete_editing<H: HttpClient>(
        &mut self,
        appointments: &Repository<Appointments, H>,
    ) -> Option<ClientResult<Value>> {
        let id = self.modal.appointment_id()?.to_string();
        let result = appointments.delete(&id).await;
        if result.is_ok() {
            self.modal = Modal::None;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn page() -> CalendarPage {
        CalendarPage::new(Locale::Es, chrono_tz::America::Argentina::Buenos_Aires)
    }

    fn appointments() -> Vec<Appointment> {
        serde_json::from_value(json!([
            {
                "_id": "a1",
                "service": {"_id": "s1", "name": "Corte"},
                "professional": {"_id": "p1", "name": "Laura"},
                "client": {"_id": "c1", "name": "Juan"},
                "start": "2025-03-03T12:00:00.000Z",
                "status": "confirmed"
            },
            {
                "_id": "a2",
                "service": "s1",
                "professional": "p2",
                "client": "c2",
                "start": "2025-03-03T13:00:00.000Z",
                "status": "confirmed"
            }
        ]))
        .unwrap()
    }

    fn professionals() -> Vec<Professional> {
        serde_json::from_value(json!([{
            "_id": "p1",
            "name": "Laura",
            "workingHours": [{"dayOfWeek": 1, "startTime": "09:00", "endTime": "18:00"}],
            "timeOff": [{"start": "2025-03-04T12:00:00.000Z", "end": "2025-03-04T15:00:00.000Z"}]
        }]))
        .unwrap()
    }

    #[test]
    fn test_slot_select_opens_prefilled_create() {
        let mut page = page();
        page.select_professional("p1");
        let start = "2025-03-03T13:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let action = page.on_interaction(&CalendarInteraction::Select { start });
        assert_eq!(
            action,
            CalendarAction::OpenCreate {
                start_local: "2025-03-03T10:00".into()
            }
        );
        assert_eq!(page.modal(), &Modal::Create);
        assert_eq!(page.create_form().form().start_local, "2025-03-03T10:00");
        assert_eq!(page.create_form().form().professional_id, "p1");
    }

    #[test]
    fn test_time_off_click_is_ignored() {
        let mut page = page();
        let interaction = CalendarInteraction::EventClick {
            event_id: "timeoff-p1-0".into(),
            is_time_off: true,
        };
        assert_eq!(page.on_interaction(&interaction), CalendarAction::None);
        assert_eq!(page.modal(), &Modal::None);
    }

    #[test]
    fn test_detail_edit_and_escape() {
        let mut page = page();
        page.on_interaction(&CalendarInteraction::EventClick {
            event_id: "a1".into(),
            is_time_off: false,
        });
        assert_eq!(page.modal().appointment_id(), Some("a1"));

        assert!(page.start_editing(&appointments()));
        assert_eq!(
            page.modal(),
            &Modal::Edit {
                appointment_id: "a1".into()
            }
        );
        assert_eq!(page.edit_form().form().start_local, "2025-03-03T09:00");

        page.escape();
        assert_eq!(page.modal(), &Modal::None);
        assert!(!page.start_editing(&appointments()));
    }

    #[test]
    fn test_feed_follows_filter() {
        let mut page = page();
        let feed = page.feed(&appointments(), &professionals(), Some(15));
        assert_eq!(feed.events.len(), 2);
        assert!(feed.options.business_hours.is_unconstrained());
        assert_eq!(feed.options.slot_duration, "00:15:00");

        page.select_professional("p1");
        let feed = page.feed(&appointments(), &professionals(), None);
        // one appointment plus one time-off overlay
        assert_eq!(feed.events.len(), 2);
        assert!(feed.events[1].is_time_off());
        assert_eq!(feed.options.business_hours.rules()[0].days_of_week, vec![1]);

        page.select_professional("p2");
        let feed = page.feed(&appointments(), &professionals(), None);
        assert_eq!(feed.events.len(), 1);
        assert_eq!(feed.events[0].id, "a2");
        assert!(feed.options.business_hours.is_unconstrained());
    }
}
