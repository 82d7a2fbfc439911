//! Appointments resource

use serde_json::Value;
use shared::{Appointment, AppointmentPayload, MutationResponse};

use super::{Repository, Resource};
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::messages::{Action, Entity};

/// `/appointments`
pub struct Appointments;

impl Resource for Appointments {
    type Item = Appointment;
    type Payload = AppointmentPayload;
    type Created = MutationResponse;

    const PATH: &'static str = "appointments";
    const LIST_FIELD: &'static str = "appointments";
    const CACHE_KEY: &'static str = "appointments";
    const ENTITY: Entity = Entity::Appointment;

    fn prepare_create(payload: AppointmentPayload) -> AppointmentPayload {
        payload.with_create_defaults()
    }
}

impl<H: HttpClient> Repository<Appointments, H> {
    /// `PATCH /appointments/:id/cancel`
    ///
    /// A status transition, not a removal. No client-side guard: cancelling
    /// an already cancelled appointment is sent as-is.
    pub async fn cancel(&self, id: &str) -> ClientResult<Value> {
        let path = format!("{}/cancel", self.item_path(id));
        self.mutate(Action::Cancel, self.context().http.patch_empty(&path))
            .await
    }

    /// Appointments booked with one professional.
    pub async fn for_professional(&self, professional_id: &str) -> ClientResult<Vec<Appointment>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|a| a.belongs_to(professional_id))
            .collect())
    }
}
