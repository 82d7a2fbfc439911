//! Professionals resource

use shared::{CreateProfessionalResponse, Professional, ProfessionalPayload};

use super::Resource;
use crate::messages::Entity;

/// `/professionals`
///
/// Create answers with the new record and, when the backend had to create a
/// user account, its temporary password.
pub struct Professionals;

impl Resource for Professionals {
    type Item = Professional;
    type Payload = ProfessionalPayload;
    type Created = CreateProfessionalResponse;

    const PATH: &'static str = "professionals";
    const LIST_FIELD: &'static str = "professionals";
    const CACHE_KEY: &'static str = "professionals";
    const ENTITY: Entity = Entity::Professional;
}
