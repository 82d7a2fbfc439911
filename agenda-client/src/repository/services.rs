//! Services resource

use shared::{MutationResponse, Service, ServicePayload};

use super::Resource;
use crate::messages::Entity;

/// `/services`
pub struct Services;

impl Resource for Services {
    type Item = Service;
    type Payload = ServicePayload;
    type Created = MutationResponse;

    const PATH: &'static str = "services";
    const LIST_FIELD: &'static str = "services";
    const CACHE_KEY: &'static str = "services";
    const ENTITY: Entity = Entity::Service;
    const SCOPED_CREATE: bool = true;
}
