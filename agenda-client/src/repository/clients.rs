//! Clients resource

use shared::{Client, ClientPayload, MutationResponse};

use super::Resource;
use crate::messages::Entity;

/// `/clients`
pub struct Clients;

impl Resource for Clients {
    type Item = Client;
    type Payload = ClientPayload;
    type Created = MutationResponse;

    const PATH: &'static str = "clients";
    const LIST_FIELD: &'static str = "clients";
    const CACHE_KEY: &'static str = "clients";
    const ENTITY: Entity = Entity::Client;
    const SCOPED_CREATE: bool = true;
}
