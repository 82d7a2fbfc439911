//! Business resource
//!
//! Lists live under `businesses`, single reads under `businesses/<id>` and
//! the caller's own business under `my-business`. Any mutation drops all of
//! them.

use shared::{Business, BusinessPayload, MutationResponse};

use super::{Repository, Resource};
use crate::cache::QueryKey;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::messages::Entity;

/// Cache key of `GET /business/me`
pub const MY_BUSINESS_KEY: &str = "my-business";

/// `/business`
pub struct Businesses;

impl Resource for Businesses {
    type Item = Business;
    type Payload = BusinessPayload;
    type Created = MutationResponse;

    const PATH: &'static str = "business";
    const LIST_FIELD: &'static str = "businesses";
    const CACHE_KEY: &'static str = "businesses";
    const ENTITY: Entity = Entity::Business;

    fn invalidates() -> Vec<QueryKey> {
        vec![
            QueryKey::root(Self::CACHE_KEY),
            QueryKey::root(MY_BUSINESS_KEY),
        ]
    }
}

impl<H: HttpClient> Repository<Businesses, H> {
    /// `GET /business/me`
    pub async fn mine(&self) -> ClientResult<Option<Business>> {
        self.fetch_one(QueryKey::root(MY_BUSINESS_KEY), "business/me", "business")
            .await
    }

    /// `GET /business/:id`
    pub async fn get(&self, id: &str) -> ClientResult<Option<Business>> {
        let key = Self::list_key().child(id);
        let path = self.item_path(id);
        self.fetch_one(key, &path, "business").await
    }
}
