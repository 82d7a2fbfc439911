//! Resource repositories
//!
//! One [`Repository`] per backend resource: a cached list query plus
//! create/update/delete mutations. Every mutation follows the same contract:
//! send once, on success invalidate the resource's cache keys and toast a
//! success message, on failure toast the backend's message (or a localized
//! fallback) and hand the error back. Successful mutations never patch the
//! cache; the next read refetches the list.

mod appointments;
mod business;
mod clients;
mod professionals;
mod services;

pub use appointments::Appointments;
pub use business::{Businesses, MY_BUSINESS_KEY};
pub use clients::Clients;
pub use professionals::Professionals;
pub use services::Services;

use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::response::envelope_field;

use crate::cache::{QueryCache, QueryKey};
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::messages::{self, Action, Entity, Locale};
use crate::notify::Notifier;

// ============================================================================
// Resource description
// ============================================================================

/// Static description of a backend resource.
pub trait Resource: Send + Sync + 'static {
    /// Record returned by list/detail reads
    type Item: Serialize + DeserializeOwned + Send + Sync;
    /// Create/update body
    type Payload: Serialize + Send + Sync;
    /// Body returned by create
    type Created: DeserializeOwned + Send;

    /// Path under the API base (`clients`, `business`, ...)
    const PATH: &'static str;
    /// Envelope field holding the list (`clients`, `businesses`, ...)
    const LIST_FIELD: &'static str;
    /// Root cache key of the list
    const CACHE_KEY: &'static str;
    const ENTITY: Entity;
    /// Create payloads carry the configured business id
    const SCOPED_CREATE: bool = false;

    /// Create defaults applied before sending.
    fn prepare_create(payload: Self::Payload) -> Self::Payload {
        payload
    }

    /// Cache keys dropped after any successful mutation.
    fn invalidates() -> Vec<QueryKey> {
        vec![QueryKey::root(Self::CACHE_KEY)]
    }
}

// ============================================================================
// Shared context
// ============================================================================

/// State shared by every repository of one client.
pub struct ApiContext<H> {
    pub http: H,
    pub cache: QueryCache,
    pub notifier: Arc<dyn Notifier>,
    pub locale: Locale,
    /// Business scope for create payloads
    pub business_id: Option<String>,
}

impl<H: HttpClient> ApiContext<H> {
    pub fn new(http: H, notifier: Arc<dyn Notifier>, locale: Locale) -> Self {
        Self {
            http,
            cache: QueryCache::new(),
            notifier,
            locale,
            business_id: None,
        }
    }

    pub fn with_business_id(mut self, business_id: Option<String>) -> Self {
        self.business_id = business_id;
        self
    }
}

// ============================================================================
// Pending tracking
// ============================================================================

type PendingMap = Arc<Mutex<HashMap<Action, usize>>>;

/// Marks an action in flight until dropped (also on early return).
struct PendingGuard {
    pending: PendingMap,
    action: Action,
}

impl PendingGuard {
    fn new(pending: &PendingMap, action: Action) -> Self {
        *pending.lock().entry(action).or_insert(0) += 1;
        Self {
            pending: pending.clone(),
            action,
        }
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut pending = self.pending.lock();
        if let Some(count) = pending.get_mut(&self.action) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                pending.remove(&self.action);
            }
        }
    }
}

// ============================================================================
// Repository
// ============================================================================

/// Cached list + mutations for one resource.
pub struct Repository<R: Resource, H: HttpClient> {
    ctx: Arc<ApiContext<H>>,
    pending: PendingMap,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, H: HttpClient> Clone for Repository<R, H> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            pending: self.pending.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource, H: HttpClient> Repository<R, H> {
    pub fn new(ctx: Arc<ApiContext<H>>) -> Self {
        Self {
            ctx,
            pending: Arc::default(),
            _resource: PhantomData,
        }
    }

    pub fn context(&self) -> &ApiContext<H> {
        &self.ctx
    }

    /// Root cache key of the list
    pub fn list_key() -> QueryKey {
        QueryKey::root(R::CACHE_KEY)
    }

    /// `GET /<resource>`, served from the cache when present.
    pub async fn list(&self) -> ClientResult<Vec<R::Item>> {
        let key = Self::list_key();
        self.ctx.cache.get_or_fetch(&key, || self.fetch_list()).await
    }

    /// Drop the cached list and fetch it again.
    pub async fn refetch(&self) -> ClientResult<Vec<R::Item>> {
        self.ctx.cache.invalidate(&Self::list_key());
        self.list().await
    }

    async fn fetch_list(&self) -> ClientResult<Vec<R::Item>> {
        let body: Value = self.ctx.http.get(R::PATH).await?;
        match envelope_field(body, R::LIST_FIELD) {
            Some(items) => Ok(serde_json::from_value(items)?),
            None => Ok(Vec::new()),
        }
    }

    /// Single record read through the cache (`{ "<field>": {...} }`).
    async fn fetch_one(
        &self,
        key: QueryKey,
        path: &str,
        field: &str,
    ) -> ClientResult<Option<R::Item>> {
        self.ctx
            .cache
            .get_or_fetch(&key, || self.fetch_item(path, field))
            .await
    }

    async fn fetch_item(&self, path: &str, field: &str) -> ClientResult<Option<R::Item>> {
        let body: Value = self.ctx.http.get(path).await?;
        match envelope_field(body, field) {
            Some(item) => Ok(Some(serde_json::from_value(item)?)),
            None => Ok(None),
        }
    }

    /// `POST /<resource>`
    pub async fn create(&self, payload: R::Payload) -> ClientResult<R::Created> {
        let body = self.create_body(R::prepare_create(payload))?;
        self.mutate(Action::Create, self.ctx.http.post(R::PATH, &body))
            .await
    }

    /// `PUT /<resource>/:id`
    pub async fn update(&self, id: &str, payload: &R::Payload) -> ClientResult<Value> {
        let path = self.item_path(id);
        self.mutate(Action::Update, self.ctx.http.put(&path, payload))
            .await
    }

    /// `DELETE /<resource>/:id`
    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        let path = self.item_path(id);
        self.mutate(Action::Delete, self.ctx.http.delete(&path)).await
    }

    /// Whether a mutation of this kind is in flight.
    pub fn is_pending(&self, action: Action) -> bool {
        self.pending.lock().contains_key(&action)
    }

    pub(crate) fn item_path(&self, id: &str) -> String {
        format!("{}/{}", R::PATH, id)
    }

    fn create_body(&self, payload: R::Payload) -> ClientResult<Value> {
        let mut body = serde_json::to_value(payload)?;
        if R::SCOPED_CREATE
            && let (Some(business_id), Some(map)) =
                (self.ctx.business_id.as_ref(), body.as_object_mut())
        {
            map.insert("business".into(), Value::String(business_id.clone()));
        }
        Ok(body)
    }

    /// Mutation contract: pending flag, invalidate + toast on success, toast on error.
    pub(crate) async fn mutate<T, F>(&self, action: Action, request: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let _guard = PendingGuard::new(&self.pending, action);
        let locale = self.ctx.locale;

        match request.await {
            Ok(value) => {
                for key in R::invalidates() {
                    self.ctx.cache.invalidate(&key);
                }
                tracing::info!(
                    resource = R::PATH,
                    action = action.as_str(),
                    "Mutation succeeded"
                );
                self.ctx
                    .notifier
                    .success(messages::success(locale, R::ENTITY, action));
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(
                    resource = R::PATH,
                    action = action.as_str(),
                    error = %e,
                    "Mutation failed"
                );
                let fallback = messages::failure(locale, R::ENTITY, action);
                self.ctx.notifier.error(&e.user_message(fallback));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_guard_counts_nested_actions() {
        let pending: PendingMap = Arc::default();
        let first = PendingGuard::new(&pending, Action::Create);
        let second = PendingGuard::new(&pending, Action::Create);
        assert_eq!(pending.lock()[&Action::Create], 2);

        drop(first);
        assert!(pending.lock().contains_key(&Action::Create));
        drop(second);
        assert!(pending.lock().is_empty());
    }
}
