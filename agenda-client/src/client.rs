//! Agenda client
//!
//! Bundles the HTTP client, session, query cache and one repository per
//! resource behind a single handle.

use std::sync::Arc;

use chrono_tz::Tz;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::messages::Locale;
use crate::notify::{NotificationCenter, Notifier};
use crate::repository::{
    ApiContext, Appointments, Businesses, Clients, Professionals, Repository, Services,
};
use crate::session::Session;

/// Scheduling backend client
pub struct AgendaClient<H: HttpClient = NetworkHttpClient> {
    ctx: Arc<ApiContext<H>>,
    timezone: Tz,
    pub clients: Repository<Clients, H>,
    pub professionals: Repository<Professionals, H>,
    pub services: Repository<Services, H>,
    pub appointments: Repository<Appointments, H>,
    pub businesses: Repository<Businesses, H>,
}

impl AgendaClient<NetworkHttpClient> {
    /// Connect with the session stored at `config.token_path` (memory when unset).
    pub fn connect(config: ClientConfig, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let session = Session::from_path(config.token_path.as_deref());
        Self::with_session(config, session, notifier)
    }

    pub fn with_session(
        config: ClientConfig,
        session: Session,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        let locale = config.locale;
        let business_id = config.business_id.clone();
        let timezone = config.timezone;
        let http = NetworkHttpClient::new(config, session)?;
        tracing::debug!(base_url = %http.base_url(), "Agenda client created");
        Ok(Self::from_http(http, notifier, locale, business_id, timezone))
    }
}

impl<H: HttpClient> AgendaClient<H> {
    pub fn from_http(
        http: H,
        notifier: Arc<dyn Notifier>,
        locale: Locale,
        business_id: Option<String>,
        timezone: Tz,
    ) -> Self {
        let ctx = Arc::new(ApiContext::new(http, notifier, locale).with_business_id(business_id));
        Self {
            clients: Repository::new(ctx.clone()),
            professionals: Repository::new(ctx.clone()),
            services: Repository::new(ctx.clone()),
            appointments: Repository::new(ctx.clone()),
            businesses: Repository::new(ctx.clone()),
            ctx,
            timezone,
        }
    }

    pub fn session(&self) -> &Session {
        self.ctx.http.session()
    }

    pub fn context(&self) -> &ApiContext<H> {
        &self.ctx
    }

    pub fn locale(&self) -> Locale {
        self.ctx.locale
    }

    /// Timezone of local date/time inputs
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

/// Client wired to a fresh [`NotificationCenter`].
pub fn connect_with_center(
    config: ClientConfig,
) -> ClientResult<(AgendaClient, NotificationCenter)> {
    let center = NotificationCenter::new();
    let client = AgendaClient::connect(config, Arc::new(center.clone()))?;
    Ok((client, center))
}
