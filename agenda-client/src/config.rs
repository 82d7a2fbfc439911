//! Client configuration

use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;
use shared::time::parse_timezone;

use crate::error::{ClientError, ClientResult};
use crate::messages::Locale;

/// Default backend base URL (includes the `/api` prefix)
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

/// Client configuration for connecting to the scheduling backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL including the API prefix (e.g., "http://localhost:4000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// File holding the persisted bearer token; memory-only when unset
    pub token_path: Option<PathBuf>,

    /// Business scope injected into client/service create payloads
    pub business_id: Option<String>,

    /// Timezone used to interpret local date/time inputs
    pub timezone: Tz,

    /// Language of toast messages
    pub locale: Locale,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            token_path: None,
            business_id: None,
            timezone: chrono_tz::America::Argentina::Buenos_Aires,
            locale: Locale::default(),
        }
    }

    /// Load configuration from environment variables (after `.env`).
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `AGENDA_API_URL` | `http://localhost:4000/api` |
    /// | `AGENDA_TIMEOUT_SECS` | `30` |
    /// | `AGENDA_TOKEN_PATH` | unset (memory only) |
    /// | `AGENDA_BUSINESS_ID` | unset |
    /// | `AGENDA_TIMEZONE` | `America/Argentina/Buenos_Aires` |
    /// | `AGENDA_LOCALE` | `es` |
    pub fn from_env() -> ClientResult<Self> {
        let _ = dotenvy::dotenv();

        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let mut config = Self::new(var("AGENDA_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()));

        if let Some(timeout) = var("AGENDA_TIMEOUT_SECS") {
            config.timeout = timeout.parse().map_err(|_| {
                ClientError::Config(format!("AGENDA_TIMEOUT_SECS is not a number: {timeout}"))
            })?;
        }
        config.token_path = var("AGENDA_TOKEN_PATH").map(PathBuf::from);
        config.business_id = var("AGENDA_BUSINESS_ID");
        if let Some(tz) = var("AGENDA_TIMEZONE") {
            config = config.with_timezone(&tz)?;
        }
        if let Some(locale) = var("AGENDA_LOCALE") {
            config.locale = Locale::from_str(&locale).map_err(ClientError::Config)?;
        }

        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the token in a file
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Set the business scope
    pub fn with_business_id(mut self, id: impl Into<String>) -> Self {
        self.business_id = Some(id.into());
        self
    }

    /// Set the timezone by IANA name
    pub fn with_timezone(mut self, name: &str) -> ClientResult<Self> {
        self.timezone = parse_timezone(name).map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(self)
    }

    /// Set the message locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Full URL for an API path (`/clients`, `appointments/1/cancel`, ...).
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
