//! Agenda Client - typed client for the scheduling backend
//!
//! Data layer and screen logic of the administrative dashboard: an HTTP
//! client with bearer auth and forced logout on 401, a query cache driven by
//! invalidation, one repository per resource, validated forms, the calendar
//! adapter with its availability model, and the calendar/settings screen
//! controllers.
//!
//! # Example
//!
//! ```ignore
//! use agenda_client::{ClientConfig, connect_with_center};
//!
//! let (client, toasts) = connect_with_center(ClientConfig::from_env()?)?;
//! client.session().set_token(Some("token"))?;
//!
//! let appointments = client.appointments.list().await?;
//! client.appointments.cancel(&appointments[0].id).await?;
//! for toast in toasts.drain() {
//!     println!("{}", toast.message);
//! }
//! ```

pub mod availability;
pub mod cache;
pub mod calendar;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod http;
pub mod logger;
pub mod messages;
pub mod notify;
pub mod pages;
pub mod repository;
pub mod session;

// Re-exports
pub use cache::{QueryCache, QueryKey};
pub use client::{AgendaClient, connect_with_center};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use forms::{Form, FormContext, FormController, FormErrors, FormState};
pub use http::{HttpClient, NetworkHttpClient};
pub use logger::init_logger;
pub use messages::Locale;
pub use notify::{Level, Notification, NotificationCenter, Notifier};
pub use pages::{CalendarPage, Modal, SettingsPage};
pub use repository::Repository;
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};

// Re-export shared types
pub use shared;
