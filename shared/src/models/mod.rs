//! Data models
//!
//! Wire types exchanged with the scheduling backend. Identifiers are the
//! backend's string ids (`_id`); every record belongs to one business.

pub mod appointment;
pub mod business;
pub mod client;
pub mod professional;
pub mod service;
pub mod user;

// Re-exports
pub use appointment::*;
pub use business::*;
pub use client::*;
pub use professional::*;
pub use service::*;
pub use user::*;
