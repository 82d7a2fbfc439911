//! Shared types for the agenda workspace
//!
//! Wire-level domain types for the scheduling backend (clients,
//! professionals, services, appointments, business settings), the
//! relational [`Ref`] type, response envelopes and time helpers.

pub mod models;
pub mod reference;
pub mod response;
pub mod time;

// Re-exports
pub use models::*;
pub use reference::{Named, Ref};
pub use response::{ErrorBody, MutationResponse};
pub use serde::{Deserialize, Serialize};
