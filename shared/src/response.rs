//! API Response types
//!
//! The backend answers lists as `{ "<resource>s": [...] }`, single reads as
//! `{ "<resource>": {...} }` and mutations as `{ "ok": bool, "msg": "..." }`
//! plus whatever record it echoes back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic mutation acknowledgement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub msg: Option<String>,
    /// Echoed record(s) and any other fields
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

/// Error body as sent by the backend on 4xx/5xx
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Message to surface: a non-empty `msg` first, then a non-empty `error`.
    pub fn message(&self) -> Option<&str> {
        non_empty(self.msg.as_deref()).or_else(|| non_empty(self.error.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|m| !m.trim().is_empty())
}

/// Pull the named field out of an envelope.
///
/// A missing field is treated as an empty list/absent record by the caller.
pub fn envelope_field(mut body: Value, field: &str) -> Option<Value> {
    match body.as_object_mut() {
        Some(map) => map.remove(field).filter(|v| !v.is_null()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_body_message_precedence() {
        let body: ErrorBody =
            serde_json::from_value(json!({"msg": "Horario ocupado", "error": "conflict"})).unwrap();
        assert_eq!(body.message(), Some("Horario ocupado"));

        let body: ErrorBody = serde_json::from_value(json!({"error": "conflict"})).unwrap();
        assert_eq!(body.message(), Some("conflict"));

        let body: ErrorBody =
            serde_json::from_value(json!({"msg": "", "error": "conflict"})).unwrap();
        assert_eq!(body.message(), Some("conflict"));

        let body: ErrorBody = serde_json::from_value(json!({"msg": "", "error": " "})).unwrap();
        assert_eq!(body.message(), None);

        let body: ErrorBody = serde_json::from_value(json!({"detail": "x"})).unwrap();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn test_envelope_field() {
        let body = json!({"ok": true, "clients": [{"_id": "c1"}]});
        let clients = envelope_field(body, "clients").unwrap();
        assert_eq!(clients.as_array().unwrap().len(), 1);

        assert!(envelope_field(json!({"business": null}), "business").is_none());
        assert!(envelope_field(json!([1, 2]), "clients").is_none());
    }

    #[test]
    fn test_mutation_response_keeps_extra_fields() {
        let resp: MutationResponse =
            serde_json::from_value(json!({"ok": true, "msg": "creado", "client": {"_id": "c9"}}))
                .unwrap();
        assert_eq!(resp.ok, Some(true));
        assert_eq!(resp.data["client"]["_id"], "c9");
    }
}
