//! Wire types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A task record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

impl Todo {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), done: false }
    }
}

/// A request body shaped like a [`Todo`].
///
/// Every field is optional on the wire. Keys match ignoring case, so
/// `{"Text":"Buy milk"}` sets `text`; a field given as `null` keeps its
/// default; unknown fields are ignored. Which fields an operation honours is
/// up to the operation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TodoPayload {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

impl TodoPayload {
    /// Decodes the first JSON value in `body`; anything after it is ignored.
    ///
    /// `null` decodes to the all-default payload. An empty body, broken JSON,
    /// a value that is not an object, or a field of the wrong type is an error.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
        match values.next() {
            None => Err(invalid("empty body")),
            Some(value) => match value? {
                Value::Null => Ok(Self::default()),
                Value::Object(fields) => Self::from_fields(fields),
                other => Err(invalid(format!("expected an object, found {other}"))),
            },
        }
    }

    /// Fields apply in document order, so the last of `"text"` and `"TEXT"` wins.
    fn from_fields(fields: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut payload = Self::default();
        for (key, value) in fields {
            if value.is_null() {
                continue;
            }
            match fold_key(&key).as_str() {
                "id" => payload.id = serde_json::from_value(value)?,
                "text" => payload.text = serde_json::from_value(value)?,
                "done" => payload.done = serde_json::from_value(value)?,
                _ => {}
            }
        }
        Ok(payload)
    }
}

/// Case folding for key matching. `ſ` (long s) folds to `s`; `K` (Kelvin
/// sign) already lowercases to `k`.
fn fold_key(key: &str) -> String {
    key.to_lowercase().replace('ſ', "s")
}

fn invalid(msg: impl std::fmt::Display) -> serde_json::Error {
    <serde_json::Error as serde::de::Error>::custom(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serialises_with_wire_field_names() {
        let json = serde_json::to_value(Todo::new(1, "Learn Go")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 1, "text": "Learn Go", "done": false }));
    }

    #[test]
    fn payload_fields_default_when_missing() {
        let p = TodoPayload::decode(br#"{"text":"Buy milk"}"#).unwrap();
        assert_eq!(p, TodoPayload { id: 0, text: "Buy milk".into(), done: false });
    }

    #[test]
    fn payload_ignores_unknown_fields() {
        let p = TodoPayload::decode(br#"{"text":"a","done":true,"priority":"high"}"#).unwrap();
        assert_eq!(p.text, "a");
        assert!(p.done);
    }

    #[test]
    fn payload_ignores_trailing_bytes_after_first_value() {
        let p = TodoPayload::decode(b"{\"text\":\"first\"} {\"text\":\"second\"} junk").unwrap();
        assert_eq!(p.text, "first");
    }

    #[test]
    fn null_payload_is_all_defaults() {
        assert_eq!(TodoPayload::decode(b" null ").unwrap(), TodoPayload::default());
    }

    #[test]
    fn payload_rejects_empty_and_malformed_bodies() {
        assert!(TodoPayload::decode(b"").is_err());
        assert!(TodoPayload::decode(b"   \n").is_err());
        assert!(TodoPayload::decode(b"{\"text\":").is_err());
        assert!(TodoPayload::decode(br#"{"text":5}"#).is_err());
        assert!(TodoPayload::decode(br#"{"id":"seven"}"#).is_err());
        assert!(TodoPayload::decode(br#"{"id":1.5}"#).is_err());
    }

    #[test]
    fn payload_rejects_non_objects() {
        assert!(TodoPayload::decode(b"[1,2]").is_err());
        assert!(TodoPayload::decode(b"5").is_err());
        assert!(TodoPayload::decode(br#""text""#).is_err());
    }

    #[test]
    fn null_fields_keep_their_defaults() {
        let p = TodoPayload::decode(br#"{"id":null,"text":null,"done":null}"#).unwrap();
        assert_eq!(p, TodoPayload::default());

        let p = TodoPayload::decode(br#"{"text":"a","done":null}"#).unwrap();
        assert_eq!(p, TodoPayload { id: 0, text: "a".into(), done: false });
    }

    #[test]
    fn keys_match_ignoring_case() {
        let p = TodoPayload::decode(br#"{"ID":4,"Text":"Caps","dOnE":true}"#).unwrap();
        assert_eq!(p, TodoPayload { id: 4, text: "Caps".into(), done: true });
    }

    #[test]
    fn last_matching_key_wins() {
        let p = TodoPayload::decode(br#"{"TEXT":"first","text":"second"}"#).unwrap();
        assert_eq!(p.text, "second");
        let p = TodoPayload::decode(br#"{"text":"first","Text":"second"}"#).unwrap();
        assert_eq!(p.text, "second");
    }
}
