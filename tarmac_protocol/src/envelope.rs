// Decoded protocol messages as dynamic key-value envelopes.
//
// Every message on the wire is a JSON object with a `message` type tag and
// tag-specific payload fields. The tag set is open — servers may send tags
// this crate has never heard of — so the envelope is a thin wrapper over
// `serde_json::Map` rather than a closed enum. The client's dispatch layer
// removes the tag, routes by name, and parses the remaining fields into a
// typed payload struct when it recognizes the tag.
//
// Envelopes are transient: consumed immediately after receipt, never stored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The envelope field carrying the message type tag.
pub const TAG_FIELD: &str = "message";

/// One decoded protocol message: a JSON object, possibly carrying a
/// `message` type tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// The message type tag, if present and a string.
    pub fn tag(&self) -> Option<&str> {
        self.0.get(TAG_FIELD).and_then(Value::as_str)
    }

    /// Remove and return the type tag, leaving only payload fields.
    /// Returns `None` if the tag is absent or not a string.
    pub fn take_tag(&mut self) -> Option<String> {
        match self.0.remove(TAG_FIELD) {
            Some(Value::String(tag)) => Some(tag),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Deserialize the remaining fields into a typed payload struct.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0))
    }
}
