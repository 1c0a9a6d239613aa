use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One protocol message: an integer `type` discriminant plus
/// message-specific fields.
///
/// The discriminant is the only field the client core interprets; everything
/// else is opaque and passed through to the handler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(rename = "type")]
    pub msg_type: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Message {
    /// Create a message with the given type discriminant and no fields.
    pub fn new(msg_type: i64) -> Self {
        Self {
            msg_type,
            fields: Map::new(),
        }
    }

    /// Add a field, builder-style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
