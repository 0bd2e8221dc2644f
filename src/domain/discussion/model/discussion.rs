use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A discussion as returned by the server.
///
/// Only `id` is interpreted here; every other field is kept verbatim so the
/// record serializes back exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Discussion {
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    pub fn body(&self) -> Option<&str> {
        self.fields.get("body").and_then(Value::as_str)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
