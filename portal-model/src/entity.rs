use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record managed by an entity store.
///
/// The identifier is assigned once at creation and never changes. The
/// serialized form must be a JSON object carrying the identifier under
/// [`Entity::ID_FIELD`].
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the identifier attribute in the entity's document.
    const ID_FIELD: &'static str = "id";

    fn id(&self) -> &str;

    /// Serializes this entity into its JSON document.
    fn to_document(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Rebuilds an entity from a JSON document.
    fn from_document(document: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(document)
    }
}

/// A schemaless entity: an identifier plus arbitrary JSON attributes.
///
/// Serializes flat, so `Record { id: "1", fields: {"name": "Alice"} }`
/// becomes `{"id": "1", "name": "Alice"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Builds a record from an id and a JSON object. Non-object values yield
    /// a record with no attributes.
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        let mut fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        fields.remove("id");
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Extract a string value using a JSON pointer (e.g., "/name").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.get(pointer).and_then(Value::as_str)
    }

    /// Extract a boolean value using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.get(pointer).and_then(Value::as_bool)
    }

    /// Extract a numeric value using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.get(pointer).and_then(Value::as_f64)
    }

    fn get(&self, pointer: &str) -> Option<&Value> {
        let mut segments = pointer.strip_prefix('/')?.splitn(2, '/');
        let head = segments.next()?.replace("~1", "/").replace("~0", "~");
        let value = self.fields.get(&head)?;
        match segments.next() {
            Some(rest) => value.pointer(&format!("/{rest}")),
            None => Some(value),
        }
    }
}

impl Entity for Record {
    fn id(&self) -> &str {
        &self.id
    }
}
