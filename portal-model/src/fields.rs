use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Names one attribute of an entity document for search.
///
/// Serialized as a plain string: values starting with `/` are JSON pointers
/// (e.g. `"/address/city"`), anything else is a top-level key
/// (e.g. `"name"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldSelector {
    /// A top-level attribute.
    Key(String),
    /// A nested attribute addressed by JSON pointer.
    Pointer(String),
}

impl FieldSelector {
    /// Shorthand for a top-level attribute.
    pub fn key(name: &str) -> Self {
        Self::Key(name.into())
    }

    /// Shorthand for a JSON pointer.
    pub fn pointer(path: &str) -> Self {
        Self::Pointer(path.into())
    }

    /// Returns the selected value if it exists and is a string.
    pub fn text_in<'a>(&self, document: &'a Value) -> Option<&'a str> {
        let value = match self {
            Self::Key(name) => document.get(name.as_str()),
            Self::Pointer(path) => document.pointer(path),
        };
        value.and_then(Value::as_str)
    }
}

impl From<&str> for FieldSelector {
    fn from(raw: &str) -> Self {
        if raw.starts_with('/') {
            Self::Pointer(raw.into())
        } else {
            Self::Key(raw.into())
        }
    }
}

impl From<String> for FieldSelector {
    fn from(raw: String) -> Self {
        if raw.starts_with('/') {
            Self::Pointer(raw)
        } else {
            Self::Key(raw)
        }
    }
}

impl From<FieldSelector> for String {
    fn from(selector: FieldSelector) -> Self {
        match selector {
            FieldSelector::Key(name) => name,
            FieldSelector::Pointer(path) => path,
        }
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(name) => f.write_str(name),
            Self::Pointer(path) => f.write_str(path),
        }
    }
}

/// Every top-level attribute of a document whose value is a string.
///
/// Numbers, booleans, arrays and nested objects are skipped.
pub fn text_attributes(document: &Value) -> impl Iterator<Item = &str> {
    document
        .as_object()
        .into_iter()
        .flat_map(|map| map.values())
        .filter_map(Value::as_str)
}
