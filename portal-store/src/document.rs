//! Attribute-generic operations over entity documents.

use crate::error::{StoreError, StoreResult};
use portal_model::{text_attributes, Entity, FieldSelector};
use serde_json::Value;

/// Shallow-merges `patch` into the entity's document and rebuilds the entity.
///
/// Keys present in the patch overwrite the entity's attributes; the
/// identifier key is always discarded. A `null` patch changes nothing.
pub(crate) fn merge_update<E: Entity>(current: &E, patch: Value) -> StoreResult<E> {
    let patch = match patch {
        Value::Object(map) => map,
        Value::Null => return Ok(current.clone()),
        other => {
            return Err(StoreError::InvalidDocument(format!(
                "update must serialize to an object, got {}",
                kind(&other)
            )));
        }
    };

    let mut document = current.to_document()?;
    let Value::Object(target) = &mut document else {
        return Err(StoreError::InvalidDocument(format!(
            "entity {} must serialize to an object",
            current.id()
        )));
    };
    for (key, value) in patch {
        if key != E::ID_FIELD {
            target.insert(key, value);
        }
    }

    Ok(E::from_document(document)?)
}

/// Case-insensitive substring match of `needle` against a document.
///
/// `needle` must already be lowercased. With a non-empty whitelist only the
/// selected attributes are searched; otherwise every top-level string
/// attribute is. Non-string values never match. An empty needle matches
/// every document.
pub(crate) fn matches_query(
    document: &Value,
    needle: &str,
    fields: Option<&[FieldSelector]>,
) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(needle);
    match fields {
        Some(selectors) if !selectors.is_empty() => selectors
            .iter()
            .filter_map(|s| s.text_in(document))
            .any(hit),
        _ => text_attributes(document).any(hit),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
