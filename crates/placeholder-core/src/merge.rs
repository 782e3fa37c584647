//! Deep merge of JSON values
//!
//! Objects merge key by key, recursively. Scalars from the overlay replace
//! the base. Arrays follow [`ArrayMerge`].

use serde_json::{Map, Value};

use crate::config::ArrayMerge;

/// Deep merge `other` into `base`, with `other` taking precedence.
///
/// ```
/// use placeholder_core::config::ArrayMerge;
/// use placeholder_core::merge::deep_merge;
/// use serde_json::json;
///
/// let mut base = json!({"defaults": {"timeout": 1000, "retries": 3}});
/// deep_merge(&mut base, &json!({"defaults": {"retries": 5}, "custom": true}), ArrayMerge::Concat);
/// assert_eq!(base, json!({"defaults": {"timeout": 1000, "retries": 5}, "custom": true}));
/// ```
pub fn deep_merge(base: &mut Value, other: &Value, arrays: ArrayMerge) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            merge_maps(base_map, other_map, arrays);
        }
        (Value::Array(base_items), Value::Array(other_items)) if arrays == ArrayMerge::Concat => {
            base_items.extend(other_items.iter().cloned());
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}

fn merge_maps(base: &mut Map<String, Value>, other: &Map<String, Value>, arrays: ArrayMerge) {
    for (key, other_val) in other {
        if let Some(base_val) = base.get_mut(key) {
            deep_merge(base_val, other_val, arrays);
        } else {
            base.insert(key.clone(), other_val.clone());
        }
    }
}

/// Fold `sources` into `base` in order. Sources that are not objects are
/// skipped.
pub fn merge_sources(
    mut base: Map<String, Value>,
    sources: &[Value],
    arrays: ArrayMerge,
) -> Map<String, Value> {
    for source in sources {
        match source {
            Value::Object(source_map) => merge_maps(&mut base, source_map, arrays),
            _ => tracing::debug!(?source, "Skipping merge source that is not an object"),
        }
    }
    base
}
