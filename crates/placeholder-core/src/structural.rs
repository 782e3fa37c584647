//! Recursive placeholder replacement over strings, arrays and objects
//!
//! Objects are processed in two passes. The first renders every string
//! leaf. The second applies merge directives: an object carrying the merge
//! key has each resolved source deep-merged into its remaining keys, and the
//! key itself is removed.
//!
//! Owned `Value` trees cannot contain cycles, so the only unbounded input is
//! depth. Subtrees nested deeper than [`RenderOptions::max_depth`] are
//! dropped from the result, the same way a cyclic edge would be.

use serde_json::{Map, Value};

use crate::config::RenderOptions;
use crate::error::{Error, Result};
use crate::merge::merge_sources;
use crate::render::render_template;

/// Outcome of visiting one node during the substitution pass
enum Visit {
    Value(Value),
    /// A whole-string placeholder resolved to undefined
    Undefined,
    /// Dropped by the depth guard
    Excised,
}

/// Replace placeholders throughout `node`.
///
/// The root must be a string, an array or an object; nested scalars of any
/// other kind pass through unchanged.
pub fn replace_in_tree(node: &Value, context: &Value, options: &RenderOptions) -> Result<Value> {
    match node {
        Value::String(template) => {
            Ok(render_template(template, context, options)?.unwrap_or(Value::Null))
        }
        Value::Array(_) | Value::Object(_) => {
            let substituted = match substitute(node, context, options, 0)? {
                Visit::Value(value) => value,
                // Containers never render to undefined, and depth 0 is never excised
                Visit::Undefined | Visit::Excised => Value::Null,
            };
            // The root sits at depth 0, which the guard never drops
            Ok(apply_merges(substituted, options, 0).unwrap_or(Value::Null))
        }
        other => Err(Error::InvalidInput {
            kind: kind_name(other),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// First pass: render every string leaf.
fn substitute(
    node: &Value,
    context: &Value,
    options: &RenderOptions,
    depth: usize,
) -> Result<Visit> {
    if depth > options.max_depth {
        tracing::warn!(
            depth,
            max_depth = options.max_depth,
            "Dropping subtree past depth limit"
        );
        return Ok(Visit::Excised);
    }

    let visit = match node {
        Value::String(template) => match render_template(template, context, options)? {
            Some(value) => Visit::Value(value),
            None => Visit::Undefined,
        },
        Value::Array(items) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                match substitute(item, context, options, depth + 1)? {
                    Visit::Value(value) => rendered.push(value),
                    Visit::Undefined => rendered.push(Value::Null),
                    Visit::Excised => {}
                }
            }
            Visit::Value(Value::Array(rendered))
        }
        Value::Object(map) => {
            let mut rendered = Map::new();
            for (key, item) in map {
                if let Visit::Value(value) = substitute(item, context, options, depth + 1)? {
                    rendered.insert(key.clone(), value);
                }
            }
            Visit::Value(Value::Object(rendered))
        }
        other => Visit::Value(other.clone()),
    };

    Ok(visit)
}

/// Second pass: resolve merge directives, parents before children.
///
/// Subtrees brought in by merge sources or `json` casts are held to the same
/// depth limit as the template; `None` means the node was dropped.
fn apply_merges(value: Value, options: &RenderOptions, depth: usize) -> Option<Value> {
    if depth > options.max_depth {
        tracing::warn!(
            depth,
            max_depth = options.max_depth,
            "Dropping merged subtree past depth limit"
        );
        return None;
    }

    let merged = match value {
        Value::Object(mut map) => {
            // Loop so a directive contributed by a merge source is applied too
            while let Some(directive) = map.shift_remove(&options.merge_key) {
                let sources = match directive {
                    Value::Array(items) => items,
                    single => vec![single],
                };
                tracing::debug!(
                    sources = sources.len(),
                    base_keys = map.len(),
                    "Applying merge directive"
                );
                map = merge_sources(map, &sources, options.array_merge);
            }

            Value::Object(
                map.into_iter()
                    .filter_map(|(key, item)| {
                        apply_merges(item, options, depth + 1).map(|item| (key, item))
                    })
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter_map(|item| apply_merges(item, options, depth + 1))
                .collect(),
        ),
        other => other,
    };

    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn replace(node: Value, context: Value) -> Value {
        replace_in_tree(&node, &context, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_undefined_member_is_removed() {
        assert_eq!(
            replace(json!({"a": "{{x:undefined}}", "b": "{{y}}"}), json!({"y": 1})),
            json!({"b": "1"})
        );
    }

    #[test]
    fn test_undefined_element_becomes_null() {
        assert_eq!(
            replace(json!({"a": ["{{x:undefined}}", "k"]}), json!({})),
            json!({"a": [null, "k"]})
        );
    }

    #[test]
    fn test_depth_guard_drops_deep_subtrees() {
        let options = RenderOptions {
            max_depth: 2,
            ..RenderOptions::default()
        };
        let node = json!({"a": {"b": {"c": "deep"}, "keep": "{{v}}"}, "list": [[["x"]]]});

        let result = replace_in_tree(&node, &json!({"v": "ok"}), &options).unwrap();

        assert_eq!(result, json!({"a": {"b": {}, "keep": "ok"}, "list": [[]]}));
    }

    #[test]
    fn test_depth_guard_applies_to_merged_subtrees() {
        let options = RenderOptions {
            max_depth: 2,
            ..RenderOptions::default()
        };
        let node = json!({"keep": 1, "$truto_merge": "{{m:json}}", "cast": "{{c:json}}"});
        let context = json!({
            "m": {"a": {"b": {"c": "deep"}, "ok": true}},
            "c": ["x", ["y", ["z"]]]
        });

        let result = replace_in_tree(&node, &context, &options).unwrap();

        assert_eq!(
            result,
            json!({"keep": 1, "cast": ["x", []], "a": {"b": {}, "ok": true}})
        );
    }

    #[test]
    fn test_nested_directive_inside_merge_source() {
        let node = json!({
            "base": 1,
            "$truto_merge": "{{outer:json}}"
        });
        let context = json!({
            "outer": {"from_outer": true, "$truto_merge": {"from_inner": true}}
        });

        assert_eq!(
            replace(node, context),
            json!({"base": 1, "from_outer": true, "from_inner": true})
        );
    }

    #[test]
    fn test_custom_merge_key() {
        let options = RenderOptions {
            merge_key: "$merge".to_string(),
            ..RenderOptions::default()
        };
        let node = json!({"a": 1, "$merge": "{{m:json}}", "$truto_merge": "kept"});

        let result = replace_in_tree(&node, &json!({"m": {"b": 2}}), &options).unwrap();

        assert_eq!(result, json!({"a": 1, "b": 2, "$truto_merge": "kept"}));
    }

    #[test]
    fn test_root_array_passes_scalars_through() {
        assert_eq!(
            replace(json!(["{{a:num}}", 2, null, {"k": "{{a}}"}]), json!({"a": "1.5"})),
            json!([1.5, 2, null, {"k": "1.5"}])
        );
    }

    #[test]
    fn test_invalid_root() {
        let err = replace_in_tree(&json!(1), &json!({}), &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { kind: "number" }));
    }
}
