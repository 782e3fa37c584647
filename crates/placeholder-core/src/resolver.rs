//! Clause resolution against a context

use serde_json::Value;

use crate::cast::cast;
use crate::parser::{Clause, Placeholder};
use crate::path::get_path;

/// Resolve a single clause.
///
/// Returns `None` when the path is missing, or when it holds an empty string
/// and `ignore_empty_str` is set. Otherwise returns the cast value.
pub fn resolve_clause(
    clause: &Clause,
    context: &Value,
    ignore_empty_str: bool,
    whole_string: bool,
) -> Option<Value> {
    let value = get_path(context, &clause.path)?;

    if ignore_empty_str && value.as_str() == Some("") {
        tracing::trace!(path = %clause.path, "Empty string ignored");
        return None;
    }

    Some(cast(value, clause.cast_type(), whole_string))
}

/// Try each clause in order and return the first that resolves.
pub fn resolve_clauses(
    placeholder: &Placeholder,
    context: &Value,
    whole_string: bool,
) -> Option<Value> {
    let ignore_empty_str = placeholder.ignores_empty_str();

    placeholder.clauses.iter().find_map(|clause| {
        let resolved = resolve_clause(clause, context, ignore_empty_str, whole_string);
        tracing::trace!(
            path = %clause.path,
            cast = %clause.cast_type(),
            found = resolved.is_some(),
            "Resolved clause"
        );
        resolved
    })
}
