//! Rendering of a single template string
//!
//! A template that is exactly one placeholder renders to the resolved value
//! with its native type. Placeholders embedded in other text are stringified
//! into the surrounding text.

use serde_json::Value;

use crate::cast::{cast, to_js_string};
use crate::config::RenderOptions;
use crate::error::{Error, Result};
use crate::parser::{Placeholder, find_placeholders};
use crate::resolver::resolve_clauses;

/// Render `template` against `context`.
///
/// Returns `Ok(None)` when a whole-string placeholder resolves to undefined.
pub fn render_template(
    template: &str,
    context: &Value,
    options: &RenderOptions,
) -> Result<Option<Value>> {
    let matches = find_placeholders(template);
    if matches.is_empty() {
        return Ok(Some(Value::String(template.to_string())));
    }

    let mut result = template.to_string();
    for found in &matches {
        let whole_string = found.text == template;
        let placeholder = Placeholder::parse(found.body)?;
        check_allowed(&placeholder, options)?;

        let outcome = resolve_placeholder(&placeholder, found.text, context, whole_string);
        tracing::debug!(
            placeholder = found.text,
            whole_string,
            resolved = ?outcome,
            "Rendered placeholder"
        );

        if whole_string {
            return Ok(outcome);
        }

        let replacement = outcome.as_ref().map(to_js_string).unwrap_or_default();
        result = result.replacen(found.text, &replacement, 1);
    }

    Ok(Some(Value::String(result)))
}

fn check_allowed(placeholder: &Placeholder, options: &RenderOptions) -> Result<()> {
    match placeholder.tags().find(|tag| !options.allows(*tag)) {
        Some(tag) => Err(Error::DisallowedType {
            tag: tag.to_string(),
        }),
        None => Ok(()),
    }
}

/// Clauses first, then the default, then the null/undefined policy. With no
/// policy the placeholder text is kept so the template can be rendered again.
fn resolve_placeholder(
    placeholder: &Placeholder,
    text: &str,
    context: &Value,
    whole_string: bool,
) -> Option<Value> {
    if let Some(value) = resolve_clauses(placeholder, context, whole_string) {
        return Some(value);
    }

    if let Some(default) = &placeholder.default {
        let literal = Value::String(default.literal.clone());
        return Some(cast(&literal, default.cast_type(), whole_string));
    }

    if placeholder.allows_undefined() {
        None
    } else if placeholder.allows_null() {
        Some(Value::Null)
    } else {
        Some(Value::String(text.to_string()))
    }
}
