//! Renderer facade bundling render options

use serde_json::Value;

use crate::config::RenderOptions;
use crate::error::Result;
use crate::render::render_template;
use crate::structural::replace_in_tree;

/// Renders templates with a fixed set of [`RenderOptions`]
///
/// ```
/// use placeholder_core::{RenderOptions, Renderer};
/// use serde_json::json;
///
/// let renderer = Renderer::new(RenderOptions::default());
/// let body = renderer
///     .replace_placeholders(
///         &json!({"limit": "{{page_size:int?:50:int}}", "q": "name = {{name}}"}),
///         &json!({"name": "acme"}),
///     )
///     .unwrap();
///
/// assert_eq!(body, json!({"limit": 50, "q": "name = acme"}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render one template string. `None` means the whole-string placeholder
    /// resolved to undefined.
    pub fn replace(&self, template: &str, context: &Value) -> Result<Option<Value>> {
        render_template(template, context, &self.options)
    }

    /// Render every string leaf of `node`, then apply merge directives.
    pub fn replace_placeholders(&self, node: &Value, context: &Value) -> Result<Value> {
        replace_in_tree(node, context, &self.options)
    }
}

/// Render one template string with default options.
///
/// ```
/// use placeholder_core::replace;
/// use serde_json::json;
///
/// assert_eq!(replace("{{foo:bool}}", &json!({"foo": "true"})).unwrap(), Some(json!(true)));
/// assert_eq!(replace("{{foo:undefined}}", &json!({})).unwrap(), None);
/// ```
pub fn replace(template: &str, context: &Value) -> Result<Option<Value>> {
    Renderer::default().replace(template, context)
}

/// Replace placeholders throughout a string, array, or object with default
/// options.
pub fn replace_placeholders(node: &Value, context: &Value) -> Result<Value> {
    Renderer::default().replace_placeholders(node, context)
}
