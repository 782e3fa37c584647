//! Placeholder resolution for JSON templates
//!
//! Renders `{{path:type|fallback?:default}}` placeholders embedded in
//! strings, arrays and objects against a context value, then applies
//! `$truto_merge` merge directives.
//!
//! ```
//! use placeholder_core::replace_placeholders;
//! use serde_json::json;
//!
//! let template = json!({
//!     "query": {"default_value": "foo", "$truto_merge": "{{u:json}}"}
//! });
//! let context = json!({"u": {"custom_value": "bar"}});
//!
//! assert_eq!(
//!     replace_placeholders(&template, &context).unwrap(),
//!     json!({"query": {"default_value": "foo", "custom_value": "bar"}})
//! );
//! ```

pub mod cast;
pub mod config;
pub mod error;
pub mod merge;
pub mod parser;
pub mod path;
pub mod render;
pub mod renderer;
pub mod resolver;
pub mod structural;
pub mod tag;

pub use config::{ArrayMerge, RenderOptions};
pub use error::{Error, Result};
pub use parser::{Clause, DefaultClause, Placeholder, PlaceholderMatch, find_placeholders};
pub use renderer::{Renderer, replace, replace_placeholders};
pub use tag::TypeTag;
