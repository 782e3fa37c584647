//! Path parsing and lookup against a context tree
//!
//! Placeholder paths are dot-separated. A segment is used as an object key,
//! or as an array index when the current node is an array.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `config.database.host`
//! - Array indexing: `items.0.name`
//! - Counting from the end: `items.-1`
//!
//! Brackets have no meaning here: `items[0]` is a single key named `items[0]`.
//!
//! # Examples
//!
//! ```
//! use placeholder_core::path::{parse_path, PathSegment, get_at_path};
//! use serde_json::json;
//!
//! let path = parse_path("config.database.0.host");
//! assert_eq!(path, vec![
//!     PathSegment::Key("config".to_string()),
//!     PathSegment::Key("database".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("host".to_string()),
//! ]);
//!
//! let value = json!({"config": {"database": [{"host": "localhost"}]}});
//! assert_eq!(get_at_path(&value, &path), Some(&json!("localhost")));
//! ```

use serde_json::Value;

/// A segment of a path - either a key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in an object (e.g., "database" in "config.database")
    Key(String),
    /// An integer segment (e.g., 0 in `items.0`); negative counts from the end
    Index(i64),
}

impl PathSegment {
    fn parse(segment: &str) -> Self {
        match segment.parse::<i64>() {
            // "01" and "+1" stay keys so object lookups see the exact text
            Ok(index) if index.to_string() == segment => Self::Index(index),
            _ => Self::Key(segment.to_string()),
        }
    }
}

/// Parse a path string into segments.
///
/// Empty segments (from leading, trailing or doubled dots) are skipped, so
/// an empty path addresses the root.
///
/// # Examples
///
/// ```
/// use placeholder_core::path::{parse_path, PathSegment};
///
/// let path = parse_path("items.0.name");
/// assert_eq!(path, vec![
///     PathSegment::Key("items".to_string()),
///     PathSegment::Index(0),
///     PathSegment::Key("name".to_string()),
/// ]);
///
/// assert!(parse_path("").is_empty());
/// ```
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .map(PathSegment::parse)
        .collect()
}

/// Get a value at the given path from a JSON value.
///
/// Returns `None` if the path doesn't exist. A `null` stored at the path is
/// found, not missing.
pub fn get_at_path<'a>(value: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(value);
    };

    let next_value = match (value, first) {
        (Value::Object(map), PathSegment::Key(key)) => map.get(key)?,
        (Value::Object(map), PathSegment::Index(idx)) => map.get(&idx.to_string())?,
        (Value::Array(arr), PathSegment::Index(idx)) => {
            let len = i64::try_from(arr.len()).ok()?;
            let position = if *idx < 0 { len + idx } else { *idx };
            arr.get(usize::try_from(position).ok()?)?
        }
        _ => return None,
    };

    get_at_path(next_value, rest)
}

/// Parse `path` and look it up in `value`.
///
/// # Examples
///
/// ```
/// use placeholder_core::path::get_path;
/// use serde_json::json;
///
/// let value = json!({"config": {"host": "localhost"}});
/// assert_eq!(get_path(&value, "config.host"), Some(&json!("localhost")));
/// assert_eq!(get_path(&value, "config.missing"), None);
/// ```
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    get_at_path(value, &parse_path(path))
}
