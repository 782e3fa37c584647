//! The `inspect` command

use std::path::Path;

use colored::Colorize;
use placeholder_core::{Placeholder, find_placeholders};
use serde::Serialize;
use serde_json::Value;

use super::read_document;
use crate::error::Result;

/// One placeholder found in a template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderReport {
    /// Dotted location of the string leaf, empty for the root
    pub location: String,
    /// Matched text, braces included
    pub text: String,
    pub placeholder: Placeholder,
}

/// Collect every placeholder in the string leaves of `node`
pub fn collect_placeholders(node: &Value) -> Result<Vec<PlaceholderReport>> {
    let mut reports = Vec::new();
    collect_into(node, String::new(), &mut reports)?;
    Ok(reports)
}

fn collect_into(node: &Value, location: String, reports: &mut Vec<PlaceholderReport>) -> Result<()> {
    match node {
        Value::String(template) => {
            for found in find_placeholders(template) {
                reports.push(PlaceholderReport {
                    location: location.clone(),
                    text: found.text.to_string(),
                    placeholder: Placeholder::parse(found.body)?,
                });
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_into(item, child_location(&location, &index.to_string()), reports)?;
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                collect_into(item, child_location(&location, key), reports)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn child_location(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

/// Run the inspect command
pub fn run_inspect(template: &Path, json: bool) -> Result<()> {
    let (node, _) = read_document(template)?;
    let reports = collect_placeholders(&node)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("No placeholders found.");
        return Ok(());
    }

    for report in &reports {
        let location = if report.location.is_empty() {
            "(root)"
        } else {
            report.location.as_str()
        };
        println!("{} {}", location.cyan(), report.text.bold());
        for clause in &report.placeholder.clauses {
            let tags: Vec<_> = clause.tags.iter().map(|tag| tag.as_str()).collect();
            if tags.is_empty() {
                println!("    {} {}", "path".dimmed(), clause.path);
            } else {
                println!("    {} {} :{}", "path".dimmed(), clause.path, tags.join(":"));
            }
        }
        if let Some(default) = &report.placeholder.default {
            println!("    {} {:?} :{}", "default".dimmed(), default.literal, default.cast_type());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serde_json::json;

    #[test]
    fn test_collect_locations() {
        let node = json!({
            "url": "/users/{{id}}",
            "body": {"tags": ["static", "{{tag|fallback:str}}"]},
            "count": 3
        });

        let reports = collect_placeholders(&node).unwrap();
        let found: Vec<_> = reports
            .iter()
            .map(|r| (r.location.as_str(), r.text.as_str()))
            .collect();

        assert_eq!(
            found,
            vec![("url", "{{id}}"), ("body.tags.1", "{{tag|fallback:str}}")]
        );
        assert_eq!(reports[1].placeholder.clauses.len(), 2);
    }

    #[test]
    fn test_collect_root_string() {
        let reports = collect_placeholders(&json!("{{a}} and {{b?:x}}")).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].location, "");
        assert!(reports[1].placeholder.default.is_some());
    }

    #[test]
    fn test_collect_unsupported_tag() {
        let err = collect_placeholders(&json!({"a": "{{x:float}}"})).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(placeholder_core::Error::UnsupportedType { .. })
        ));
    }
}
