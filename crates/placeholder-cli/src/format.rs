//! Document formats for templates, contexts and output

use std::path::Path;

use clap::ValueEnum;
use serde_json::Value;

use crate::error::Result;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Detect format from content heuristics
    pub fn from_content(content: &str) -> Self {
        let trimmed = content.trim_start();

        // JSON starts with { or [ (or is a bare string)
        if trimmed.starts_with('{') || trimmed.starts_with('"') {
            return Self::Json;
        }

        // TOML has [section] headers or key = value
        if trimmed.starts_with('[') {
            if trimmed.lines().any(|l| l.contains(" = ")) {
                return Self::Toml;
            }
            return Self::Json;
        }
        if trimmed
            .lines()
            .next()
            .is_some_and(|l| l.contains(" = ") && !l.starts_with('#'))
        {
            return Self::Toml;
        }

        Self::Yaml
    }

    /// Detect from the path's extension, falling back to the content
    pub fn detect(path: &Path, content: &str) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_else(|| Self::from_content(content))
    }

    pub fn parse(&self, content: &str) -> Result<Value> {
        let value = match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        };
        Ok(value)
    }

    pub fn render(&self, value: &Value, pretty: bool) -> Result<String> {
        let rendered = match self {
            Self::Json if pretty => serde_json::to_string_pretty(value)?,
            Self::Json => serde_json::to_string(value)?,
            Self::Yaml => serde_yaml::to_string(value)?,
            Self::Toml if pretty => toml::to_string_pretty(value)?,
            Self::Toml => toml::to_string(value)?,
        };
        Ok(rendered)
    }
}
