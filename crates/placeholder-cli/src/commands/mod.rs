//! Command implementations

mod inspect;
mod render;

pub use inspect::run_inspect;
pub use render::{RenderRequest, run_render};

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{CliError, Result};
use crate::format::Format;

/// Read a document and parse it in its detected format
pub(crate) fn read_document(path: &Path) -> Result<(Value, Format)> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::user(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let format = Format::detect(path, &content);
    tracing::debug!(?path, ?format, "Parsing document");
    Ok((format.parse(&content)?, format))
}
