//! Error types for placeholder-core

/// Result type for placeholder-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering templates
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A placeholder used a type tag that does not exist
    #[error("Unsupported type: {tag}")]
    UnsupportedType { tag: String },

    /// A placeholder used a type tag that the render options do not allow
    #[error("Type not allowed: {tag}")]
    DisallowedType { tag: String },

    /// The root handed to the structural replacer has the wrong shape
    #[error("Invalid type: expected a string, array, or object, got {kind}")]
    InvalidInput { kind: &'static str },

    /// Render options are inconsistent
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unsupported(tag: impl Into<String>) -> Self {
        Self::UnsupportedType { tag: tag.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
