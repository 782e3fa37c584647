//! Render options
//!
//! Options are usually left at their defaults. Hosts that render untrusted
//! templates can load them from TOML to restrict type tags or tighten the
//! depth guard.
//!
//! ```
//! use placeholder_core::config::{ArrayMerge, RenderOptions};
//! use placeholder_core::TypeTag;
//!
//! let options = RenderOptions::parse(r#"
//! merge_key = "$merge"
//! array_merge = "replace"
//! allowed_types = ["str", "int"]
//! "#).unwrap();
//!
//! assert_eq!(options.merge_key, "$merge");
//! assert_eq!(options.array_merge, ArrayMerge::Replace);
//! assert!(options.allows(TypeTag::Int));
//! assert!(!options.allows(TypeTag::Json));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tag::TypeTag;

/// Object key that carries merge sources
pub const DEFAULT_MERGE_KEY: &str = "$truto_merge";

/// Nesting depth past which the structural walk drops subtrees
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How arrays that meet during a deep merge are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMerge {
    /// Base elements followed by source elements
    #[default]
    Concat,
    /// Source array replaces the base array
    Replace,
}

/// Options shared by every render call of a [`crate::Renderer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Reserved object key holding merge sources
    pub merge_key: String,

    /// Maximum nesting depth visited by the structural replacer
    pub max_depth: usize,

    /// Conflict policy for arrays during merges
    pub array_merge: ArrayMerge,

    /// When set, only these tags may appear in templates
    pub allowed_types: Option<Vec<TypeTag>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            merge_key: DEFAULT_MERGE_KEY.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            array_merge: ArrayMerge::default(),
            allowed_types: None,
        }
    }
}

impl RenderOptions {
    /// Parse options from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let options: RenderOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(?path, "Loading render options");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.merge_key.is_empty() {
            return Err(Error::config("merge_key must not be empty"));
        }
        if self.max_depth == 0 {
            return Err(Error::config("max_depth must be at least 1"));
        }
        Ok(())
    }

    /// Whether `tag` passes the allow-list
    pub fn allows(&self, tag: TypeTag) -> bool {
        self.allowed_types
            .as_ref()
            .is_none_or(|allowed| allowed.contains(&tag))
    }
}
