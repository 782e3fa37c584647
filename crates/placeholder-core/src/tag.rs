//! Type tags accepted after a placeholder path

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A `:tag` suffix on a clause or default literal.
///
/// The first tag after a path selects the cast; `Null`, `Undefined` and
/// `IgnoreEmptyStr` additionally act as modifiers for the whole placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeTag {
    Str,
    Int,
    Num,
    Bool,
    Json,
    Null,
    Any,
    IgnoreEmptyStr,
    Undefined,
}

impl TypeTag {
    /// All tags, in declaration order
    pub const ALL: [TypeTag; 9] = [
        Self::Str,
        Self::Int,
        Self::Num,
        Self::Bool,
        Self::Json,
        Self::Null,
        Self::Any,
        Self::IgnoreEmptyStr,
        Self::Undefined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Num => "num",
            Self::Bool => "bool",
            Self::Json => "json",
            Self::Null => "null",
            Self::Any => "any",
            Self::IgnoreEmptyStr => "ignore-empty-str",
            Self::Undefined => "undefined",
        }
    }

    /// Whether this tag only changes fallback policy rather than the value
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined | Self::IgnoreEmptyStr)
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|tag| tag.as_str() == s)
            .copied()
            .ok_or_else(|| Error::unsupported(s))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.as_str().parse::<TypeTag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "integer".parse::<TypeTag>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported type: integer");
    }

    #[test]
    fn test_serde_names_match_grammar() {
        let tag: TypeTag = serde_json::from_str("\"ignore-empty-str\"").unwrap();
        assert_eq!(tag, TypeTag::IgnoreEmptyStr);
        assert_eq!(serde_json::to_string(&TypeTag::Num).unwrap(), "\"num\"");
    }

    #[test]
    fn test_modifiers() {
        assert!(TypeTag::Null.is_modifier());
        assert!(TypeTag::Undefined.is_modifier());
        assert!(TypeTag::IgnoreEmptyStr.is_modifier());
        assert!(!TypeTag::Json.is_modifier());
    }
}
