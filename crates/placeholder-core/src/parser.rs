//! Placeholder scanning and parsing
//!
//! A placeholder is `{{ body }}` where the body only contains ASCII letters,
//! digits, whitespace and `_ - . | : ? /`. Anything else between the braces
//! means the text is not a placeholder and is left alone.
//!
//! The body is split in a fixed order:
//!
//! 1. on the first `?:`, separating the clauses from the default literal;
//! 2. on `|`, giving the ordered clauses;
//! 3. on the first colon that introduces a tag-shaped word, separating the
//!    path from its `:tag` list.
//!
//! ```
//! use placeholder_core::parser::{find_placeholders, Placeholder};
//! use placeholder_core::TypeTag;
//!
//! let found = find_placeholders("Bearer {{ token | fallback:str ?: none }}");
//! assert_eq!(found.len(), 1);
//!
//! let placeholder = Placeholder::parse(found[0].body).unwrap();
//! assert_eq!(placeholder.clauses[0].path, "token");
//! assert_eq!(placeholder.clauses[1].tags, vec![TypeTag::Str]);
//! assert_eq!(placeholder.default.unwrap().literal, " none ");
//! ```

use serde::Serialize;

use crate::error::Result;
use crate::tag::TypeTag;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const DEFAULT_SEPARATOR: &str = "?:";

/// One `{{...}}` occurrence inside a template string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderMatch<'a> {
    /// Full matched text, braces included
    pub text: &'a str,
    /// Text between the braces
    pub body: &'a str,
    /// Byte offset of the opening braces
    pub start: usize,
}

impl PlaceholderMatch<'_> {
    /// Byte offset just past the closing braces
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

fn is_body_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '_' | '-' | '.' | '|' | ':' | '?' | '/')
}

fn is_tag_word(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Find all non-overlapping placeholders, left to right.
pub fn find_placeholders(template: &str) -> Vec<PlaceholderMatch<'_>> {
    let mut matches = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find(OPEN) {
        let start = cursor + offset;
        let body_start = start + OPEN.len();
        let body_len = template[body_start..]
            .char_indices()
            .find(|(_, c)| !is_body_char(*c))
            .map_or(template.len() - body_start, |(i, _)| i);
        let body_end = body_start + body_len;

        if body_len > 0 && template[body_end..].starts_with(CLOSE) {
            let end = body_end + CLOSE.len();
            matches.push(PlaceholderMatch {
                text: &template[start..end],
                body: &template[body_start..body_end],
                start,
            });
            cursor = end;
        } else {
            // "{{{x}}" still matches starting at the second brace
            cursor = start + 1;
        }
    }

    matches
}

/// Split `text` at the first colon that starts a tag, returning the head and
/// the trimmed tag names that follow it.
fn split_tags(text: &str) -> (&str, Vec<&str>) {
    for (position, _) in text.match_indices(':') {
        let rest = &text[position + 1..];
        let candidate = rest.split(':').next().unwrap_or_default().trim();
        if is_tag_word(candidate) {
            // "foo:int:" and "foo:int::null" leave empty names behind
            let tags = rest
                .split(':')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect();
            return (&text[..position], tags);
        }
    }
    (text, Vec::new())
}

fn parse_tags(names: &[&str]) -> Result<Vec<TypeTag>> {
    names.iter().map(|name| name.parse()).collect()
}

/// A `path[:tag]*` alternative
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    /// Trimmed path expression
    pub path: String,
    /// Tags in written order; the first one is the active cast
    pub tags: Vec<TypeTag>,
}

impl Clause {
    pub fn parse(text: &str) -> Result<Self> {
        let (path, names) = split_tags(text);
        Ok(Self {
            path: path.trim().to_string(),
            tags: parse_tags(&names)?,
        })
    }

    /// Cast applied to a resolved value, `str` when no tag is given
    pub fn cast_type(&self) -> TypeTag {
        self.tags.first().copied().unwrap_or(TypeTag::Str)
    }

    pub fn has_tag(&self, tag: TypeTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// The literal after `?:`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultClause {
    /// Literal text, whitespace preserved
    pub literal: String,
    pub tag: Option<TypeTag>,
}

impl DefaultClause {
    pub fn parse(text: &str) -> Result<Self> {
        let (literal, names) = split_tags(text);
        let tags = parse_tags(&names)?;
        Ok(Self {
            literal: literal.to_string(),
            tag: tags.first().copied(),
        })
    }

    pub fn cast_type(&self) -> TypeTag {
        self.tag.unwrap_or(TypeTag::Str)
    }
}

/// A parsed placeholder body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub clauses: Vec<Clause>,
    pub default: Option<DefaultClause>,
}

impl Placeholder {
    /// Parse the text between `{{` and `}}`.
    ///
    /// Fails with [`crate::Error::UnsupportedType`] when a tag is unknown.
    pub fn parse(body: &str) -> Result<Self> {
        let (clauses, default) = match body.split_once(DEFAULT_SEPARATOR) {
            Some((clauses, default)) => (clauses, Some(DefaultClause::parse(default)?)),
            None => (body, None),
        };

        let clauses = clauses
            .split('|')
            .map(Clause::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { clauses, default })
    }

    /// Every tag used by the clauses and the default
    pub fn tags(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.clauses
            .iter()
            .flat_map(|clause| clause.tags.iter().copied())
            .chain(self.default.as_ref().and_then(|default| default.tag))
    }

    fn any_clause_has(&self, tag: TypeTag) -> bool {
        self.clauses.iter().any(|clause| clause.has_tag(tag))
    }

    /// `null` is an acceptable result when nothing resolves
    pub fn allows_null(&self) -> bool {
        self.any_clause_has(TypeTag::Null)
    }

    /// Undefined is an acceptable result when nothing resolves
    pub fn allows_undefined(&self) -> bool {
        self.any_clause_has(TypeTag::Undefined)
    }

    /// Resolved empty strings count as missing
    pub fn ignores_empty_str(&self) -> bool {
        self.any_clause_has(TypeTag::IgnoreEmptyStr)
    }
}
