//! Path segments and the pure functions that render them as JSONPath and
//! RFC 6901 JSON Pointer strings.

use std::fmt::Write as _;

/// One step in a structural path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// A zero-based array index.
    Index(usize),
}

impl PathSegment {
    /// Returns the key if this is a [`PathSegment::Key`].
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k.as_str()),
            Self::Index(_) => None,
        }
    }

    /// Returns the index if this is a [`PathSegment::Index`].
    #[must_use]
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Key(_) => None,
        }
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Characters that disqualify a key from being a "simple identifier",
/// in addition to failing `[A-Za-z_][A-Za-z0-9_]*`.
const DISQUALIFYING: &[char] = &[
    '.', '*', '@', '$', '\'', '"', '[', ']', '/', '\\', '#', '-', '+', ':', ',', ' ', '(', ')',
    '{', '}', '=', '!', '~',
];

fn is_simple_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    if key.chars().any(|c| DISQUALIFYING.contains(&c)) {
        return false;
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Escapes a key for the `['...']` bracket form of JSONPath: backslash and
/// single quote are escaped, everything else (including `"` and control
/// characters) passes through verbatim.
fn escape_jsonpath_bracket(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            other => out.push(other),
        }
    }
    out
}

/// Renders a segment list as a JSONPath expression.
#[must_use]
pub fn to_json_path(segments: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in segments {
        match segment {
            PathSegment::Index(i) => {
                let _ = write!(out, "[{i}]");
            }
            PathSegment::Key(k) if is_simple_identifier(k) => {
                out.push('.');
                out.push_str(k);
            }
            PathSegment::Key(k) => {
                out.push_str("['");
                out.push_str(&escape_jsonpath_bracket(k));
                out.push_str("']");
            }
        }
    }
    out
}

/// Escapes a key for RFC 6901: `~` becomes `~0` first, then `/` becomes
/// `~1`, so that a literal `~/` becomes `~0~1` rather than `~01`.
fn escape_pointer_segment(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            other => out.push(other),
        }
    }
    out
}

/// Renders a segment list as an RFC 6901 JSON Pointer.
#[must_use]
pub fn to_json_pointer(segments: &[PathSegment]) -> String {
    if segments.is_empty() {
        return "/".to_owned();
    }
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        match segment {
            PathSegment::Index(i) => {
                let _ = write!(out, "{i}");
            }
            PathSegment::Key(k) => out.push_str(&escape_pointer_segment(k)),
        }
    }
    out
}
