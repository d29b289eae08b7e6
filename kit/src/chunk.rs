//! The located, immutable output record of the parsing pipeline.

use std::sync::Arc;

use crate::path::{self, PathSegment};
use crate::token::TokenKind;

/// One fragment of one JSON token, located by its structural path.
///
/// `segments` is shared via [`Arc`] because many successive records emitted
/// while inside the same container share an identical path; cloning a
/// `ChunkRecord` never copies the underlying segment list.
///
/// `path` and `pointer` are computed lazily from `segments` on each call,
/// matching the rendering rules in [`crate::path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRecord {
    value: String,
    kind: TokenKind,
    segments: Arc<[PathSegment]>,
}

impl ChunkRecord {
    /// Builds a record. `segments` is captured as given and never mutated
    /// afterward.
    #[must_use]
    pub fn new(value: impl Into<String>, kind: TokenKind, segments: Arc<[PathSegment]>) -> Self {
        Self {
            value: value.into(),
            kind,
            segments,
        }
    }

    /// The fragment's textual value. Empty for structural tokens.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The token kind this fragment belongs to.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The active path segments at the moment this record was emitted.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// JSONPath rendering of [`Self::segments`].
    #[must_use]
    pub fn path(&self) -> String {
        path::to_json_path(&self.segments)
    }

    /// RFC 6901 JSON Pointer rendering of [`Self::segments`].
    #[must_use]
    pub fn pointer(&self) -> String {
        path::to_json_pointer(&self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_record_has_canonical_path_and_pointer() {
        let record = ChunkRecord::new("42", TokenKind::Number, Arc::from([]));
        assert_eq!(record.path(), "$");
        assert_eq!(record.pointer(), "/");
        assert_eq!(record.value(), "42");
        assert!(record.segments().is_empty());
    }

    #[test]
    fn structural_record_carries_empty_value() {
        let record = ChunkRecord::new("", TokenKind::ObjectStart, Arc::from([]));
        assert_eq!(record.value(), "");
        assert!(record.kind().is_structural());
    }

    #[test]
    fn nested_record_renders_mixed_path() {
        let segments: Arc<[PathSegment]> = Arc::from(vec![
            PathSegment::Key("a".to_owned()),
            PathSegment::Index(1),
            PathSegment::Key("b".to_owned()),
        ]);
        let record = ChunkRecord::new("v", TokenKind::String, segments);
        assert_eq!(record.path(), "$.a[1].b");
        assert_eq!(record.pointer(), "/a/1/b");
    }
}
