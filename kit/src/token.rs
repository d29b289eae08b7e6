//! The kinds of token a streaming JSON lexer can produce.

/// Tag identifying the kind of JSON token a [`crate::ChunkRecord`] fragment
/// belongs to.
///
/// `Key` fragments carry the textual key currently being accumulated;
/// `String` fragments carry value text; `Number`, `Boolean`, and `Null`
/// carry the literal lexeme text. The four container-delimiter variants
/// never carry text — their [`crate::ChunkRecord::value`] is always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The `{` that opens an object.
    ObjectStart,
    /// The `}` that closes an object.
    ObjectEnd,
    /// The `[` that opens an array.
    ArrayStart,
    /// The `]` that closes an array.
    ArrayEnd,
    /// An object key string, still under construction.
    Key,
    /// A JSON string value.
    String,
    /// A JSON number literal.
    Number,
    /// A JSON `true` or `false` literal.
    Boolean,
    /// A JSON `null` literal.
    Null,
}

impl TokenKind {
    /// Returns `true` for the four structural (container-delimiter) kinds.
    ///
    /// Structural tokens always carry an empty [`crate::ChunkRecord::value`]
    /// and are emitted exactly once each.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::ObjectStart | Self::ObjectEnd | Self::ArrayStart | Self::ArrayEnd
        )
    }
}
