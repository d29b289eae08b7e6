//! Error taxonomy for the lexer, locator, adapters, and the top-level
//! entry point. Messages that are part of the stable, user-visible surface
//! are reproduced verbatim in their `#[error(...)]` strings.

use thiserror::Error;

/// A lexical error: the character-driven state machine could not continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character was encountered that the current state does not accept.
    #[error("unexpected character {found:?} in state {state}")]
    UnexpectedChar {
        /// A short, human-readable name for the lexer state.
        state: &'static str,
        /// The offending character.
        found: char,
    },

    /// Input ended while inside a string, escape, unicode escape, partial
    /// keyword, or with a non-empty container stack.
    #[error("unexpected end of input in state {state}")]
    UnexpectedEnd {
        /// A short, human-readable name for the lexer state at end of input.
        state: &'static str,
    },

    /// `\` was followed by a character other than one of the recognized
    /// escape indicators, or a `\uXXXX` escape contained a non-hex digit.
    #[error("invalid escape sequence: {0:?}")]
    InvalidEscape(char),

    /// The characters scanned do not form a valid JSON number.
    #[error("invalid number literal: {0:?}")]
    InvalidNumber(String),

    /// Nesting exceeded the configured [`crate::ParserOptions::max_depth`].
    #[error("recursion limit exceeded: depth {depth} > limit {limit}")]
    TooDeep {
        /// Depth that would have been reached.
        depth: usize,
        /// Configured maximum.
        limit: usize,
    },
}

/// An error raised while adapting a raw source into a text-chunk sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// A chunk's runtime shape was neither a string nor a byte buffer.
    /// [`crate::adapter::RawChunk`] only has variants for those two shapes,
    /// so this is raised by a handle author who received something else
    /// from their underlying transport, before one is ever constructed.
    #[error("Unsupported chunk type for JSON stream")]
    UnsupportedChunkType,

    /// The pull-stream adapter's variant of [`Self::UnsupportedChunkType`],
    /// for a [`crate::adapter::PullStreamHandle`] author in the same
    /// situation.
    #[error("Unsupported chunk type")]
    UnsupportedPullStreamChunkType,

    /// An event-stream source signaled an error while not already closed.
    #[error("Server-side event error")]
    EventStreamError,

    /// A socket source signaled an error event.
    #[error("WebSocket error")]
    SocketError,

    /// A chunk of bytes was not valid UTF-8.
    #[error("invalid UTF-8 in chunk: {0}")]
    InvalidUtf8(String),
}

/// The error type surfaced to a consumer of [`crate::parse_stream`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source adapter failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// The lexer failed.
    #[error(transparent)]
    Lex(#[from] LexError),
}
