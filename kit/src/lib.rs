#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Incremental JSON tokenizer that locates each emitted fragment by
//! JSONPath and RFC 6901 JSON Pointer.
//!
//! A source — a pull-stream, a server-sent-event handle, a bidirectional
//! socket, or any async sequence of text/byte chunks — is normalized by an
//! [`adapter`], lexed character-by-character by [`Lexer`], and decorated
//! with structural location by [`Locator`]. [`parse_stream`] wires the
//! three together into a single [`futures_core::Stream`] of
//! [`ChunkRecord`]s.
//!
//! The pipeline tolerates input split at any byte boundary — mid-keyword,
//! mid-number, mid-string, mid-escape, or mid-`\uXXXX` — without losing or
//! duplicating any source text.

pub mod adapter;
mod chunk;
mod error;
mod lexer;
mod locator;
mod options;
mod path;
mod stream;
mod token;

pub use chunk::ChunkRecord;
pub use error::{AdapterError, LexError, ParseError};
pub use lexer::Lexer;
pub use locator::Locator;
pub use options::ParserOptions;
pub use path::{to_json_path, to_json_pointer, PathSegment};
pub use stream::{parse_stream, ParseStream};
pub use token::TokenKind;
