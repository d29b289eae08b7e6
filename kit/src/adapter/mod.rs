//! Source adapters: normalize four heterogeneous input shapes (pull
//! streams, server-sent events, sockets, async sequences) into one
//! uniform asynchronous sequence of UTF-8 text chunks.
//!
//! Each adapter wraps an already-connected handle — opening a transport is
//! explicitly out of scope — and exposes the same two-part surface: it is
//! a [`futures_core::Stream`] of decoded text chunks, and it offers
//! [`stop`](PullStreamAdapter::stop)-style cancellation that releases the
//! underlying source.

mod async_sequence;
mod event_stream;
mod factory;
mod pull_stream;
mod socket;

pub use async_sequence::AsyncSequenceAdapter;
pub use event_stream::{EventStreamAdapter, EventStreamHandle, EventStreamSignal, EventStreamStatus};
pub use factory::{Factory, Source};
pub use pull_stream::{PullStreamAdapter, PullStreamHandle};
pub use socket::{SocketAdapter, SocketHandle, SocketMessage, SocketSignal};

use crate::error::AdapterError;

/// A raw chunk item as accepted at the adapter boundary.
///
/// Callers hand adapters either already-decoded text or a raw byte buffer;
/// byte buffers are UTF-8 decoded on the way through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawChunk {
    /// Already-decoded text.
    Text(String),
    /// Raw bytes, decoded as UTF-8.
    Bytes(Vec<u8>),
}

impl RawChunk {
    /// Normalizes to owned text, UTF-8-decoding byte payloads.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidUtf8`] if a byte payload is not
    /// valid UTF-8.
    pub fn into_text(self) -> Result<String, AdapterError> {
        match self {
            Self::Text(s) => Ok(s),
            Self::Bytes(b) => {
                String::from_utf8(b).map_err(|e| AdapterError::InvalidUtf8(e.to_string()))
            }
        }
    }
}

impl From<String> for RawChunk {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for RawChunk {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for RawChunk {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}
