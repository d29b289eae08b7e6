use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use super::RawChunk;
use crate::error::AdapterError;

/// Capability required of a pull-stream handle: yields chunks on demand
/// and signals completion or error, and can release its reader on demand.
///
/// Implemented by callers against their actual transport; this crate never
/// opens one.
pub trait PullStreamHandle: Unpin {
    /// Polls for the next chunk, `None` on natural end. A transport that
    /// hands back a payload that is neither text nor bytes should return
    /// `Err(AdapterError::UnsupportedPullStreamChunkType)` rather than
    /// constructing a [`RawChunk`].
    fn poll_next_chunk(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<RawChunk, AdapterError>>>;

    /// Releases the reader and cancels the upstream source.
    fn release(&mut self);
}

/// Wraps a readable pull-stream handle as a uniform text-chunk sequence.
pub struct PullStreamAdapter<H> {
    handle: H,
    stopped: bool,
}

impl<H: PullStreamHandle> PullStreamAdapter<H> {
    /// Wraps an already-connected pull-stream handle.
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            stopped: false,
        }
    }

    /// Releases the reader and cancels the upstream source. Idempotent
    /// with respect to observable stream behaviour.
    pub fn stop(&mut self) {
        self.handle.release();
        self.stopped = true;
    }
}

impl<H: PullStreamHandle> Stream for PullStreamAdapter<H> {
    type Item = Result<String, AdapterError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.stopped {
            return Poll::Ready(None);
        }
        match this.handle.poll_next_chunk(cx) {
            Poll::Ready(Some(Ok(raw))) => Poll::Ready(Some(raw.into_text())),
            Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(e))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
