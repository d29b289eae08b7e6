use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use super::RawChunk;
use crate::error::AdapterError;

/// Wraps any object implementing the async-iteration protocol — here,
/// any [`Stream`] of [`RawChunk`] — as a uniform text-chunk sequence.
/// Items are validated and normalized identically to the other adapters.
pub struct AsyncSequenceAdapter<S> {
    inner: S,
    stopped: bool,
}

impl<S> AsyncSequenceAdapter<S>
where
    S: Stream<Item = RawChunk> + Unpin,
{
    /// Wraps an already-connected async sequence.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            stopped: false,
        }
    }

    /// Causes the next iteration step to return the terminal signal.
    pub fn stop(&mut self) {
        self.stopped = true;
    }
}

impl<S> Stream for AsyncSequenceAdapter<S>
where
    S: Stream<Item = RawChunk> + Unpin,
{
    type Item = Result<String, AdapterError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.stopped {
            return Poll::Ready(None);
        }
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(raw)) => Poll::Ready(Some(raw.into_text())),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{stream, StreamExt};

    #[tokio::test]
    async fn passes_through_decoded_chunks() {
        let inner = stream::iter(vec![
            RawChunk::Text("a".into()),
            RawChunk::Bytes(vec![98]),
        ]);
        let mut adapter = AsyncSequenceAdapter::new(inner);
        assert_eq!(adapter.next().await.unwrap().unwrap(), "a");
        assert_eq!(adapter.next().await.unwrap().unwrap(), "b");
        assert!(adapter.next().await.is_none());
    }

    #[tokio::test]
    async fn stop_ends_iteration_immediately() {
        let inner = stream::iter(vec![RawChunk::Text("a".into())]);
        let mut adapter = AsyncSequenceAdapter::new(inner);
        adapter.stop();
        assert!(adapter.next().await.is_none());
    }
}
