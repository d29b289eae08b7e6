use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use super::RawChunk;
use crate::error::AdapterError;

/// Readiness of an event-stream handle, mirroring a server-sent-event
/// source's `readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStreamStatus {
    /// Connecting or reconnecting.
    Connecting,
    /// Open and able to deliver messages.
    Open,
    /// Permanently closed.
    Closed,
}

/// A signal raised by an event-stream handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStreamSignal {
    /// One `message` event; its payload becomes one text chunk.
    Message(RawChunk),
    /// An `error` event.
    Error,
}

/// Capability required of a server-sent-event handle.
pub trait EventStreamHandle: Unpin {
    /// Polls for the next signal, `None` once the handle is exhausted.
    fn poll_event(&mut self, cx: &mut Context<'_>) -> Poll<Option<EventStreamSignal>>;

    /// Current readiness.
    fn status(&self) -> EventStreamStatus;

    /// Closes the source.
    fn close(&mut self);
}

/// Wraps a server-sent-event handle as a uniform text-chunk sequence.
pub struct EventStreamAdapter<H> {
    handle: H,
    stopped: bool,
}

impl<H: EventStreamHandle> EventStreamAdapter<H> {
    /// Wraps an already-connected event-stream handle.
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            stopped: false,
        }
    }

    /// Closes the source. Idempotent with respect to observable stream
    /// behaviour.
    pub fn stop(&mut self) {
        self.handle.close();
        self.stopped = true;
    }
}

impl<H: EventStreamHandle> Stream for EventStreamAdapter<H> {
    type Item = Result<String, AdapterError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.stopped {
            return Poll::Ready(None);
        }
        match this.handle.poll_event(cx) {
            Poll::Ready(Some(EventStreamSignal::Message(raw))) => {
                Poll::Ready(Some(raw.into_text()))
            }
            Poll::Ready(Some(EventStreamSignal::Error)) => {
                if this.handle.status() == EventStreamStatus::Closed {
                    Poll::Ready(None)
                } else {
                    Poll::Ready(Some(Err(AdapterError::EventStreamError)))
                }
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use std::collections::VecDeque;

    struct MockHandle {
        signals: VecDeque<EventStreamSignal>,
        status: EventStreamStatus,
        closed_calls: usize,
    }

    impl EventStreamHandle for MockHandle {
        fn poll_event(&mut self, _cx: &mut Context<'_>) -> Poll<Option<EventStreamSignal>> {
            Poll::Ready(self.signals.pop_front())
        }

        fn status(&self) -> EventStreamStatus {
            self.status
        }

        fn close(&mut self) {
            self.closed_calls += 1;
            self.status = EventStreamStatus::Closed;
        }
    }

    #[tokio::test]
    async fn error_while_closed_ends_sequence_normally() {
        let handle = MockHandle {
            signals: VecDeque::from([EventStreamSignal::Error]),
            status: EventStreamStatus::Closed,
            closed_calls: 0,
        };
        let mut adapter = EventStreamAdapter::new(handle);
        assert!(adapter.next().await.is_none());
    }

    #[tokio::test]
    async fn error_while_open_rejects_with_stable_message() {
        let handle = MockHandle {
            signals: VecDeque::from([EventStreamSignal::Error]),
            status: EventStreamStatus::Open,
            closed_calls: 0,
        };
        let mut adapter = EventStreamAdapter::new(handle);
        let err = adapter.next().await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Server-side event error");
    }

    #[tokio::test]
    async fn stop_closes_source_each_call() {
        let handle = MockHandle {
            signals: VecDeque::new(),
            status: EventStreamStatus::Open,
            closed_calls: 0,
        };
        let mut adapter = EventStreamAdapter::new(handle);
        adapter.stop();
        adapter.stop();
        assert_eq!(adapter.handle.closed_calls, 2);
    }
}
