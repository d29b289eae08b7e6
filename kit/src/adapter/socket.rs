use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::error::AdapterError;

/// A message payload delivered by a socket handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketMessage {
    /// A text frame.
    Text(String),
    /// A binary frame, decoded as UTF-8.
    Bytes(Vec<u8>),
}

/// A signal raised by a bidirectional message socket handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketSignal {
    /// One inbound message.
    Message(SocketMessage),
    /// The socket closed, regardless of status code.
    Close,
    /// An `onerror` event.
    Error,
}

/// Capability required of a bidirectional message socket handle.
pub trait SocketHandle: Unpin {
    /// Polls for the next signal.
    fn poll_signal(&mut self, cx: &mut Context<'_>) -> Poll<Option<SocketSignal>>;

    /// Closes the socket.
    fn close(&mut self);
}

/// Wraps a bidirectional message socket handle as a uniform text-chunk
/// sequence.
pub struct SocketAdapter<H> {
    handle: H,
    stopped: bool,
}

impl<H: SocketHandle> SocketAdapter<H> {
    /// Wraps an already-connected socket handle.
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            stopped: false,
        }
    }

    /// Closes the socket. Idempotent with respect to observable stream
    /// behaviour.
    pub fn stop(&mut self) {
        self.handle.close();
        self.stopped = true;
    }
}

impl<H: SocketHandle> Stream for SocketAdapter<H> {
    type Item = Result<String, AdapterError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.stopped {
            return Poll::Ready(None);
        }
        match this.handle.poll_signal(cx) {
            Poll::Ready(Some(SocketSignal::Message(SocketMessage::Text(s)))) => {
                Poll::Ready(Some(Ok(s)))
            }
            Poll::Ready(Some(SocketSignal::Message(SocketMessage::Bytes(b)))) => {
                Poll::Ready(Some(
                    String::from_utf8(b).map_err(|e| AdapterError::InvalidUtf8(e.to_string())),
                ))
            }
            Poll::Ready(Some(SocketSignal::Close)) => Poll::Ready(None),
            Poll::Ready(Some(SocketSignal::Error)) => {
                Poll::Ready(Some(Err(AdapterError::SocketError)))
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
        signals: VecDeque<SocketSignal>,
        closed_calls: usize,
    }

    impl SocketHandle for MockHandle {
        fn poll_signal(&mut self, _cx: &mut Context<'_>) -> Poll<Option<SocketSignal>> {
            Poll::Ready(self.signals.pop_front())
        }

        fn close(&mut self) {
            self.closed_calls += 1;
        }
    }

    #[tokio::test]
    async fn three_messages_then_close() {
        let handle = MockHandle {
            signals: VecDeque::from([
                SocketSignal::Message(SocketMessage::Text("a".into())),
                SocketSignal::Message(SocketMessage::Text("b".into())),
                SocketSignal::Message(SocketMessage::Text("c".into())),
                SocketSignal::Close,
            ]),
            closed_calls: 0,
        };
        let mut adapter = SocketAdapter::new(handle);
        let mut received = Vec::new();
        while let Some(item) = adapter.next().await {
            received.push(item.unwrap());
        }
        assert_eq!(received, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn error_event_rejects_with_stable_message() {
        let handle = MockHandle {
            signals: VecDeque::from([SocketSignal::Error]),
            closed_calls: 0,
        };
        let mut adapter = SocketAdapter::new(handle);
        let err = adapter.next().await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "WebSocket error");
    }

    #[tokio::test]
    async fn stop_called_twice_closes_twice() {
        let handle = MockHandle {
            signals: VecDeque::new(),
            closed_calls: 0,
        };
        let mut adapter = SocketAdapter::new(handle);
        adapter.stop();
        adapter.stop();
        assert_eq!(adapter.handle.closed_calls, 2);
    }
}
