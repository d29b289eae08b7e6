use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use super::{
    AsyncSequenceAdapter, EventStreamAdapter, EventStreamHandle, PullStreamAdapter,
    PullStreamHandle, RawChunk, SocketAdapter, SocketHandle,
};
use crate::error::AdapterError;

/// A source in one of the four supported shapes, already connected.
///
/// A dynamically typed source would pick its adapter with a runtime
/// capability probe ordered pull-stream, event-stream, socket,
/// async-iteration. Here the caller's type already picks the variant;
/// `Source` and [`Factory::create`] keep the factory as a single named
/// entry point while the dispatch itself becomes a match rather than
/// duck-typing.
pub enum Source<P, E, So, A> {
    /// A readable pull-stream handle.
    PullStream(P),
    /// A server-sent-event handle.
    EventStream(E),
    /// A bidirectional message socket handle.
    Socket(So),
    /// Any async-iteration sequence of [`RawChunk`].
    AsyncSequence(A),
}

/// The adapter produced by [`Factory::create`], dispatching to whichever
/// concrete adapter matches the [`Source`] variant it was built from.
pub enum AnyAdapter<P, E, So, A> {
    /// See [`PullStreamAdapter`].
    PullStream(PullStreamAdapter<P>),
    /// See [`EventStreamAdapter`].
    EventStream(EventStreamAdapter<E>),
    /// See [`SocketAdapter`].
    Socket(SocketAdapter<So>),
    /// See [`AsyncSequenceAdapter`].
    AsyncSequence(AsyncSequenceAdapter<A>),
}

impl<P, E, So, A> AnyAdapter<P, E, So, A>
where
    P: PullStreamHandle,
    E: EventStreamHandle,
    So: SocketHandle,
    A: Stream<Item = RawChunk> + Unpin,
{
    /// Stops whichever concrete adapter this is, per its own `stop()`
    /// semantics.
    pub fn stop(&mut self) {
        match self {
            Self::PullStream(a) => a.stop(),
            Self::EventStream(a) => a.stop(),
            Self::Socket(a) => a.stop(),
            Self::AsyncSequence(a) => a.stop(),
        }
    }
}

impl<P, E, So, A> Stream for AnyAdapter<P, E, So, A>
where
    P: PullStreamHandle,
    E: EventStreamHandle,
    So: SocketHandle,
    A: Stream<Item = RawChunk> + Unpin,
{
    type Item = Result<String, AdapterError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.get_mut() {
            Self::PullStream(a) => Pin::new(a).poll_next(cx),
            Self::EventStream(a) => Pin::new(a).poll_next(cx),
            Self::Socket(a) => Pin::new(a).poll_next(cx),
            Self::AsyncSequence(a) => Pin::new(a).poll_next(cx),
        }
    }
}

/// Builds the adapter matching a [`Source`]'s capability.
pub struct Factory;

impl Factory {
    /// Returns the adapter for `source`, dispatching on the capability
    /// order (pull-stream, event-stream, socket, async-iteration) encoded
    /// as the `Source` variant rather than a runtime probe.
    pub fn create<P, E, So, A>(source: Source<P, E, So, A>) -> AnyAdapter<P, E, So, A>
    where
        P: PullStreamHandle,
        E: EventStreamHandle,
        So: SocketHandle,
        A: Stream<Item = RawChunk> + Unpin,
    {
        match source {
            Source::PullStream(h) => AnyAdapter::PullStream(PullStreamAdapter::new(h)),
            Source::EventStream(h) => AnyAdapter::EventStream(EventStreamAdapter::new(h)),
            Source::Socket(h) => AnyAdapter::Socket(SocketAdapter::new(h)),
            Source::AsyncSequence(s) => AnyAdapter::AsyncSequence(AsyncSequenceAdapter::new(s)),
        }
    }
}
