//! The top-level entry point: ties an adapter, the lexer, and the locator
//! together into one asynchronous sequence of [`ChunkRecord`]s.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::chunk::ChunkRecord;
use crate::error::{AdapterError, ParseError};
use crate::locator::Locator;
use crate::options::ParserOptions;

/// Drives `source` through the lexer and locator, yielding located chunk
/// records in the exact order their tokens appear in the input.
///
/// The returned sequence is single-pass: once exhausted or rejected, it
/// yields no further items. Breaking out of iteration early should be
/// paired with calling `stop()` on the adapter that produced `source`
/// so the underlying connection is released.
pub fn parse_stream<S>(source: S, options: ParserOptions) -> ParseStream<S>
where
    S: Stream<Item = Result<String, AdapterError>> + Unpin,
{
    ParseStream {
        source,
        locator: Locator::with_options(&options),
        pending: VecDeque::new(),
        finished: false,
        source_exhausted: false,
    }
}

/// The [`Stream`] returned by [`parse_stream`].
pub struct ParseStream<S> {
    source: S,
    locator: Locator,
    pending: VecDeque<ChunkRecord>,
    finished: bool,
    source_exhausted: bool,
}

impl<S> Stream for ParseStream<S>
where
    S: Stream<Item = Result<String, AdapterError>> + Unpin,
{
    type Item = Result<ChunkRecord, ParseError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(record) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(record)));
            }
            if this.finished {
                return Poll::Ready(None);
            }
            if this.source_exhausted {
                let (records, err) = this.locator.finish();
                this.pending.extend(records);
                this.finished = true;
                if let Some(err) = err {
                    return Poll::Ready(Some(Err(err.into())));
                }
                continue;
            }

            match Pin::new(&mut this.source).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let (records, err) = this.locator.feed(&chunk);
                    this.pending.extend(records);
                    if let Some(err) = err {
                        this.finished = true;
                        return Poll::Ready(Some(Err(err.into())));
                    }
                }
                Poll::Ready(Some(Err(err))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(err.into())));
                }
                Poll::Ready(None) => {
                    this.source_exhausted = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use futures_util::{stream, StreamExt};

    fn ok_chunks(chunks: Vec<&str>) -> impl Stream<Item = Result<String, AdapterError>> + Unpin {
        stream::iter(chunks.into_iter().map(|c| Ok(c.to_owned())))
    }

    #[tokio::test]
    async fn parses_a_single_chunk_number() {
        let records: Vec<_> = parse_stream(ok_chunks(vec!["42"]), ParserOptions::default())
            .map(Result::unwrap)
            .collect()
            .await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value(), "42");
        assert_eq!(records[0].path(), "$");
    }

    #[tokio::test]
    async fn parses_across_multiple_chunks() {
        let records: Vec<_> = parse_stream(
            ok_chunks(vec!["{\"a\":", "[1,", "2]}"]),
            ParserOptions::default(),
        )
        .map(Result::unwrap)
        .collect()
        .await;
        let kinds: Vec<TokenKind> = records.iter().map(ChunkRecord::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::ObjectStart,
                TokenKind::Key,
                TokenKind::ArrayStart,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::ArrayEnd,
                TokenKind::ObjectEnd,
            ]
        );
    }

    #[tokio::test]
    async fn adapter_error_rejects_the_sequence() {
        let source = stream::iter(vec![Err(AdapterError::SocketError)]);
        let mut parsed = Box::pin(parse_stream(source, ParserOptions::default()));
        let err = parsed.next().await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "WebSocket error");
        assert!(parsed.next().await.is_none());
    }

    #[tokio::test]
    async fn lex_error_rejects_the_sequence() {
        let mut parsed = Box::pin(parse_stream(ok_chunks(vec!["nul1"]), ParserOptions::default()));
        assert!(parsed.next().await.unwrap().is_err());
        assert!(parsed.next().await.is_none());
    }
}
