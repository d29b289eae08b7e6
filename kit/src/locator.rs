//! Wraps the lexer and attaches structural location to its output.

use std::sync::Arc;

use crate::chunk::ChunkRecord;
use crate::error::LexError;
use crate::lexer::{LexEvent, Lexer};
use crate::options::ParserOptions;
use crate::path::PathSegment;
use crate::token::TokenKind;

#[derive(Debug, Clone)]
struct ObjectFrame {
    /// Key text accumulated across one or more `Key` fragments, finalized
    /// on the fragment with `done = true`.
    pending_key: Option<String>,
    /// `true` while `current_segments` includes this frame's fixed key,
    /// i.e. while the value for that key is being emitted.
    key_active: bool,
}

#[derive(Debug, Clone)]
struct ArrayFrame {
    next_index: usize,
    /// `true` while `current_segments` includes this frame's current index.
    index_active: bool,
}

#[derive(Debug, Clone)]
enum ContainerFrame {
    Object(ObjectFrame),
    Array(ArrayFrame),
}

/// Maintains the container stack and decorates lexer output with path
/// segments, producing [`ChunkRecord`]s.
#[derive(Debug)]
pub struct Locator {
    lexer: Lexer,
    stack: Vec<ContainerFrame>,
    segments: Vec<PathSegment>,
    segments_arc: Arc<[PathSegment]>,
}

impl Default for Locator {
    fn default() -> Self {
        Self::new()
    }
}

impl Locator {
    /// A locator with default parser options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(&ParserOptions::default())
    }

    /// A locator honoring the given [`ParserOptions`].
    #[must_use]
    pub fn with_options(options: &ParserOptions) -> Self {
        Self {
            lexer: Lexer::with_options(options),
            stack: Vec::new(),
            segments: Vec::new(),
            segments_arc: Arc::from([]),
        }
    }

    /// Feeds one chunk of text, returning the [`ChunkRecord`]s it produced.
    ///
    /// Records produced before a lex error remain in the returned `Vec`
    /// even when this call also returns `Err`.
    pub fn feed(&mut self, chunk: &str) -> (Vec<ChunkRecord>, Option<LexError>) {
        let mut events = Vec::new();
        let err = self.lexer.feed(chunk, &mut events).err();
        let records = self.locate(events);
        (records, err)
    }

    /// Signals end of input, returning any final [`ChunkRecord`]s (a
    /// trailing number fragment) and an error if the end state is invalid.
    pub fn finish(&mut self) -> (Vec<ChunkRecord>, Option<LexError>) {
        let mut events = Vec::new();
        let err = self.lexer.finish(&mut events).err();
        let records = self.locate(events);
        (records, err)
    }

    fn current_segments(&self) -> Arc<[PathSegment]> {
        Arc::clone(&self.segments_arc)
    }

    fn rebuild_arc(&mut self) {
        self.segments_arc = Arc::from(self.segments.as_slice());
    }

    fn locate(&mut self, events: Vec<LexEvent>) -> Vec<ChunkRecord> {
        let mut records = Vec::with_capacity(events.len());
        for event in events {
            self.locate_one(event, &mut records);
        }
        records
    }

    fn locate_one(&mut self, event: LexEvent, records: &mut Vec<ChunkRecord>) {
        if event.kind == TokenKind::Key {
            let segments = self.current_segments();
            records.push(ChunkRecord::new(event.text.clone(), TokenKind::Key, segments));
            if let Some(ContainerFrame::Object(frame)) = self.stack.last_mut() {
                match &mut frame.pending_key {
                    Some(buf) => buf.push_str(&event.text),
                    None => frame.pending_key = Some(event.text),
                }
            }
            return;
        }

        match event.kind {
            TokenKind::ObjectStart => {
                self.activate_pending_slot();
                let segments = self.current_segments();
                records.push(ChunkRecord::new("", TokenKind::ObjectStart, segments));
                self.stack.push(ContainerFrame::Object(ObjectFrame {
                    pending_key: None,
                    key_active: false,
                }));
            }
            TokenKind::ArrayStart => {
                self.activate_pending_slot();
                let segments = self.current_segments();
                records.push(ChunkRecord::new("", TokenKind::ArrayStart, segments));
                self.stack.push(ContainerFrame::Array(ArrayFrame {
                    next_index: 0,
                    index_active: false,
                }));
            }
            TokenKind::ObjectEnd => {
                let segments = self.current_segments();
                records.push(ChunkRecord::new("", TokenKind::ObjectEnd, segments));
                self.stack.pop();
                self.complete_active_slot();
            }
            TokenKind::ArrayEnd => {
                let segments = self.current_segments();
                records.push(ChunkRecord::new("", TokenKind::ArrayEnd, segments));
                self.stack.pop();
                self.complete_active_slot();
            }
            TokenKind::String | TokenKind::Number | TokenKind::Boolean | TokenKind::Null => {
                self.activate_pending_slot();
                let segments = self.current_segments();
                records.push(ChunkRecord::new(event.text, event.kind, segments));
                if event.done {
                    self.complete_active_slot();
                }
            }
            TokenKind::Key => {}
        }
    }

    /// If the top frame has a finalized key or a fresh array slot not yet
    /// reflected in `current_segments`, extends `current_segments` by it.
    fn activate_pending_slot(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        match frame {
            ContainerFrame::Object(obj) => {
                if obj.key_active {
                    return;
                }
                if let Some(key) = obj.pending_key.take() {
                    obj.key_active = true;
                    self.segments.push(PathSegment::Key(key));
                    self.rebuild_arc();
                }
            }
            ContainerFrame::Array(arr) => {
                if arr.index_active {
                    return;
                }
                arr.index_active = true;
                self.segments.push(PathSegment::Index(arr.next_index));
                self.rebuild_arc();
            }
        }
    }

    /// Called when the value active in the (possibly now-popped) top frame
    /// completes: retracts its path extension and advances bookkeeping.
    fn complete_active_slot(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        match frame {
            ContainerFrame::Object(obj) => {
                if obj.key_active {
                    obj.key_active = false;
                    self.segments.pop();
                    self.rebuild_arc();
                }
            }
            ContainerFrame::Array(arr) => {
                if arr.index_active {
                    arr.index_active = false;
                    arr.next_index += 1;
                    self.segments.pop();
                    self.rebuild_arc();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate_all(source: &str) -> Vec<ChunkRecord> {
        let mut locator = Locator::new();
        let (mut records, err) = locator.feed(source);
        assert!(err.is_none());
        let (tail, err) = locator.finish();
        assert!(err.is_none());
        records.extend(tail);
        records
    }

    #[test]
    fn root_number_has_empty_segments() {
        let records = locate_all("42");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value(), "42");
        assert!(records[0].segments().is_empty());
        assert_eq!(records[0].path(), "$");
        assert_eq!(records[0].pointer(), "/");
    }

    #[test]
    fn object_with_mixed_values_locates_each_token() {
        let records = locate_all(r#"{"a":1,"b":[true,null]}"#);
        let summary: Vec<(TokenKind, String, String)> = records
            .iter()
            .map(|r| (r.kind(), r.value().to_owned(), r.path()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TokenKind::ObjectStart, String::new(), "$".into()),
                (TokenKind::Key, "a".into(), "$".into()),
                (TokenKind::Number, "1".into(), "$.a".into()),
                (TokenKind::Key, "b".into(), "$".into()),
                (TokenKind::ArrayStart, String::new(), "$.b".into()),
                (TokenKind::Boolean, "true".into(), "$.b[0]".into()),
                (TokenKind::Null, "null".into(), "$.b[1]".into()),
                (TokenKind::ArrayEnd, String::new(), "$.b".into()),
                (TokenKind::ObjectEnd, String::new(), "$".into()),
            ]
        );
    }

    #[test]
    fn nested_path_for_deeply_nested_string() {
        let records = locate_all(r#"{"a":[0,{"b":"v"}]}"#);
        let value_record = records
            .iter()
            .find(|r| r.kind() == TokenKind::String && r.value() == "v")
            .unwrap();
        assert_eq!(value_record.path(), "$.a[1].b");
        assert_eq!(value_record.pointer(), "/a/1/b");
    }

    #[test]
    fn container_end_records_do_not_inherit_a_phantom_slot() {
        let records = locate_all(r#"{"a":1,"b":[true,null]}"#);
        let array_end = records
            .iter()
            .find(|r| r.kind() == TokenKind::ArrayEnd)
            .unwrap();
        assert_eq!(array_end.path(), "$.b");
        let object_end = records
            .iter()
            .find(|r| r.kind() == TokenKind::ObjectEnd)
            .unwrap();
        assert_eq!(object_end.path(), "$");
    }

    #[test]
    fn bare_string_across_chunks_has_one_token() {
        let mut locator = Locator::new();
        let mut records = Vec::new();
        for chunk in ["\"he", "l", "lo\""] {
            let (chunk_records, err) = locator.feed(chunk);
            assert!(err.is_none());
            records.extend(chunk_records);
        }
        let (tail, err) = locator.finish();
        assert!(err.is_none());
        records.extend(tail);

        let text: String = records
            .iter()
            .filter(|r| r.kind() == TokenKind::String)
            .map(ChunkRecord::value)
            .collect();
        assert_eq!(text, "hello");
        assert!(records.iter().all(|r| r.segments().is_empty()));
    }
}
