//! The chunk-boundary-safe JSON lexer.
//!
//! [`Lexer`] is a character-driven state machine: [`Lexer::feed`] accepts an
//! arbitrarily sized slice of the input and may be called any number of
//! times with any split of the source text, including splits that land
//! inside a keyword, a number, a string, an escape, or a `\uXXXX` sequence.
//! [`Lexer::finish`] signals end of input.
//!
//! The lexer does not know about JSON paths; it only tracks enough of the
//! container nesting (via [`Frame`]) to tell whether a closing quote
//! terminates an object key or a string value. Attaching structural
//! location to fragments is [`crate::locator::Locator`]'s job.

use streamjson_core::RecursionGuard;

use crate::error::LexError;
use crate::options::ParserOptions;
use crate::token::TokenKind;

/// One lexer output event: a fragment of a token, or (for the four
/// structural kinds) the single event for that token.
///
/// `done` is `true` on the fragment that completes its token: always for
/// structural and keyword tokens, and for the final fragment of a string
/// or number. It is private to the crate — the public [`crate::ChunkRecord`]
/// surface has no such flag, since consumers only need fragment
/// concatenation, not fragment-boundary semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LexEvent {
    pub(crate) kind: TokenKind,
    pub(crate) text: String,
    pub(crate) done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringRole {
    Key,
    Value,
}

impl StringRole {
    const fn token_kind(self) -> TokenKind {
        match self {
            Self::Key => TokenKind::Key,
            Self::Value => TokenKind::String,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeywordKind {
    True,
    False,
    Null,
}

impl KeywordKind {
    const fn literal(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
        }
    }

    const fn token_kind(self) -> TokenKind {
        match self {
            Self::True | Self::False => TokenKind::Boolean,
            Self::Null => TokenKind::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberPhase {
    /// Just consumed a leading `-`; a digit must follow.
    Start,
    /// Consumed the single digit `0`; no further integer digits allowed.
    IntZero,
    /// Consumed one or more digits of a non-zero integer part.
    IntDigits,
    /// Just consumed `.`; a digit must follow.
    FracDot,
    /// Consumed one or more fractional digits.
    FracDigits,
    /// Just consumed `e`/`E`; a sign or digit must follow.
    ExpStart,
    /// Just consumed the exponent's sign; a digit must follow.
    ExpSign,
    /// Consumed one or more exponent digits.
    ExpDigits,
}

fn number_extends(phase: NumberPhase, c: char) -> bool {
    match phase {
        NumberPhase::Start | NumberPhase::FracDot | NumberPhase::ExpSign => c.is_ascii_digit(),
        NumberPhase::IntZero => matches!(c, '.' | 'e' | 'E'),
        NumberPhase::IntDigits | NumberPhase::FracDigits => {
            c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E')
        }
        NumberPhase::ExpStart => c.is_ascii_digit() || matches!(c, '+' | '-'),
        NumberPhase::ExpDigits => c.is_ascii_digit(),
    }
}

fn advance_number_phase(phase: NumberPhase, c: char) -> NumberPhase {
    match (phase, c) {
        (NumberPhase::Start, '0') => NumberPhase::IntZero,
        (NumberPhase::Start, _) => NumberPhase::IntDigits,
        (NumberPhase::IntZero | NumberPhase::IntDigits | NumberPhase::FracDigits, '.') => {
            NumberPhase::FracDot
        }
        (
            NumberPhase::IntZero | NumberPhase::IntDigits | NumberPhase::FracDigits,
            'e' | 'E',
        ) => NumberPhase::ExpStart,
        (NumberPhase::IntDigits, d) if d.is_ascii_digit() => NumberPhase::IntDigits,
        (NumberPhase::FracDot, _) => NumberPhase::FracDigits,
        (NumberPhase::FracDigits, d) if d.is_ascii_digit() => NumberPhase::FracDigits,
        (NumberPhase::ExpStart, '+' | '-') => NumberPhase::ExpSign,
        (NumberPhase::ExpStart | NumberPhase::ExpSign | NumberPhase::ExpDigits, _) => {
            NumberPhase::ExpDigits
        }
    }
}

const fn is_number_terminal(phase: NumberPhase) -> bool {
    matches!(
        phase,
        NumberPhase::IntZero | NumberPhase::IntDigits | NumberPhase::FracDigits | NumberPhase::ExpDigits
    )
}

fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjPhase {
    AwaitKeyOrEnd,
    AwaitColon,
    AwaitValue,
    AwaitCommaOrEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrPhase {
    AwaitValueOrEnd,
    AwaitCommaOrEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object(ObjPhase),
    Array(ArrPhase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootPhase {
    BeforeValue,
    AfterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Ready,
    InString { role: StringRole },
    InStringEscape { role: StringRole },
    InStringUnicode { role: StringRole, digits: u8 },
    InNumber { phase: NumberPhase },
    InKeyword { kind: KeywordKind, matched: u8 },
}

/// The chunk-boundary-safe lexer. See the module docs for the contract.
#[derive(Debug, Clone)]
pub struct Lexer {
    mode: Mode,
    stack: Vec<Frame>,
    root_phase: RootPhase,
    pending: String,
    guard: RecursionGuard,
    max_depth: usize,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    /// A lexer with default options (no recursion limit).
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(&ParserOptions::default())
    }

    /// A lexer honoring the given [`ParserOptions`].
    #[must_use]
    pub fn with_options(options: &ParserOptions) -> Self {
        Self {
            mode: Mode::Ready,
            stack: Vec::new(),
            root_phase: RootPhase::BeforeValue,
            pending: String::new(),
            guard: RecursionGuard::new(),
            max_depth: options.as_parse_config().max_recursion_depth,
        }
    }

    /// Current container nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Feeds one chunk of text, appending produced events to `out`.
    ///
    /// An empty chunk is a legal no-op. On error, whatever was pushed to
    /// `out` before the failing character remains valid.
    pub(crate) fn feed(&mut self, chunk: &str, out: &mut Vec<LexEvent>) -> Result<(), LexError> {
        let mut chars = chunk.chars().peekable();
        loop {
            match self.mode {
                Mode::InNumber { phase } => match chars.peek().copied() {
                    Some(c) if number_extends(phase, c) => {
                        chars.next();
                        self.pending.push(c);
                        self.mode = Mode::InNumber {
                            phase: advance_number_phase(phase, c),
                        };
                    }
                    Some(_) => self.finish_number(out)?,
                    None => {
                        self.flush_pending(TokenKind::Number, out);
                        return Ok(());
                    }
                },
                Mode::InKeyword { kind, matched } => match chars.next() {
                    Some(c) => self.step_keyword(kind, matched, c, out)?,
                    None => return Ok(()),
                },
                Mode::InString { role } => match chars.next() {
                    Some('"') => self.close_string(role, out),
                    Some('\\') => {
                        self.pending.push('\\');
                        self.mode = Mode::InStringEscape { role };
                    }
                    Some(c) => self.pending.push(c),
                    None => {
                        self.flush_pending(role.token_kind(), out);
                        return Ok(());
                    }
                },
                Mode::InStringEscape { role } => match chars.next() {
                    Some(c) => self.step_escape(role, c, out)?,
                    None => {
                        self.flush_pending(role.token_kind(), out);
                        return Ok(());
                    }
                },
                Mode::InStringUnicode { role, digits } => match chars.next() {
                    Some(c) if c.is_ascii_hexdigit() => {
                        self.pending.push(c);
                        let digits = digits + 1;
                        if digits == 4 {
                            out.push(LexEvent {
                                kind: role.token_kind(),
                                text: std::mem::take(&mut self.pending),
                                done: false,
                            });
                            self.mode = Mode::InString { role };
                        } else {
                            self.mode = Mode::InStringUnicode { role, digits };
                        }
                    }
                    Some(c) => return Err(LexError::InvalidEscape(c)),
                    None => {
                        self.flush_pending(role.token_kind(), out);
                        return Ok(());
                    }
                },
                Mode::Ready => match chars.peek().copied() {
                    None => return Ok(()),
                    Some(c) if is_json_whitespace(c) => {
                        chars.next();
                    }
                    Some(c) => {
                        chars.next();
                        self.handle_ready_char(c, out)?;
                    }
                },
            }
        }
    }

    /// Signals end of input. Flushes a trailing number if one is pending
    /// and validates that the lexer is in an end-legal state.
    pub(crate) fn finish(&mut self, out: &mut Vec<LexEvent>) -> Result<(), LexError> {
        match self.mode {
            Mode::InNumber { .. } => self.finish_number(out)?,
            Mode::Ready => {}
            Mode::InString { .. } => return Err(LexError::UnexpectedEnd { state: "string" }),
            Mode::InStringEscape { .. } => {
                return Err(LexError::UnexpectedEnd {
                    state: "string-escape",
                })
            }
            Mode::InStringUnicode { .. } => {
                return Err(LexError::UnexpectedEnd {
                    state: "string-unicode-escape",
                })
            }
            Mode::InKeyword { .. } => return Err(LexError::UnexpectedEnd { state: "keyword" }),
        }
        if !self.stack.is_empty() {
            return Err(LexError::UnexpectedEnd { state: "container" });
        }
        if self.root_phase == RootPhase::BeforeValue {
            return Err(LexError::UnexpectedEnd { state: "top-level" });
        }
        Ok(())
    }

    fn flush_pending(&mut self, kind: TokenKind, out: &mut Vec<LexEvent>) {
        if !self.pending.is_empty() {
            out.push(LexEvent {
                kind,
                text: std::mem::take(&mut self.pending),
                done: false,
            });
        }
    }

    fn close_string(&mut self, role: StringRole, out: &mut Vec<LexEvent>) {
        out.push(LexEvent {
            kind: role.token_kind(),
            text: std::mem::take(&mut self.pending),
            done: true,
        });
        self.mode = Mode::Ready;
        match role {
            StringRole::Key => {
                if let Some(Frame::Object(phase)) = self.stack.last_mut() {
                    *phase = ObjPhase::AwaitColon;
                }
            }
            StringRole::Value => self.complete_value(),
        }
    }

    fn step_escape(
        &mut self,
        role: StringRole,
        c: char,
        out: &mut Vec<LexEvent>,
    ) -> Result<(), LexError> {
        self.pending.push(c);
        match c {
            '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => {
                out.push(LexEvent {
                    kind: role.token_kind(),
                    text: std::mem::take(&mut self.pending),
                    done: false,
                });
                self.mode = Mode::InString { role };
            }
            'u' => self.mode = Mode::InStringUnicode { role, digits: 0 },
            other => return Err(LexError::InvalidEscape(other)),
        }
        Ok(())
    }

    fn step_keyword(
        &mut self,
        kind: KeywordKind,
        matched: u8,
        c: char,
        out: &mut Vec<LexEvent>,
    ) -> Result<(), LexError> {
        let literal = kind.literal();
        let expected = literal.as_bytes()[matched as usize] as char;
        if c != expected {
            return Err(LexError::UnexpectedChar {
                state: "keyword",
                found: c,
            });
        }
        let matched = matched + 1;
        if matched as usize == literal.len() {
            out.push(LexEvent {
                kind: kind.token_kind(),
                text: literal.to_owned(),
                done: true,
            });
            self.mode = Mode::Ready;
            self.complete_value();
        } else {
            self.mode = Mode::InKeyword { kind, matched };
        }
        Ok(())
    }

    fn finish_number(&mut self, out: &mut Vec<LexEvent>) -> Result<(), LexError> {
        let Mode::InNumber { phase } = self.mode else {
            return Ok(());
        };
        if !is_number_terminal(phase) {
            return Err(LexError::InvalidNumber(std::mem::take(&mut self.pending)));
        }
        out.push(LexEvent {
            kind: TokenKind::Number,
            text: std::mem::take(&mut self.pending),
            done: true,
        });
        self.mode = Mode::Ready;
        self.complete_value();
        Ok(())
    }

    /// Marks the value currently active in the innermost frame (or at the
    /// root) as complete, advancing that frame's phase.
    fn complete_value(&mut self) {
        match self.stack.last_mut() {
            None => self.root_phase = RootPhase::AfterValue,
            Some(Frame::Object(phase)) => *phase = ObjPhase::AwaitCommaOrEnd,
            Some(Frame::Array(phase)) => *phase = ArrPhase::AwaitCommaOrEnd,
        }
    }

    fn enter_container(&mut self) -> Result<(), LexError> {
        self.guard.enter(self.max_depth).map_err(|_| LexError::TooDeep {
            depth: self.guard.depth(),
            limit: self.max_depth,
        })
    }

    fn open_object(&mut self, out: &mut Vec<LexEvent>) -> Result<(), LexError> {
        self.enter_container()?;
        out.push(LexEvent {
            kind: TokenKind::ObjectStart,
            text: String::new(),
            done: true,
        });
        self.stack.push(Frame::Object(ObjPhase::AwaitKeyOrEnd));
        Ok(())
    }

    fn open_array(&mut self, out: &mut Vec<LexEvent>) -> Result<(), LexError> {
        self.enter_container()?;
        out.push(LexEvent {
            kind: TokenKind::ArrayStart,
            text: String::new(),
            done: true,
        });
        self.stack.push(Frame::Array(ArrPhase::AwaitValueOrEnd));
        Ok(())
    }

    fn close_object(&mut self, out: &mut Vec<LexEvent>) {
        self.stack.pop();
        self.guard.exit();
        out.push(LexEvent {
            kind: TokenKind::ObjectEnd,
            text: String::new(),
            done: true,
        });
        self.complete_value();
    }

    fn close_array(&mut self, out: &mut Vec<LexEvent>) {
        self.stack.pop();
        self.guard.exit();
        out.push(LexEvent {
            kind: TokenKind::ArrayEnd,
            text: String::new(),
            done: true,
        });
        self.complete_value();
    }

    fn start_value(&mut self, c: char, out: &mut Vec<LexEvent>) -> Result<(), LexError> {
        match c {
            '"' => self.mode = Mode::InString { role: StringRole::Value },
            '{' => self.open_object(out)?,
            '[' => self.open_array(out)?,
            '-' => {
                self.pending.push('-');
                self.mode = Mode::InNumber { phase: NumberPhase::Start };
            }
            '0' => {
                self.pending.push('0');
                self.mode = Mode::InNumber { phase: NumberPhase::IntZero };
            }
            '1'..='9' => {
                self.pending.push(c);
                self.mode = Mode::InNumber { phase: NumberPhase::IntDigits };
            }
            't' => self.mode = Mode::InKeyword { kind: KeywordKind::True, matched: 1 },
            'f' => self.mode = Mode::InKeyword { kind: KeywordKind::False, matched: 1 },
            'n' => self.mode = Mode::InKeyword { kind: KeywordKind::Null, matched: 1 },
            _ => return Err(LexError::UnexpectedChar { state: "value", found: c }),
        }
        Ok(())
    }

    fn handle_ready_char(&mut self, c: char, out: &mut Vec<LexEvent>) -> Result<(), LexError> {
        match self.stack.last().copied() {
            None => {
                if self.root_phase == RootPhase::AfterValue {
                    return Err(LexError::UnexpectedChar { state: "top-level", found: c });
                }
                self.start_value(c, out)
            }
            Some(Frame::Object(ObjPhase::AwaitKeyOrEnd)) => match c {
                '"' => {
                    self.mode = Mode::InString { role: StringRole::Key };
                    Ok(())
                }
                '}' => {
                    self.close_object(out);
                    Ok(())
                }
                _ => Err(LexError::UnexpectedChar { state: "object-key-or-end", found: c }),
            },
            Some(Frame::Object(ObjPhase::AwaitColon)) => {
                if c == ':' {
                    if let Some(Frame::Object(phase)) = self.stack.last_mut() {
                        *phase = ObjPhase::AwaitValue;
                    }
                    Ok(())
                } else {
                    Err(LexError::UnexpectedChar { state: "object-colon", found: c })
                }
            }
            Some(Frame::Object(ObjPhase::AwaitValue)) => self.start_value(c, out),
            Some(Frame::Object(ObjPhase::AwaitCommaOrEnd)) => match c {
                ',' => {
                    if let Some(Frame::Object(phase)) = self.stack.last_mut() {
                        *phase = ObjPhase::AwaitKeyOrEnd;
                    }
                    Ok(())
                }
                '}' => {
                    self.close_object(out);
                    Ok(())
                }
                _ => Err(LexError::UnexpectedChar { state: "object-comma-or-end", found: c }),
            },
            Some(Frame::Array(ArrPhase::AwaitValueOrEnd)) => {
                if c == ']' {
                    self.close_array(out);
                    Ok(())
                } else {
                    self.start_value(c, out)
                }
            }
            Some(Frame::Array(ArrPhase::AwaitCommaOrEnd)) => match c {
                ',' => {
                    if let Some(Frame::Array(phase)) = self.stack.last_mut() {
                        *phase = ArrPhase::AwaitValueOrEnd;
                    }
                    Ok(())
                }
                ']' => {
                    self.close_array(out);
                    Ok(())
                }
                _ => Err(LexError::UnexpectedChar { state: "array-comma-or-end", found: c }),
            },
        }
    }
}

/// A convenience wrapper for tests: lexes a complete, unchunked string.
#[cfg(test)]
pub(crate) fn lex_all(source: &str) -> Result<Vec<LexEvent>, LexError> {
    let mut lexer = Lexer::new();
    let mut out = Vec::new();
    lexer.feed(source, &mut out)?;
    lexer.finish(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(events: &[LexEvent]) -> Vec<TokenKind> {
        events.iter().map(|e| e.kind).collect()
    }

    fn concat(events: &[LexEvent], kind: TokenKind) -> String {
        events
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.text.as_str())
            .collect()
    }

    #[test]
    fn lexes_bare_number() {
        let events = lex_all("42").unwrap();
        assert_eq!(kinds(&events), vec![TokenKind::Number]);
        assert_eq!(concat(&events, TokenKind::Number), "42");
    }

    #[test]
    fn lexes_object_with_mixed_values() {
        let events = lex_all(r#"{"a":1,"b":[true,null]}"#).unwrap();
        assert_eq!(
            kinds(&events),
            vec![
                TokenKind::ObjectStart,
                TokenKind::Key,
                TokenKind::Number,
                TokenKind::Key,
                TokenKind::ArrayStart,
                TokenKind::Boolean,
                TokenKind::Null,
                TokenKind::ArrayEnd,
                TokenKind::ObjectEnd,
            ]
        );
    }

    #[test]
    fn chunk_split_inside_string_preserves_concatenation() {
        let mut lexer = Lexer::new();
        let mut out = Vec::new();
        for chunk in ["\"he", "l", "lo\""] {
            lexer.feed(chunk, &mut out).unwrap();
        }
        lexer.finish(&mut out).unwrap();
        assert_eq!(kinds(&out), vec![TokenKind::String]);
        assert_eq!(concat(&out, TokenKind::String), "hello");
    }

    #[test]
    fn chunk_split_mid_unicode_escape_preserves_concatenation() {
        let mut lexer = Lexer::new();
        let mut out = Vec::new();
        for chunk in ["\"\\u00", "41\""] {
            lexer.feed(chunk, &mut out).unwrap();
        }
        lexer.finish(&mut out).unwrap();
        assert_eq!(concat(&out, TokenKind::String), "\\u0041");
    }

    #[test]
    fn chunk_split_between_backslash_and_escape_char() {
        let mut lexer = Lexer::new();
        let mut out = Vec::new();
        for chunk in ["\"", "\\", "\"", "\""] {
            lexer.feed(chunk, &mut out).unwrap();
        }
        lexer.finish(&mut out).unwrap();
        assert_eq!(kinds(&out), vec![TokenKind::String]);
        assert_eq!(concat(&out, TokenKind::String), "\\\"");
    }

    #[test]
    fn chunk_split_inside_exponent() {
        let mut lexer = Lexer::new();
        let mut out = Vec::new();
        for chunk in ["1.5e+", "10"] {
            lexer.feed(chunk, &mut out).unwrap();
        }
        lexer.finish(&mut out).unwrap();
        assert_eq!(concat(&out, TokenKind::Number), "1.5e+10");
    }

    #[test]
    fn partial_keyword_across_split_completes() {
        let mut lexer = Lexer::new();
        let mut out = Vec::new();
        for chunk in ["tr", "ue"] {
            lexer.feed(chunk, &mut out).unwrap();
        }
        lexer.finish(&mut out).unwrap();
        assert_eq!(kinds(&out), vec![TokenKind::Boolean]);
        assert_eq!(out[0].text, "true");
    }

    #[test]
    fn empty_chunk_is_a_no_op() {
        let mut lexer = Lexer::new();
        let mut out = Vec::new();
        lexer.feed("", &mut out).unwrap();
        lexer.feed("42", &mut out).unwrap();
        lexer.feed("", &mut out).unwrap();
        lexer.finish(&mut out).unwrap();
        assert_eq!(concat(&out, TokenKind::Number), "42");
    }

    #[test]
    fn empty_string_emits_single_empty_fragment() {
        let events = lex_all("\"\"").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text, "");
        assert_eq!(events[0].kind, TokenKind::String);
    }

    #[test]
    fn leading_zero_followed_by_digit_is_invalid() {
        assert!(lex_all("01").is_err());
    }

    #[test]
    fn unterminated_string_fails_on_finish() {
        let mut lexer = Lexer::new();
        let mut out = Vec::new();
        lexer.feed("\"abc", &mut out).unwrap();
        assert!(lexer.finish(&mut out).is_err());
    }

    #[test]
    fn mismatched_keyword_character_fails() {
        assert!(lex_all("nul1").is_err());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let opts = ParserOptions::new().with_max_depth(1);
        let mut lexer = Lexer::with_options(&opts);
        let mut out = Vec::new();
        assert!(lexer.feed("[[1]]", &mut out).is_err());
    }
}
