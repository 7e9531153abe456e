//! Token stream contract consumed by the scanner.

use std::borrow::Cow;

use crate::error::ScanError;

/// A JSON token. Delimiters (`,` and `:`) are consumed by the source and
/// never surface as tokens.
///
/// The scanner only checks [`Token::is_scalar`]; the `String`, `Number` and
/// `Bool` payloads are carried for other [`TokenSource`] consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    /// Object member name, unescaped.
    Key(Cow<'a, str>),
    /// String value body between the quotes, still escaped.
    String(&'a str),
    Number(&'a str),
    Bool(bool),
    Null,
}

impl Token<'_> {
    /// True for tokens that complete a value on their own.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Token::String(_) | Token::Number(_) | Token::Bool(_) | Token::Null
        )
    }
}

/// Half-open byte range `[start, end)` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

/// A forward-only JSON token source with byte offset introspection.
///
/// Implementations report malformed input as [`ScanError`] and must keep
/// offsets exact across skipped values.
pub trait TokenSource<'a> {
    /// Reads the next token. Returns [`ScanError::UnexpectedEnd`] if the
    /// top-level value is already complete or the input ran out.
    fn next_token(&mut self) -> Result<Spanned<Token<'a>>, ScanError>;

    /// Number of bytes consumed so far: the offset just past the last token.
    fn offset(&self) -> usize;

    /// Consumes the next value, nested containers included, without
    /// surfacing its tokens. Returns the value's span.
    fn skip_value(&mut self) -> Result<Span, ScanError>;

    /// Whether another member or element follows in the innermost open
    /// container. `false` means its closing token is next.
    fn more(&mut self) -> Result<bool, ScanError>;
}
