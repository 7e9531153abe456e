//! `Tokenizer` — pull tokenizer over JSON text with byte offsets.
//!
//! Validates the RFC 8259 grammar as it goes but never builds values.
//! Separators are consumed internally, so callers only see structural and
//! scalar tokens.

use std::borrow::Cow;

use crate::error::ScanError;
use crate::token::{Span, Spanned, Token, TokenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// A value is expected next.
    Value,
    /// Just after `{`: a key or `}`.
    FirstKey,
    /// After `,` inside an object.
    Key,
    /// Just after `[`: a value or `]`.
    FirstElement,
    /// A value completed inside a container: `,` or the closer.
    AfterValue,
    /// The top-level value is complete.
    Done,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    data: &'a [u8],
    x: usize,
    stack: Vec<Scope>,
    state: State,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            data: text.as_bytes(),
            x: 0,
            stack: Vec::new(),
            state: State::Value,
        }
    }

    /// Checks that the top-level value is complete and only whitespace
    /// follows it.
    pub fn finish(&mut self) -> Result<(), ScanError> {
        self.skip_whitespace();
        if self.state != State::Done {
            return Err(self.eof_or_invalid());
        }
        if self.x < self.data.len() {
            return Err(ScanError::TrailingData(self.x));
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.data.get(self.x) {
            self.x += 1;
        }
    }

    fn peek(&self) -> Result<u8, ScanError> {
        self.data
            .get(self.x)
            .copied()
            .ok_or(ScanError::UnexpectedEnd(self.x))
    }

    fn eof_or_invalid(&self) -> ScanError {
        if self.x >= self.data.len() {
            ScanError::UnexpectedEnd(self.x)
        } else {
            ScanError::Invalid(self.x)
        }
    }

    fn after_value(&mut self) {
        self.state = if self.stack.is_empty() {
            State::Done
        } else {
            State::AfterValue
        };
    }

    fn open(&mut self, scope: Scope) -> Spanned<Token<'a>> {
        let start = self.x;
        self.x += 1;
        self.stack.push(scope);
        let value = match scope {
            Scope::Object => {
                self.state = State::FirstKey;
                Token::ObjectStart
            }
            Scope::Array => {
                self.state = State::FirstElement;
                Token::ArrayStart
            }
        };
        Spanned {
            value,
            span: Span::new(start, self.x),
        }
    }

    fn close(&mut self) -> Spanned<Token<'a>> {
        let start = self.x;
        self.x += 1;
        let value = match self.stack.pop() {
            Some(Scope::Object) => Token::ObjectEnd,
            _ => Token::ArrayEnd,
        };
        self.after_value();
        Spanned {
            value,
            span: Span::new(start, self.x),
        }
    }

    fn read_value(&mut self) -> Result<Spanned<Token<'a>>, ScanError> {
        let text = self.text;
        let start = self.x;
        let value = match self.peek()? {
            b'{' => return Ok(self.open(Scope::Object)),
            b'[' => return Ok(self.open(Scope::Array)),
            b'"' => {
                let (body, _) = self.read_string()?;
                Token::String(&text[body.start..body.end])
            }
            b't' => {
                self.read_literal(b"true")?;
                Token::Bool(true)
            }
            b'f' => {
                self.read_literal(b"false")?;
                Token::Bool(false)
            }
            b'n' => {
                self.read_literal(b"null")?;
                Token::Null
            }
            b'-' | b'0'..=b'9' => {
                self.read_number()?;
                Token::Number(&text[start..self.x])
            }
            _ => return Err(ScanError::Invalid(start)),
        };
        self.after_value();
        Ok(Spanned {
            value,
            span: Span::new(start, self.x),
        })
    }

    fn read_key(&mut self) -> Result<Spanned<Token<'a>>, ScanError> {
        let text = self.text;
        let start = self.x;
        if self.peek()? != b'"' {
            return Err(ScanError::Invalid(start));
        }
        let (body, escaped) = self.read_string()?;
        let end = self.x;
        let key = if escaped {
            Cow::Owned(unescape_key(&text[body.start..body.end]))
        } else {
            Cow::Borrowed(&text[body.start..body.end])
        };
        self.skip_whitespace();
        if self.peek()? != b':' {
            return Err(ScanError::Invalid(self.x));
        }
        self.x += 1;
        self.state = State::Value;
        Ok(Spanned {
            value: Token::Key(key),
            span: Span::new(start, end),
        })
    }

    /// Reads a quoted string starting at the opening quote. Returns the span
    /// of the body (without quotes) and whether it contains escapes.
    fn read_string(&mut self) -> Result<(Span, bool), ScanError> {
        let data = self.data;
        let x0 = self.x + 1;
        let mut x = x0;
        let mut escaped = false;
        loop {
            match data.get(x) {
                None => return Err(ScanError::UnexpectedEnd(x)),
                Some(b'"') => break,
                Some(b'\\') => {
                    escaped = true;
                    match data.get(x + 1) {
                        None => return Err(ScanError::UnexpectedEnd(x + 1)),
                        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => x += 2,
                        Some(b'u') => {
                            for i in x + 2..x + 6 {
                                match data.get(i) {
                                    None => return Err(ScanError::UnexpectedEnd(i)),
                                    Some(b) if b.is_ascii_hexdigit() => {}
                                    Some(_) => return Err(ScanError::InvalidString(i)),
                                }
                            }
                            x += 6;
                        }
                        Some(_) => return Err(ScanError::InvalidString(x)),
                    }
                }
                Some(&b) if b < 0x20 => return Err(ScanError::InvalidString(x)),
                Some(_) => x += 1,
            }
        }
        self.x = x + 1;
        Ok((Span::new(x0, x), escaped))
    }

    fn read_literal(&mut self, literal: &[u8]) -> Result<(), ScanError> {
        let rest = &self.data[self.x..];
        if rest.starts_with(literal) {
            self.x += literal.len();
            return Ok(());
        }
        let matched = rest
            .iter()
            .zip(literal)
            .take_while(|(a, b)| a == b)
            .count();
        if matched == rest.len() {
            Err(ScanError::UnexpectedEnd(self.data.len()))
        } else {
            Err(ScanError::Invalid(self.x + matched))
        }
    }

    fn read_number(&mut self) -> Result<(), ScanError> {
        let data = self.data;
        let start = self.x;
        let mut x = start;
        let digits = |mut x: usize| {
            while data.get(x).is_some_and(u8::is_ascii_digit) {
                x += 1;
            }
            x
        };

        if data.get(x) == Some(&b'-') {
            x += 1;
        }
        match data.get(x) {
            Some(b'0') => x += 1,
            Some(b'1'..=b'9') => x = digits(x + 1),
            None => return Err(ScanError::UnexpectedEnd(x)),
            Some(_) => return Err(ScanError::InvalidNumber(start)),
        }
        if data.get(x) == Some(&b'.') {
            let frac = digits(x + 1);
            if frac == x + 1 {
                return Err(self.number_error(start, frac));
            }
            x = frac;
        }
        if let Some(b'e' | b'E') = data.get(x) {
            x += 1;
            if let Some(b'+' | b'-') = data.get(x) {
                x += 1;
            }
            let exp = digits(x);
            if exp == x {
                return Err(self.number_error(start, exp));
            }
            x = exp;
        }
        self.x = x;
        Ok(())
    }

    fn number_error(&self, start: usize, at: usize) -> ScanError {
        if at >= self.data.len() {
            ScanError::UnexpectedEnd(at)
        } else {
            ScanError::InvalidNumber(start)
        }
    }
}

/// Decodes the escapes of a string body already checked by `read_string`.
///
/// `\u` escapes are collected as UTF-16 units so surrogate pairs combine;
/// unpaired surrogates become U+FFFD.
fn unescape_key(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut units: Vec<u16> = Vec::new();
    let mut rest = body;
    while let Some(i) = rest.find('\\') {
        if i > 0 {
            flush_utf16(&mut out, &mut units);
            out.push_str(&rest[..i]);
        }
        let ch = match rest.as_bytes()[i + 1] {
            b'u' => {
                let unit = u16::from_str_radix(&rest[i + 2..i + 6], 16).unwrap_or(0xFFFD);
                units.push(unit);
                rest = &rest[i + 6..];
                continue;
            }
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            other => char::from(other),
        };
        flush_utf16(&mut out, &mut units);
        out.push(ch);
        rest = &rest[i + 2..];
    }
    flush_utf16(&mut out, &mut units);
    out.push_str(rest);
    out
}

fn flush_utf16(out: &mut String, units: &mut Vec<u16>) {
    if !units.is_empty() {
        out.push_str(&String::from_utf16_lossy(units));
        units.clear();
    }
}

impl<'a> TokenSource<'a> for Tokenizer<'a> {
    fn next_token(&mut self) -> Result<Spanned<Token<'a>>, ScanError> {
        loop {
            self.skip_whitespace();
            let ch = self.peek()?;
            match self.state {
                State::Done => return Err(ScanError::TrailingData(self.x)),
                State::Value => return self.read_value(),
                State::FirstKey if ch == b'}' => return Ok(self.close()),
                State::FirstKey | State::Key => return self.read_key(),
                State::FirstElement if ch == b']' => return Ok(self.close()),
                State::FirstElement => return self.read_value(),
                State::AfterValue => {
                    if !self.more()? {
                        return Ok(self.close());
                    }
                }
            }
        }
    }

    fn offset(&self) -> usize {
        self.x
    }

    fn skip_value(&mut self) -> Result<Span, ScanError> {
        let first = self.next_token()?;
        let start = first.span.start;
        match first.value {
            Token::ObjectStart | Token::ArrayStart => {}
            Token::ObjectEnd | Token::ArrayEnd | Token::Key(_) => {
                return Err(ScanError::Invalid(start))
            }
            _ => return Ok(first.span),
        }
        let depth = self.stack.len() - 1;
        while self.stack.len() > depth {
            self.next_token()?;
        }
        Ok(Span::new(start, self.x))
    }

    fn more(&mut self) -> Result<bool, ScanError> {
        self.skip_whitespace();
        if self.state == State::Done {
            return Ok(false);
        }
        let ch = self.peek()?;
        let closer = match self.stack.last() {
            Some(Scope::Object) => b'}',
            Some(Scope::Array) => b']',
            None => return Ok(true),
        };
        match self.state {
            State::FirstKey | State::FirstElement => Ok(ch != closer),
            State::AfterValue if ch == closer => Ok(false),
            State::AfterValue if ch == b',' => {
                self.x += 1;
                self.state = match self.stack.last() {
                    Some(Scope::Object) => State::Key,
                    _ => State::Value,
                };
                Ok(true)
            }
            State::AfterValue => Err(ScanError::Invalid(self.x)),
            State::Value | State::Key | State::Done => Ok(true),
        }
    }
}
