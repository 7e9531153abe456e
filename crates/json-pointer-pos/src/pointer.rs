//! JSON Pointer (RFC 6901) parsing into token paths.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::PointerError;

/// A parsed JSON Pointer: an ordered sequence of unescaped reference tokens.
///
/// Array indices and object keys are both plain strings here; whether a
/// token addresses an element or a member is decided by the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The pointer to the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a JSON Pointer string.
    ///
    /// - `""` is the root pointer (no tokens)
    /// - `"/"` has a single empty-string token
    /// - `~1` decodes to `/` and `~0` to `~`; any other `~` sequence is rejected
    ///
    /// # Example
    ///
    /// ```
    /// use json_pointer_pos::JsonPointer;
    ///
    /// let ptr = JsonPointer::parse("/a~1b/0").unwrap();
    /// assert_eq!(ptr.tokens(), ["a/b", "0"]);
    /// assert!(JsonPointer::parse("foo").is_err());
    /// ```
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PointerError::MissingLeadingSlash(pointer.to_string()));
        };
        let mut tokens = Vec::new();
        let mut at = 1;
        for raw in rest.split('/') {
            let token = unescape_token(raw).map_err(|i| PointerError::InvalidEscape {
                pointer: pointer.to_string(),
                at: at + i,
            })?;
            tokens.push(token);
            at += raw.len() + 1;
        }
        Ok(Self { tokens })
    }

    /// Builds a pointer from already unescaped tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape_token(token))?;
        }
        Ok(())
    }
}

impl std::str::FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for JsonPointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Escapes a reference token: `~` becomes `~0` and `/` becomes `~1`.
pub fn escape_token(token: &str) -> String {
    if !token.contains(['/', '~']) {
        return token.to_string();
    }
    // `~` first, otherwise the `~` of `~1` would be escaped again
    token.replace('~', "~0").replace('/', "~1")
}

/// Unescapes a reference token.
///
/// On failure returns the byte index of the offending `~` within `raw`.
pub fn unescape_token(raw: &str) -> Result<String, usize> {
    if !raw.contains('~') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '0')) => out.push('~'),
            Some((_, '1')) => out.push('/'),
            _ => return Err(i),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let ptr = JsonPointer::parse("").unwrap();
        assert!(ptr.is_root());
        assert_eq!(ptr.to_string(), "");
    }

    #[test]
    fn test_parse_single_empty_token() {
        let ptr = JsonPointer::parse("/").unwrap();
        assert_eq!(ptr.tokens(), [""]);
        assert_eq!(ptr.to_string(), "/");
    }

    #[test]
    fn test_parse_escapes() {
        let ptr = JsonPointer::parse("/a~0b/c~1d/~01").unwrap();
        assert_eq!(ptr.tokens(), ["a~b", "c/d", "~1"]);
        assert_eq!(ptr.to_string(), "/a~0b/c~1d/~01");
    }

    #[test]
    fn test_parse_trailing_slashes() {
        let ptr = JsonPointer::parse("/foo//").unwrap();
        assert_eq!(ptr.tokens(), ["foo", "", ""]);
    }

    #[test]
    fn test_parse_missing_leading_slash() {
        assert_eq!(
            JsonPointer::parse("foo/bar"),
            Err(PointerError::MissingLeadingSlash("foo/bar".to_string()))
        );
    }

    #[test]
    fn test_parse_invalid_escape() {
        assert_eq!(
            JsonPointer::parse("/ok/a~2"),
            Err(PointerError::InvalidEscape {
                pointer: "/ok/a~2".to_string(),
                at: 5,
            })
        );
        assert!(JsonPointer::parse("/trailing~").is_err());
    }

    #[test]
    fn test_from_tokens_display() {
        let ptr = JsonPointer::from_tokens(["a/b", "~", "0"]);
        assert_eq!(ptr.to_string(), "/a~1b/~0/0");
        assert_eq!(JsonPointer::parse(&ptr.to_string()).unwrap(), ptr);
    }

    #[test]
    fn test_escape_token() {
        assert_eq!(escape_token("plain"), "plain");
        assert_eq!(escape_token("~/"), "~0~1");
    }

    #[test]
    fn test_serialize_as_string() {
        let ptr = JsonPointer::from_tokens(["a", "b/c"]);
        assert_eq!(
            serde_json::to_value(&ptr).unwrap(),
            serde_json::json!("/a/b~1c")
        );
    }
}
