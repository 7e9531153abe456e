//! Single-pass value scanner driven by a [`PointerTree`](crate::PointerTree).

use tracing::trace;

use crate::error::ScanError;
use crate::token::{Span, Token, TokenSource};
use crate::tree::Node;

/// Scans the value at the source's cursor, recording offsets on `node`'s
/// descendants for every member or element whose key matches a child.
///
/// Matched children with children of their own are scanned recursively;
/// everything else is skipped without surfacing its tokens, so recursion
/// depth is bounded by the tree depth, not the document depth. Returns the
/// span of the scanned value; `span.len()` is the number of bytes it takes.
///
/// The first occurrence of a duplicated object key wins.
pub fn scan_value<'a, S>(source: &mut S, node: &mut Node) -> Result<Span, ScanError>
where
    S: TokenSource<'a>,
{
    let first = source.next_token()?;
    let start = first.span.start;
    match first.value {
        Token::ObjectStart => {
            while source.more()? {
                let key = source.next_token()?;
                let Token::Key(name) = key.value else {
                    return Err(ScanError::Invalid(key.span.start));
                };
                scan_member(source, node, &name)?;
            }
            expect_end(source, Token::ObjectEnd)?;
        }
        Token::ArrayStart => {
            let mut index = 0usize;
            while source.more()? {
                scan_member(source, node, &index.to_string())?;
                index += 1;
            }
            expect_end(source, Token::ArrayEnd)?;
        }
        ref token if token.is_scalar() => {}
        _ => return Err(ScanError::Invalid(start)),
    }
    Ok(Span::new(start, source.offset()))
}

fn scan_member<'a, S>(source: &mut S, node: &mut Node, token: &str) -> Result<(), ScanError>
where
    S: TokenSource<'a>,
{
    match node.children.get_mut(token) {
        Some(child) if child.offset.is_none() => {
            let span = if child.is_leaf() {
                source.skip_value()?
            } else {
                scan_value(source, child)?
            };
            trace!(token, offset = span.start, "matched pointer token");
            child.offset = Some(span.start);
        }
        _ => {
            source.skip_value()?;
        }
    }
    Ok(())
}

fn expect_end<'a, S>(source: &mut S, end: Token<'static>) -> Result<(), ScanError>
where
    S: TokenSource<'a>,
{
    let token = source.next_token()?;
    if token.value != end {
        return Err(ScanError::Invalid(token.span.start));
    }
    Ok(())
}
