//! Pointer resolution: tree build, one scan, offset conversion.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, ScanError};
use crate::options::ResolveOptions;
use crate::pointer::JsonPointer;
use crate::position::{LineIndex, Position};
use crate::scan::scan_value;
use crate::tokenizer::Tokenizer;
use crate::tree::PointerTree;

/// Resolved pointers keyed by their canonical string form, in request order.
pub type Positions = IndexMap<String, PointerPosition>;

/// Where the value addressed by a pointer starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointerPosition {
    pub pointer: JsonPointer,
    /// Byte offset of the value's first byte.
    pub offset: usize,
    pub position: Position,
}

/// Resolves `pointers` against `text` with default options.
///
/// See [`resolve_with`].
pub fn resolve(text: &str, pointers: &[JsonPointer]) -> Result<Option<Positions>, ScanError> {
    resolve_with(text, pointers, &ResolveOptions::default())
}

/// Resolves every pointer against the JSON `text` in a single pass and
/// reports where each addressed value starts.
///
/// - No pointers requested: `Ok(None)`.
/// - Pointers requested: `Ok(Some(map))`, where pointers without a value in
///   the document are simply absent (possibly leaving the map empty).
/// - Malformed JSON anywhere in the document fails the whole call.
///
/// Pointers with the same token path produce one entry.
pub fn resolve_with(
    text: &str,
    pointers: &[JsonPointer],
    options: &ResolveOptions,
) -> Result<Option<Positions>, ScanError> {
    if pointers.is_empty() {
        return Ok(None);
    }

    let mut tree = PointerTree::build(pointers.iter().map(JsonPointer::tokens));
    let mut tokenizer = Tokenizer::new(text);
    let span = scan_value(&mut tokenizer, &mut tree.root)?;
    tokenizer.finish()?;
    tree.root.offset = Some(span.start);

    let mut hits: IndexMap<String, (&JsonPointer, usize)> = IndexMap::new();
    for pointer in pointers {
        if let Some(offset) = tree.offset(pointer.tokens()) {
            hits.entry(pointer.to_string()).or_insert((pointer, offset));
        }
    }

    let index = LineIndex::new(text);
    let offsets: Vec<usize> = hits.values().map(|&(_, offset)| offset).collect();
    let converted = index.positions(&offsets, options.column_unit);
    let mut out = Positions::with_capacity(hits.len());
    // Token starts are ASCII, so every offset converts.
    for ((key, (pointer, offset)), position) in hits.into_iter().zip(converted) {
        let Some(position) = position else {
            continue;
        };
        out.insert(
            key,
            PointerPosition {
                pointer: pointer.clone(),
                offset,
                position,
            },
        );
    }

    debug!(
        requested = pointers.len(),
        nodes = tree.node_count(),
        resolved = out.len(),
        "resolved JSON pointer positions"
    );
    Ok(Some(out))
}

/// Parses pointer strings, then resolves them like [`resolve`].
///
/// # Example
///
/// ```
/// use json_pointer_pos::{resolve_str, Position};
///
/// let text = "{\n  \"a\": [true, null]\n}";
/// let out = resolve_str(text, &["/a/1", "/b"]).unwrap().unwrap();
/// assert_eq!(out["/a/1"].position, Position::new(2, 15));
/// assert!(!out.contains_key("/b"));
/// ```
pub fn resolve_str(text: &str, pointers: &[&str]) -> Result<Option<Positions>, Error> {
    let pointers = pointers
        .iter()
        .map(|p| JsonPointer::parse(p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(resolve(text, &pointers)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PointerError;
    use crate::position::ColumnUnit;

    #[test]
    fn test_no_pointers_is_none() {
        assert_eq!(resolve("{}", &[]), Ok(None));
        assert_eq!(resolve("[]", &[]), Ok(None));
    }

    #[test]
    fn test_no_match_is_empty() {
        let out = resolve_str("{}", &["/foo"]).unwrap();
        assert_eq!(out, Some(Positions::new()));
    }

    #[test]
    fn test_root_pointer() {
        let out = resolve_str("\n  [1]", &[""]).unwrap().unwrap();
        assert_eq!(out[""].offset, 3);
        assert_eq!(out[""].position, Position::new(2, 3));
    }

    #[test]
    fn test_duplicate_pointers_single_entry() {
        let pointers = [
            JsonPointer::parse("/a").unwrap(),
            JsonPointer::from_tokens(["a"]),
        ];
        let out = resolve(r#"{"a": 1}"#, &pointers).unwrap().unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out["/a"].offset, 6);
    }

    #[test]
    fn test_request_order_is_kept() {
        let out = resolve_str(r#"{"a": 1, "b": 2, "c": 3}"#, &["/c", "/a", "/b"])
            .unwrap()
            .unwrap();
        assert_eq!(out.keys().collect::<Vec<_>>(), ["/c", "/a", "/b"]);
    }

    #[test]
    fn test_column_unit_option() {
        let text = r#"{"ключ": "значение", "x": 1}"#;
        let pointers = [JsonPointer::parse("/x").unwrap()];
        let chars = resolve(text, &pointers).unwrap().unwrap();
        assert_eq!(chars["/x"].position, Position::new(1, 27));
        let bytes = resolve_with(
            text,
            &pointers,
            &ResolveOptions::new().with_column_unit(ColumnUnit::Bytes),
        )
        .unwrap()
        .unwrap();
        assert_eq!(bytes["/x"].position, Position::new(1, bytes["/x"].offset + 1));
        assert_eq!(bytes["/x"].offset, 38);
    }

    #[test]
    fn test_pointer_error_surfaces_before_scan() {
        assert_eq!(
            resolve_str("not json", &["nope"]),
            Err(Error::Pointer(PointerError::MissingLeadingSlash(
                "nope".to_string()
            )))
        );
    }

    #[test]
    fn test_scan_error_propagates() {
        assert_eq!(
            resolve_str(r#"{"a": 1,"#, &["/a"]),
            Err(Error::Scan(ScanError::UnexpectedEnd(8)))
        );
        assert_eq!(
            resolve_str(r#"{"a": 1} x"#, &["/a"]),
            Err(Error::Scan(ScanError::TrailingData(9)))
        );
    }
}
