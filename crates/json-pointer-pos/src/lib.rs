//! Resolve JSON Pointers (RFC 6901) to source positions in raw JSON text.
//!
//! All pointers are merged into a [`PointerTree`] and resolved in a single
//! streaming pass over the document. Subtrees no pointer asks for are skipped
//! without being materialized; only their byte length is tracked so sibling
//! offsets stay exact. Each resolved byte offset is then converted to a
//! 1-based line/column [`Position`].
//!
//! # Example
//!
//! ```
//! use json_pointer_pos::{resolve_str, Position};
//!
//! let text = "\n{\n  \"a\": 1,\n  \"b\": 2,\n  \"c\": {\n    \"x\": 3\n  }\n}";
//!
//! let out = resolve_str(text, &["/b", "/c/x", "/missing"]).unwrap().unwrap();
//! assert_eq!(out["/b"].position, Position::new(4, 8));
//! assert_eq!(out["/c/x"].position, Position::new(6, 10));
//! assert!(!out.contains_key("/missing"));
//!
//! // Nothing requested is distinct from nothing found.
//! assert_eq!(resolve_str(text, &[]).unwrap(), None);
//! ```

mod error;
pub use error::{Error, PointerError, ScanError};

pub mod pointer;
pub use pointer::JsonPointer;

mod tree;
pub use tree::{Node, PointerTree};

pub mod token;
pub use token::{Span, Spanned, Token, TokenSource};

mod tokenizer;
pub use tokenizer::Tokenizer;

mod scan;
pub use scan::scan_value;

mod position;
pub use position::{ColumnUnit, LineIndex, Position};

mod options;
pub use options::ResolveOptions;

mod resolve;
pub use resolve::{resolve, resolve_str, resolve_with, PointerPosition, Positions};
