//! Resolution options.

use serde::{Deserialize, Serialize};

use crate::position::ColumnUnit;

/// Options for [`resolve_with`](crate::resolve_with).
///
/// Deserializes with defaults for missing fields, so it can be embedded in a
/// host tool's own configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Unit reported columns are counted in. Defaults to characters.
    pub column_unit: ColumnUnit,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_unit(mut self, column_unit: ColumnUnit) -> Self {
        self.column_unit = column_unit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        assert_eq!(ResolveOptions::new().column_unit, ColumnUnit::Chars);
    }

    #[test]
    fn test_deserialize_partial() {
        let opts: ResolveOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(opts, ResolveOptions::default());

        let opts: ResolveOptions =
            serde_json::from_value(json!({"column_unit": "utf16"})).unwrap();
        assert_eq!(opts.column_unit, ColumnUnit::Utf16);
    }
}
