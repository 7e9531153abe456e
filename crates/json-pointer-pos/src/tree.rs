//! Prefix tree of pointer token paths.
//!
//! Many pointers are merged into one tree so a single pass over the
//! document can resolve all of them: while scanning a container, only the
//! keys (or indices) present among the current node's children are of
//! interest, everything else is skipped.

use indexmap::IndexMap;

/// A node of the [`PointerTree`].
///
/// A node exists iff some requested pointer has its token path as a prefix.
/// `offset` is set iff the scanned document has a value at exactly that path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Token this node matches. Empty (and never matched) for the root.
    pub token: String,
    pub children: IndexMap<String, Node>,
    /// Byte offset of the first byte of the value at this path.
    pub offset: Option<usize>,
}

impl Node {
    fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            ..Self::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels below this node.
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of descendants, not counting this node.
    pub fn descendants(&self) -> usize {
        self.children
            .values()
            .map(|child| child.descendants() + 1)
            .sum()
    }
}

/// Token paths merged into a shared prefix tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerTree {
    pub root: Node,
}

impl PointerTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from token paths. Duplicate and overlapping paths
    /// share nodes.
    ///
    /// # Example
    ///
    /// ```
    /// use json_pointer_pos::PointerTree;
    ///
    /// let tree = PointerTree::build([vec!["a", "b"], vec!["a", "c"], vec!["a"]]);
    /// assert_eq!(tree.node_count(), 3);
    /// assert_eq!(tree.depth(), 2);
    /// ```
    pub fn build<I, P, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for path in paths {
            tree.insert(path);
        }
        tree
    }

    /// Adds one token path, reusing existing nodes along its prefix.
    pub fn insert<P, S>(&mut self, path: P)
    where
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut node = &mut self.root;
        for token in path {
            let token = token.as_ref();
            node = node
                .children
                .entry(token.to_string())
                .or_insert_with(|| Node::new(token));
        }
    }

    /// Looks up the node for a token path.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        path.iter()
            .try_fold(&self.root, |node, token| node.children.get(token.as_ref()))
    }

    /// Resolved offset of the value at `path`, if the scan found one.
    pub fn offset<S: AsRef<str>>(&self, path: &[S]) -> Option<usize> {
        self.get(path).and_then(|node| node.offset)
    }

    /// True when no pointer below the root was inserted.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Length of the longest inserted token path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of nodes, root excluded.
    pub fn node_count(&self) -> usize {
        self.root.descendants()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::JsonPointer;

    #[test]
    fn test_build_empty() {
        let tree = PointerTree::build(Vec::<Vec<String>>::new());
        assert!(tree.is_empty());
        assert_eq!(tree.root, Node::default());
    }

    #[test]
    fn test_build_shares_prefixes() {
        let pointers: Vec<JsonPointer> = ["/foo", "/foo/a", "/foo/b", "/bar/a/b", "/"]
            .iter()
            .map(|p| JsonPointer::parse(p).unwrap())
            .collect();
        // "/" is the key "", not the whole document
        let tree = PointerTree::build(pointers.iter().map(JsonPointer::tokens));

        assert_eq!(tree.root.token, "");
        assert_eq!(
            tree.root.children.keys().collect::<Vec<_>>(),
            ["foo", "bar", ""]
        );
        let empty = &tree.root.children[""];
        assert_eq!(empty.token, "");
        assert!(empty.is_leaf());
        let foo = &tree.root.children["foo"];
        assert_eq!(foo.token, "foo");
        assert_eq!(foo.children.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert!(foo.children["a"].is_leaf());

        let b = tree.get(&["bar", "a", "b"]).unwrap();
        assert_eq!(b.token, "b");
        assert!(b.offset.is_none());

        assert_eq!(tree.node_count(), 7);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut tree = PointerTree::new();
        tree.insert(["x", "y"]);
        let once = tree.clone();
        tree.insert(["x", "y"]);
        tree.insert(["x"]);
        assert_eq!(tree, once);
    }

    #[test]
    fn test_root_path_adds_nothing() {
        let tree = PointerTree::build([Vec::<&str>::new()]);
        assert!(tree.is_empty());
        assert!(tree.get::<&str>(&[]).is_some());
    }

    #[test]
    fn test_empty_string_token_is_a_child() {
        let tree = PointerTree::build([vec![""]]);
        assert_eq!(tree.node_count(), 1);
        assert!(tree.get(&[""]).is_some());
    }
}
