//! Index of host elements handed out as [`NodeId`]s.
//!
//! Each element is stamped with its index when first seen, so a later lookup
//! reads the stamp and checks identity instead of scanning the table. A stamp
//! that points at a different element (for example a cloned node carrying the
//! copied attribute) is treated as unknown.

use super::NodeId;

/// Attribute holding an element's index.
pub const NODE_STAMP_ATTRIBUTE: &str = "data-folio-node";

/// Elements indexed by [`NodeId`].
#[derive(Debug)]
pub struct NodeTable<T> {
    nodes: Vec<T>,
}

impl<T> Default for NodeTable<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T: PartialEq + Clone> NodeTable<T> {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `element`, adding it when the stamp does not resolve
    /// to it. `write_stamp` is called with the new index for fresh entries.
    pub fn intern(
        &mut self,
        element: T,
        stamp: Option<&str>,
        write_stamp: impl FnOnce(&T, &str),
    ) -> NodeId {
        if let Some(index) = stamp.and_then(|s| s.parse::<usize>().ok()) {
            if self.nodes.get(index).is_some_and(|known| *known == element) {
                return NodeId(index);
            }
        }

        let index = self.nodes.len();
        write_stamp(&element, &index.to_string());
        self.nodes.push(element);
        NodeId(index)
    }

    /// The element behind `node`.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<T> {
        self.nodes.get(node.0).cloned()
    }

    /// Number of indexed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing has been indexed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Stand-in element compared by name.
    #[derive(Debug, Clone, PartialEq)]
    struct Fake(&'static str);

    #[test]
    fn test_stamped_element_resolves_without_growth() {
        let stamps: RefCell<HashMap<&'static str, String>> = RefCell::new(HashMap::new());
        let mut table = NodeTable::new();

        let first = table.intern(Fake("nav"), None, |el, s| {
            stamps.borrow_mut().insert(el.0, s.to_string());
        });
        let stamp = stamps.borrow().get("nav").cloned();
        let again = table.intern(Fake("nav"), stamp.as_deref(), |_, _| {
            panic!("known element must not be re-stamped")
        });

        assert_eq!(first, again);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(first), Some(Fake("nav")));
    }

    #[test]
    fn test_foreign_or_bad_stamp_adds_entry() {
        let mut table = NodeTable::new();
        let nav = table.intern(Fake("nav"), None, |_, _| {});

        // Copied stamp pointing at another element
        let clone = table.intern(Fake("section"), Some("0"), |_, _| {});
        assert_ne!(nav, clone);

        let garbage = table.intern(Fake("footer"), Some("x"), |_, _| {});
        let out_of_range = table.intern(Fake("img"), Some("99"), |_, _| {});
        assert_eq!(garbage, NodeId(2));
        assert_eq!(out_of_range, NodeId(3));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_many_lookups_keep_table_size() {
        let mut table = NodeTable::new();
        let ids: Vec<NodeId> = (0..100)
            .map(|i| table.intern(i, None, |_, _| {}))
            .collect();

        for round in 0..10 {
            for (i, id) in ids.iter().enumerate() {
                let stamp = id.0.to_string();
                assert_eq!(table.intern(i, Some(&stamp), |_, _| {}), *id, "round {round}");
            }
        }
        assert_eq!(table.len(), 100);
        assert!(!table.is_empty());
    }
}
