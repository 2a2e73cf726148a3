//! Node construction and node-level arithmetic.
//!
//! A node wraps one label. "Modifying" a node always builds a new one, and
//! node identity for equality and membership is label equality.

use crate::error::CoreError;
use crate::heap::{copy_checked, Heap, Node};
use crate::id::NodeId;
use crate::ops::{ArithOp, CmpOp};

impl Heap {
    /// Builds a node holding a copy of `label`.
    pub fn make_node(&mut self, label: impl AsRef<[u8]>) -> Result<NodeId, CoreError> {
        let label = copy_checked(label.as_ref(), "node label")?;
        self.alloc_node(Node::new(label))
    }

    /// Applies an arithmetic operator to two optional nodes.
    ///
    /// Null handling per operator:
    /// - `+`, `*`: both absent gives an empty node, one absent gives a copy
    ///   of the other.
    /// - `-`, `/`: absent left gives an empty node, absent right gives a
    ///   copy of the left.
    ///
    /// Both tables coincide with the string layer's treatment of an absent
    /// label, so the label is computed with [`ArithOp::apply_str`] directly.
    pub fn node_arith(
        &mut self,
        op: ArithOp,
        a: Option<NodeId>,
        b: Option<NodeId>,
    ) -> Result<NodeId, CoreError> {
        let label = op.apply_str(self.label_of(a)?, self.label_of(b)?);
        self.alloc_node(Node::new(label))
    }

    pub fn node_add(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Result<NodeId, CoreError> {
        self.node_arith(ArithOp::Add, a, b)
    }

    pub fn node_sub(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Result<NodeId, CoreError> {
        self.node_arith(ArithOp::Sub, a, b)
    }

    pub fn node_mul(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Result<NodeId, CoreError> {
        self.node_arith(ArithOp::Mul, a, b)
    }

    pub fn node_div(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Result<NodeId, CoreError> {
        self.node_arith(ArithOp::Div, a, b)
    }

    /// Applies `==` or `!=` to two optional nodes.
    pub fn node_cmp(
        &self,
        op: CmpOp,
        a: Option<NodeId>,
        b: Option<NodeId>,
    ) -> Result<bool, CoreError> {
        Ok(op.resolve(self.node_eq(a, b)?))
    }

    /// `a == b`: both present and labels equal. `null == null` is false.
    pub fn node_eq(&self, a: Option<NodeId>, b: Option<NodeId>) -> Result<bool, CoreError> {
        match (self.label_of(a)?, self.label_of(b)?) {
            (Some(a), Some(b)) => Ok(a == b),
            _ => Ok(false),
        }
    }

    pub fn node_ne(&self, a: Option<NodeId>, b: Option<NodeId>) -> Result<bool, CoreError> {
        self.node_cmp(CmpOp::Ne, a, b)
    }

    /// Label equality of two present nodes.
    pub(crate) fn same_label(&self, a: NodeId, b: NodeId) -> Result<bool, CoreError> {
        Ok(self.label(a)? == self.label(b)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn node(heap: &mut Heap, label: &str) -> NodeId {
        heap.make_node(label).unwrap()
    }

    #[test]
    fn make_node_copies_label() {
        let mut heap = Heap::new();
        let empty = heap.make_node("").unwrap();
        let a = node(&mut heap, "A");
        let raw = heap.make_node(b"\xff\x00\xfe").unwrap();
        assert_eq!(heap.label(empty).unwrap(), b"");
        assert_eq!(heap.label(a).unwrap(), b"A");
        assert_eq!(heap.label(raw).unwrap(), b"\xff\x00\xfe");
    }

    #[test]
    fn non_utf8_labels_are_distinct() {
        let mut heap = Heap::new();
        let ff = heap.make_node(b"\xff").unwrap();
        let fe = heap.make_node(b"\xfe").unwrap();
        assert!(!heap.node_eq(Some(ff), Some(fe)).unwrap());

        let diff = heap.node_sub(Some(ff), Some(fe)).unwrap();
        assert_eq!(heap.label(diff).unwrap(), b"\xff");
    }

    #[test]
    fn add_and_mul_null_table() {
        let mut heap = Heap::new();
        let a = node(&mut heap, "ab");

        let both = heap.node_add(None, None).unwrap();
        assert_eq!(heap.label(both).unwrap(), b"");

        let left_only = heap.node_add(Some(a), None).unwrap();
        let right_only = heap.node_mul(None, Some(a)).unwrap();
        assert_eq!(heap.label(left_only).unwrap(), b"ab");
        assert_eq!(heap.label(right_only).unwrap(), b"ab");
        // A copy, never the same node.
        assert_ne!(left_only, a);
    }

    #[test]
    fn sub_and_div_null_table() {
        let mut heap = Heap::new();
        let a = node(&mut heap, "abc");

        let no_left = heap.node_sub(None, Some(a)).unwrap();
        assert_eq!(heap.label(no_left).unwrap(), b"");

        let no_right = heap.node_div(Some(a), None).unwrap();
        assert_eq!(heap.label(no_right).unwrap(), b"abc");
    }

    #[test]
    fn lifted_ops_use_labels() {
        let mut heap = Heap::new();
        let a = node(&mut heap, "ab");
        let b = node(&mut heap, "cd");
        let c = node(&mut heap, "b");

        let sum = heap.node_add(Some(a), Some(b)).unwrap();
        let product = heap.node_mul(Some(a), Some(b)).unwrap();
        let diff = heap.node_sub(Some(a), Some(c)).unwrap();
        assert_eq!(heap.label(sum).unwrap(), b"abcd");
        assert_eq!(heap.label(product).unwrap(), b"acbd");
        assert_eq!(heap.label(diff).unwrap(), b"a");
    }

    #[test]
    fn equality_is_by_label() {
        let mut heap = Heap::new();
        let a1 = node(&mut heap, "A");
        let a2 = node(&mut heap, "A");
        let b = node(&mut heap, "B");

        assert!(heap.node_eq(Some(a1), Some(a2)).unwrap());
        assert!(heap.node_eq(Some(a1), Some(a1)).unwrap());
        assert!(!heap.node_eq(Some(a1), Some(b)).unwrap());
        assert!(heap.node_ne(Some(a1), Some(b)).unwrap());
    }

    #[test]
    fn null_nodes_are_never_equal() {
        let mut heap = Heap::new();
        let a = node(&mut heap, "A");
        assert!(!heap.node_eq(None, None).unwrap());
        assert!(!heap.node_eq(Some(a), None).unwrap());
        assert!(heap.node_ne(None, None).unwrap());
    }

    #[test]
    fn stale_handle_is_an_error() {
        let heap = Heap::new();
        assert_eq!(
            heap.node_eq(Some(NodeId(9)), None),
            Err(CoreError::NodeNotFound { id: NodeId(9) })
        );
    }

    proptest! {
        #[test]
        fn node_sum_label_is_string_sum(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
            let mut heap = Heap::new();
            let na = heap.make_node(&a).unwrap();
            let nb = heap.make_node(&b).unwrap();
            let sum = heap.node_add(Some(na), Some(nb)).unwrap();
            let expected = format!("{a}{b}");
            prop_assert_eq!(heap.label(sum).unwrap(), expected.as_bytes());
        }
    }
}
