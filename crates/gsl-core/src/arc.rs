//! Arc construction and component-wise arc arithmetic.

use crate::error::CoreError;
use crate::heap::{Arc, Heap};
use crate::id::{ArcId, NodeId};
use crate::ops::{ArithOp, CmpOp};

impl Heap {
    /// Builds an arc referencing `from` and `to` as they are (no copies).
    pub fn make_arc(&mut self, from: NodeId, to: NodeId) -> Result<ArcId, CoreError> {
        self.node(from)?;
        self.node(to)?;
        self.alloc_arc(Arc { from, to })
    }

    /// Applies an arithmetic operator endpoint-wise:
    /// `a op b = arc(a.from op b.from, a.to op b.to)`.
    ///
    /// Unlike nodes, arcs have no identity element: an absent operand is
    /// [`CoreError::InvalidOperand`].
    pub fn arc_arith(
        &mut self,
        op: ArithOp,
        a: Option<ArcId>,
        b: Option<ArcId>,
    ) -> Result<ArcId, CoreError> {
        let (a, b) = match (a, b) {
            (Some(a), Some(b)) => (*self.arc(a)?, *self.arc(b)?),
            (None, _) => return Err(null_operand(op, "left")),
            (_, None) => return Err(null_operand(op, "right")),
        };
        let from = self.node_arith(op, Some(a.from), Some(b.from))?;
        let to = self.node_arith(op, Some(a.to), Some(b.to))?;
        self.alloc_arc(Arc { from, to })
    }

    pub fn arc_add(&mut self, a: Option<ArcId>, b: Option<ArcId>) -> Result<ArcId, CoreError> {
        self.arc_arith(ArithOp::Add, a, b)
    }

    pub fn arc_sub(&mut self, a: Option<ArcId>, b: Option<ArcId>) -> Result<ArcId, CoreError> {
        self.arc_arith(ArithOp::Sub, a, b)
    }

    pub fn arc_mul(&mut self, a: Option<ArcId>, b: Option<ArcId>) -> Result<ArcId, CoreError> {
        self.arc_arith(ArithOp::Mul, a, b)
    }

    pub fn arc_div(&mut self, a: Option<ArcId>, b: Option<ArcId>) -> Result<ArcId, CoreError> {
        self.arc_arith(ArithOp::Div, a, b)
    }

    pub fn arc_cmp(&self, op: CmpOp, a: Option<ArcId>, b: Option<ArcId>) -> Result<bool, CoreError> {
        Ok(op.resolve(self.arc_eq(a, b)?))
    }

    /// `a == b`: both present and both endpoints label-equal.
    pub fn arc_eq(&self, a: Option<ArcId>, b: Option<ArcId>) -> Result<bool, CoreError> {
        let (Some(a), Some(b)) = (a, b) else {
            return Ok(false);
        };
        Ok(self.arc_labels(a)? == self.arc_labels(b)?)
    }

    pub fn arc_ne(&self, a: Option<ArcId>, b: Option<ArcId>) -> Result<bool, CoreError> {
        self.arc_cmp(CmpOp::Ne, a, b)
    }
}

fn null_operand(op: ArithOp, side: &str) -> CoreError {
    CoreError::InvalidOperand {
        op: match op {
            ArithOp::Add => "arc +",
            ArithOp::Sub => "arc -",
            ArithOp::Mul => "arc *",
            ArithOp::Div => "arc /",
        },
        reason: format!("{side} operand is null"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(heap: &mut Heap, from: &str, to: &str) -> ArcId {
        let f = heap.make_node(from).unwrap();
        let t = heap.make_node(to).unwrap();
        heap.make_arc(f, t).unwrap()
    }

    fn ends(heap: &Heap, a: ArcId) -> (String, String) {
        let (from, to) = heap.arc_labels(a).unwrap();
        (
            String::from_utf8(from.to_vec()).unwrap(),
            String::from_utf8(to.to_vec()).unwrap(),
        )
    }

    #[test]
    fn make_arc_shares_endpoints() {
        let mut heap = Heap::new();
        let a = heap.make_node("A").unwrap();
        let b = heap.make_node("B").unwrap();
        let ab = heap.make_arc(a, b).unwrap();
        let loop_a = heap.make_arc(a, a).unwrap();

        assert_eq!(heap.arc(ab).unwrap().from, a);
        assert_eq!(heap.arc(loop_a).unwrap().to, a);
        // No node was copied.
        assert_eq!(heap.node_count(), 2);
    }

    #[test]
    fn make_arc_rejects_foreign_nodes() {
        let mut heap = Heap::new();
        let a = heap.make_node("A").unwrap();
        assert_eq!(
            heap.make_arc(a, NodeId(5)),
            Err(CoreError::NodeNotFound { id: NodeId(5) })
        );
    }

    #[test]
    fn arithmetic_is_component_wise() {
        let mut heap = Heap::new();
        let x = arc(&mut heap, "ab", "xy");
        let y = arc(&mut heap, "cd", "y");

        let sum = heap.arc_add(Some(x), Some(y)).unwrap();
        assert_eq!(ends(&heap, sum), ("abcd".to_owned(), "xyy".to_owned()));

        let product = heap.arc_mul(Some(x), Some(y)).unwrap();
        assert_eq!(ends(&heap, product), ("acbd".to_owned(), "xyy".to_owned()));

        let diff = heap.arc_sub(Some(x), Some(y)).unwrap();
        assert_eq!(ends(&heap, diff), ("ab".to_owned(), "x".to_owned()));

        let quotient = heap.arc_div(Some(x), Some(y)).unwrap();
        assert_eq!(ends(&heap, quotient), ("ab".to_owned(), "x".to_owned()));
    }

    #[test]
    fn null_arc_operand_is_invalid() {
        let mut heap = Heap::new();
        let x = arc(&mut heap, "a", "b");

        let err = heap.arc_add(None, Some(x)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperand { op: "arc +", .. }));
        assert_eq!(err.to_string(), "invalid operand for arc +: left operand is null");

        let err = heap.arc_div(Some(x), None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperand { op: "arc /", .. }));
    }

    #[test]
    fn equality_compares_endpoint_labels() {
        let mut heap = Heap::new();
        let x = arc(&mut heap, "A", "B");
        let y = arc(&mut heap, "A", "B");
        let z = arc(&mut heap, "B", "A");

        assert!(heap.arc_eq(Some(x), Some(y)).unwrap());
        assert!(!heap.arc_eq(Some(x), Some(z)).unwrap());
        assert!(heap.arc_ne(Some(x), Some(z)).unwrap());
        assert!(!heap.arc_eq(None, None).unwrap());
        assert!(heap.arc_ne(Some(x), None).unwrap());
    }
}
