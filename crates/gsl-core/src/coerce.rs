//! Coercions between value kinds.
//!
//! Two families: the string/int conversions, and the widening chain
//! string -> node -> arc -> graph that promotes a value to the next larger
//! kind.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::heap::Heap;
use crate::id::{ArcId, GraphId, NodeId};

/// The kinds of value the language manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Str,
    Int,
    Bool,
    Node,
    Arc,
    Graph,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Str => "string",
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::Node => "node",
            ValueKind::Arc => "arc",
            ValueKind::Graph => "graph",
        }
    }

    /// Whether a value of this kind may be cast to `target`.
    pub fn can_cast_to(self, target: ValueKind) -> bool {
        use ValueKind::*;
        self == target
            || matches!(
                (self, target),
                (Str, Int) | (Int, Str) | (Str, Node) | (Node, Arc) | (Arc, Graph)
            )
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the leading integer of `s` the way C `atoi` does: leading
/// whitespace is skipped, an optional sign is accepted, and the longest run
/// of digits is read. Anything else, including an absent string, yields 0.
/// Values outside `i32` saturate.
pub fn string_to_int(s: Option<&[u8]>) -> i32 {
    let Some(s) = s else {
        return 0;
    };
    let start = s
        .iter()
        .position(|b| !is_c_space(*b))
        .unwrap_or(s.len());
    let mut bytes = s[start..].iter().copied().peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        value = value * 10 + i64::from(b - b'0');
        if value > i64::from(i32::MAX) + 1 {
            break;
        }
    }
    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// The bytes C `isspace` accepts in the "C" locale.
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// Decimal rendering of `x`.
pub fn int_to_string(x: i32) -> String {
    x.to_string()
}

impl Heap {
    /// Wraps a string as a node. An absent string yields an empty label.
    pub fn string_to_node(&mut self, s: Option<&[u8]>) -> Result<NodeId, CoreError> {
        self.make_node(s.unwrap_or_default())
    }

    /// The self-loop arc `n -> n`; absent for an absent node.
    pub fn node_to_arc(&mut self, n: Option<NodeId>) -> Result<Option<ArcId>, CoreError> {
        match n {
            Some(n) => self.make_arc(n, n).map(Some),
            None => Ok(None),
        }
    }

    /// A graph holding only `a` in its arc list; empty for an absent arc.
    pub fn arc_to_graph(&mut self, a: Option<ArcId>) -> Result<GraphId, CoreError> {
        self.mk_graph(None, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(text: &str) -> Option<&[u8]> {
        Some(text.as_bytes())
    }

    #[test]
    fn parses_like_atoi() {
        assert_eq!(string_to_int(s("42")), 42);
        assert_eq!(string_to_int(s("  -17abc")), -17);
        assert_eq!(string_to_int(s("+8")), 8);
        assert_eq!(string_to_int(s("abc")), 0);
        assert_eq!(string_to_int(s("")), 0);
        assert_eq!(string_to_int(s("-")), 0);
        assert_eq!(string_to_int(s("12 34")), 12);
        assert_eq!(string_to_int(None), 0);
    }

    #[test]
    fn atoi_reads_raw_bytes() {
        let vertical_tab: &[u8] = b"\x0b\t 7";
        let trailing_junk: &[u8] = b"5\xff";
        let leading_junk: &[u8] = b"\xff5";
        assert_eq!(string_to_int(Some(vertical_tab)), 7);
        assert_eq!(string_to_int(Some(trailing_junk)), 5);
        assert_eq!(string_to_int(Some(leading_junk)), 0);
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(string_to_int(s("99999999999")), i32::MAX);
        assert_eq!(string_to_int(s("-99999999999")), i32::MIN);
        assert_eq!(string_to_int(s("-2147483648")), i32::MIN);
        assert_eq!(string_to_int(s("2147483648")), i32::MAX);
    }

    #[test]
    fn renders_decimal() {
        assert_eq!(int_to_string(0), "0");
        assert_eq!(int_to_string(-305), "-305");
    }

    #[test]
    fn widening_chain() {
        let mut heap = Heap::new();
        let n = heap.string_to_node(s("A")).unwrap();
        assert_eq!(heap.label(n).unwrap(), b"A");

        let a = heap.node_to_arc(Some(n)).unwrap().unwrap();
        let arc = *heap.arc(a).unwrap();
        assert_eq!((arc.from, arc.to), (n, n));

        let g = heap.arc_to_graph(Some(a)).unwrap();
        assert_eq!(heap.graph(g).unwrap().arcs(), [a]);
        assert_eq!(heap.size(Some(g)).unwrap(), 0);
    }

    #[test]
    fn widening_absent_values() {
        let mut heap = Heap::new();
        let n = heap.string_to_node(None).unwrap();
        assert_eq!(heap.label(n).unwrap(), b"");
        assert_eq!(heap.node_to_arc(None).unwrap(), None);
        let g = heap.arc_to_graph(None).unwrap();
        assert_eq!(heap.arc_len(Some(g)).unwrap(), 0);
    }

    #[test]
    fn cast_lattice() {
        use ValueKind::*;
        assert!(Str.can_cast_to(Int));
        assert!(Int.can_cast_to(Str));
        assert!(Str.can_cast_to(Node));
        assert!(Node.can_cast_to(Arc));
        assert!(Arc.can_cast_to(Graph));
        assert!(Graph.can_cast_to(Graph));
        assert!(!Graph.can_cast_to(Arc));
        assert!(!Str.can_cast_to(Graph));
        assert!(!Bool.can_cast_to(Int));
    }

    proptest! {
        #[test]
        fn int_round_trips_through_string(x in any::<i32>()) {
            prop_assert_eq!(string_to_int(s(&int_to_string(x))), x);
        }
    }
}
