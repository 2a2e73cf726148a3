//! Canonical text renderings of values.
//!
//! These are the formats a generated program prints. The adapters borrow the
//! heap and render lazily; they never perform I/O. A handle the heap does
//! not know renders like an absent value. Label bytes that are not UTF-8
//! render as U+FFFD.

use std::borrow::Cow;
use std::fmt;

use crate::heap::Heap;
use crate::id::{ArcId, GraphId, NodeId};
use crate::value::Value;

const NULL_LABEL: &str = "(null)";

/// Renders as `node(<label>)` or `node(null)`.
pub struct NodeDisplay<'h> {
    heap: &'h Heap,
    node: Option<NodeId>,
}

/// Renders as `arc(<from>-><to>)` or `arc(null)`.
pub struct ArcDisplay<'h> {
    heap: &'h Heap,
    arc: Option<ArcId>,
}

/// Renders as a multi-line `graph { ... }` block or `graph(null)`.
pub struct GraphDisplay<'h> {
    heap: &'h Heap,
    graph: Option<GraphId>,
}

/// Renders any [`Value`] in its kind's format.
pub struct ValueDisplay<'h> {
    heap: &'h Heap,
    value: &'h Value,
}

impl Heap {
    pub fn display_node(&self, node: Option<NodeId>) -> NodeDisplay<'_> {
        NodeDisplay { heap: self, node }
    }

    pub fn display_arc(&self, arc: Option<ArcId>) -> ArcDisplay<'_> {
        ArcDisplay { heap: self, arc }
    }

    pub fn display_graph(&self, graph: Option<GraphId>) -> GraphDisplay<'_> {
        GraphDisplay { heap: self, graph }
    }

    pub fn display_value<'h>(&'h self, value: &'h Value) -> ValueDisplay<'h> {
        ValueDisplay { heap: self, value }
    }

    fn label_or_null(&self, node: NodeId) -> Cow<'_, str> {
        match self.label(node) {
            Ok(label) => String::from_utf8_lossy(label),
            Err(_) => Cow::Borrowed(NULL_LABEL),
        }
    }

    fn write_arc_body(&self, f: &mut fmt::Formatter<'_>, arc: ArcId) -> fmt::Result {
        match self.arc(arc) {
            Ok(arc) => write!(
                f,
                "{}->{}",
                self.label_or_null(arc.from),
                self.label_or_null(arc.to)
            ),
            Err(_) => write!(f, "{NULL_LABEL}->{NULL_LABEL}"),
        }
    }
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.map(|n| self.heap.label(n)) {
            Some(Ok(label)) => write!(f, "node({})", String::from_utf8_lossy(label)),
            _ => f.write_str("node(null)"),
        }
    }
}

impl fmt::Display for ArcDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arc {
            Some(arc) if self.heap.arc(arc).is_ok() => {
                f.write_str("arc(")?;
                self.heap.write_arc_body(f, arc)?;
                f.write_str(")")
            }
            _ => f.write_str("arc(null)"),
        }
    }
}

impl fmt::Display for GraphDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(graph) = self.graph.and_then(|g| self.heap.graph(g).ok()) else {
            return f.write_str("graph(null)");
        };

        writeln!(f, "graph {{")?;
        f.write_str("  nodes: [")?;
        for (i, &node) in graph.nodes().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{}\"", self.heap.label_or_null(node))?;
        }
        writeln!(f, "]")?;

        f.write_str("  arcs: [")?;
        for (i, &arc) in graph.arcs().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("(")?;
            self.heap.write_arc_body(f, arc)?;
            f.write_str(")")?;
        }
        writeln!(f, "]")?;
        f.write_str("}")
    }
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Str(Some(s)) => f.write_str(&String::from_utf8_lossy(s)),
            Value::Str(None) => f.write_str(NULL_LABEL),
            Value::Node(n) => write!(f, "{}", self.heap.display_node(*n)),
            Value::Arc(a) => write!(f, "{}", self.heap.display_arc(*a)),
            Value::Graph(g) => write!(f, "{}", self.heap.display_graph(*g)),
            Value::Int(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(heap: &mut Heap) -> GraphId {
        let g = heap.make_graph().unwrap();
        let a = heap.make_node("A").unwrap();
        let b = heap.make_node("B").unwrap();
        let c = heap.make_node("C").unwrap();
        for n in [a, b, c] {
            heap.add_node(Some(g), Some(n)).unwrap();
        }
        let ab = heap.make_arc(a, b).unwrap();
        let bc = heap.make_arc(b, c).unwrap();
        heap.add_arc(Some(g), Some(ab)).unwrap();
        heap.add_arc(Some(g), Some(bc)).unwrap();
        g
    }

    #[test]
    fn node_and_arc_formats() {
        let mut heap = Heap::new();
        let a = heap.make_node("A").unwrap();
        let b = heap.make_node("B").unwrap();
        let ab = heap.make_arc(a, b).unwrap();

        assert_eq!(heap.display_node(Some(a)).to_string(), "node(A)");
        assert_eq!(heap.display_node(None).to_string(), "node(null)");
        assert_eq!(heap.display_arc(Some(ab)).to_string(), "arc(A->B)");
        assert_eq!(heap.display_arc(None).to_string(), "arc(null)");
    }

    #[test]
    fn graph_format() {
        let mut heap = Heap::new();
        let g = sample(&mut heap);
        insta::assert_snapshot!(heap.display_graph(Some(g)).to_string(), @r#"
graph {
  nodes: ["A", "B", "C"]
  arcs: [(A->B), (B->C)]
}
"#);
    }

    #[test]
    fn bfs_result_format() {
        let mut heap = Heap::new();
        let g = sample(&mut heap);
        let start = heap.get_node(Some(g), 1).unwrap();
        let r = heap.bfs(Some(g), start).unwrap();
        insta::assert_snapshot!(heap.display_graph(Some(r)).to_string(), @r#"
graph {
  nodes: ["B", "C"]
  arcs: [(B->C)]
}
"#);
    }

    #[test]
    fn empty_and_null_graphs() {
        let mut heap = Heap::new();
        let g = heap.make_graph().unwrap();
        assert_eq!(
            heap.display_graph(Some(g)).to_string(),
            "graph {\n  nodes: []\n  arcs: []\n}"
        );
        assert_eq!(heap.display_graph(None).to_string(), "graph(null)");
    }

    #[test]
    fn invalid_utf8_renders_replacement() {
        let mut heap = Heap::new();
        let n = heap.make_node(b"a\xffb").unwrap();
        assert_eq!(heap.display_node(Some(n)).to_string(), "node(a\u{fffd}b)");
        let raw: &[u8] = b"\xfe";
        assert_eq!(heap.display_value(&Value::from(raw)).to_string(), "\u{fffd}");
    }

    #[test]
    fn unknown_handles_render_as_null() {
        let heap = Heap::new();
        assert_eq!(heap.display_node(Some(NodeId(3))).to_string(), "node(null)");
        assert_eq!(heap.display_arc(Some(ArcId(0))).to_string(), "arc(null)");
        assert_eq!(heap.display_graph(Some(GraphId(1))).to_string(), "graph(null)");
    }

    #[test]
    fn value_formats() {
        let mut heap = Heap::new();
        let n = heap.make_node("x").unwrap();
        let values = [
            Value::from("hi"),
            Value::Str(None),
            Value::Int(-3),
            Value::Bool(true),
            Value::from(n),
            Value::Arc(None),
        ];
        let rendered: Vec<String> = values
            .iter()
            .map(|v| heap.display_value(v).to_string())
            .collect();
        assert_eq!(rendered, ["hi", "(null)", "-3", "true", "node(x)", "arc(null)"]);
    }
}
