//! Label-level snapshots of graphs.
//!
//! A [`GraphSnapshot`] records a graph as plain labels, independent of any
//! heap, so it can be stored as JSON and rebuilt later. Snapshot labels are
//! text; a graph holding a label that is not UTF-8 cannot be captured.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::heap::Heap;
use crate::id::{GraphId, NodeId};

/// Node labels in order, and arcs as `(from, to)` label pairs in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<String>,
    #[serde(default)]
    pub arcs: Vec<(String, String)>,
}

impl GraphSnapshot {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl Heap {
    /// Captures the labels of `g`.
    pub fn snapshot(&self, g: GraphId) -> Result<GraphSnapshot, CoreError> {
        let graph = self.graph(g)?;
        let mut snap = GraphSnapshot::default();
        for &node in graph.nodes() {
            snap.nodes.push(text_label(self.label(node)?)?);
        }
        for &arc in graph.arcs() {
            let (from, to) = self.arc_labels(arc)?;
            snap.arcs.push((text_label(from)?, text_label(to)?));
        }
        Ok(snap)
    }

    /// Builds a new graph from a snapshot.
    ///
    /// One node is created per listed label. Arc endpoints resolve to the
    /// first listed node with that label; an endpoint label that is not
    /// listed gets a single node object shared by every arc naming it, which
    /// is not added to the node list.
    pub fn load_snapshot(&mut self, snap: &GraphSnapshot) -> Result<GraphId, CoreError> {
        let g = self.make_graph()?;
        let mut by_label: HashMap<&str, NodeId> = HashMap::new();

        for label in &snap.nodes {
            let node = self.make_node(label)?;
            self.add_node(Some(g), Some(node))?;
            by_label.entry(label.as_str()).or_insert(node);
        }
        for (from, to) in &snap.arcs {
            let from = self.endpoint(&mut by_label, from)?;
            let to = self.endpoint(&mut by_label, to)?;
            let arc = self.make_arc(from, to)?;
            self.add_arc(Some(g), Some(arc))?;
        }

        tracing::debug!(
            graph = %g,
            nodes = snap.nodes.len(),
            arcs = snap.arcs.len(),
            "loaded graph snapshot"
        );
        Ok(g)
    }

    fn endpoint<'s>(
        &mut self,
        by_label: &mut HashMap<&'s str, NodeId>,
        label: &'s str,
    ) -> Result<NodeId, CoreError> {
        if let Some(&node) = by_label.get(label) {
            return Ok(node);
        }
        let node = self.make_node(label)?;
        by_label.insert(label, node);
        Ok(node)
    }
}

fn text_label(label: &[u8]) -> Result<String, CoreError> {
    std::str::from_utf8(label)
        .map(str::to_owned)
        .map_err(|err| CoreError::InvalidOperand {
            op: "snapshot",
            reason: format!("label is not valid UTF-8: {err}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn abc() -> GraphSnapshot {
        GraphSnapshot {
            nodes: vec!["A".into(), "B".into(), "C".into()],
            arcs: vec![("A".into(), "B".into()), ("B".into(), "C".into())],
        }
    }

    #[test]
    fn load_then_snapshot_preserves_labels() {
        let mut heap = Heap::new();
        let g = heap.load_snapshot(&abc()).unwrap();
        assert_eq!(heap.snapshot(g).unwrap(), abc());
    }

    #[test]
    fn arcs_share_listed_nodes() {
        let mut heap = Heap::new();
        let g = heap.load_snapshot(&abc()).unwrap();
        let graph = heap.graph(g).unwrap();
        let b = graph.nodes()[1];
        let first = *heap.arc(graph.arcs()[0]).unwrap();
        let second = *heap.arc(graph.arcs()[1]).unwrap();
        assert_eq!(first.to, b);
        assert_eq!(second.from, b);
    }

    #[test]
    fn unlisted_endpoints_are_created_once() {
        let mut heap = Heap::new();
        let snap = GraphSnapshot {
            nodes: vec!["A".into()],
            arcs: vec![("A".into(), "X".into()), ("X".into(), "A".into())],
        };
        let g = heap.load_snapshot(&snap).unwrap();
        let graph = heap.graph(g).unwrap();
        assert_eq!(graph.nodes().len(), 1);

        let out = *heap.arc(graph.arcs()[0]).unwrap();
        let back = *heap.arc(graph.arcs()[1]).unwrap();
        assert_eq!(out.to, back.from);
        assert_eq!(heap.label(out.to).unwrap(), b"X");
    }

    #[test]
    fn non_utf8_label_cannot_be_captured() {
        let mut heap = Heap::new();
        let n = heap.make_node(b"\xff").unwrap();
        let g = heap.mk_graph(Some(n), None).unwrap();
        assert!(matches!(
            heap.snapshot(g),
            Err(CoreError::InvalidOperand { op: "snapshot", .. })
        ));
    }

    #[test]
    fn json_shape() {
        let value = serde_json::to_value(abc()).unwrap();
        assert_eq!(
            value,
            json!({
                "nodes": ["A", "B", "C"],
                "arcs": [["A", "B"], ["B", "C"]]
            })
        );
    }

    #[test]
    fn arcs_default_to_empty() {
        let snap = GraphSnapshot::from_json(r#"{ "nodes": ["A"] }"#).unwrap();
        assert!(snap.arcs.is_empty());
        let text = snap.to_json_pretty().unwrap();
        assert_eq!(GraphSnapshot::from_json(&text).unwrap(), snap);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(GraphSnapshot::from_json(r#"{ "nodes": "A" }"#).is_err());
    }
}
