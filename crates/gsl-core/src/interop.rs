//! Conversion to petgraph.

use std::collections::HashMap;

use petgraph::graph::{Graph as PetGraph, NodeIndex};

use crate::error::CoreError;
use crate::heap::Heap;
use crate::id::GraphId;

impl Heap {
    /// Builds a directed petgraph graph from `g`.
    ///
    /// Node `i` of the result is node entry `i` of `g`, weighted with its
    /// label. Each arc becomes an edge between the first entries carrying
    /// its endpoint labels; arcs with an endpoint outside the node list are
    /// left out.
    pub fn to_petgraph(&self, g: GraphId) -> Result<PetGraph<Vec<u8>, ()>, CoreError> {
        let graph = self.graph(g)?;
        let mut out = PetGraph::with_capacity(graph.nodes().len(), graph.arcs().len());
        let mut first: HashMap<&[u8], NodeIndex> = HashMap::new();

        for &node in graph.nodes() {
            let label = self.label(node)?;
            let ix = out.add_node(label.to_vec());
            first.entry(label).or_insert(ix);
        }
        for &arc in graph.arcs() {
            let (from, to) = self.arc_labels(arc)?;
            if let (Some(&a), Some(&b)) = (first.get(from), first.get(to)) {
                out.add_edge(a, b, ());
            }
        }
        Ok(out)
    }
}
