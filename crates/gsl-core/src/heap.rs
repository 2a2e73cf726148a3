//! Heap: the arena that owns every node, arc and graph of one execution unit.
//!
//! Generated code never frees graph-language values, and nodes and arcs are
//! shared freely between arcs and graphs. Instead of tracking individual
//! lifetimes, all objects live in one [`Heap`] and are addressed by the
//! [`NodeId`], [`ArcId`] and [`GraphId`] handles. Dropping the heap releases
//! everything at once.
//!
//! Objects are append-only: a node's label and an arc's endpoints never
//! change after construction. Only graph containers are mutated, and only
//! through the container operations in [`crate::graph`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::graph::Graph;
use crate::id::{ArcId, GraphId, NodeId};

/// Configuration for a heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapConfig {
    /// Starting node and arc capacity of every new graph container.
    /// Default: 16.
    pub initial_capacity: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        HeapConfig {
            initial_capacity: 16,
        }
    }
}

/// A labeled value in the graph type system. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    label: Vec<u8>,
}

impl Node {
    pub fn new(label: impl Into<Vec<u8>>) -> Self {
        Node {
            label: label.into(),
        }
    }

    /// The label bytes, exactly as given at construction.
    pub fn label(&self) -> &[u8] {
        &self.label
    }
}

/// A directed edge between two nodes. The arc does not own its endpoints;
/// several arcs and graphs may reference the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arc {
    pub from: NodeId,
    pub to: NodeId,
}

/// Arena for graph-language values.
#[derive(Debug, Clone)]
pub struct Heap {
    config: HeapConfig,
    nodes: Vec<Node>,
    arcs: Vec<Arc>,
    graphs: Vec<Graph>,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    /// Creates an empty heap with the default configuration.
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    pub fn with_config(config: HeapConfig) -> Self {
        Heap {
            config,
            nodes: Vec::new(),
            arcs: Vec::new(),
            graphs: Vec::new(),
        }
    }

    pub fn config(&self) -> HeapConfig {
        self.config
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Looks up a node. Errors if the handle was not issued by this heap.
    pub fn node(&self, id: NodeId) -> Result<&Node, CoreError> {
        self.nodes
            .get(id.index())
            .ok_or(CoreError::NodeNotFound { id })
    }

    /// Looks up an arc. Errors if the handle was not issued by this heap.
    pub fn arc(&self, id: ArcId) -> Result<&Arc, CoreError> {
        self.arcs.get(id.index()).ok_or(CoreError::ArcNotFound { id })
    }

    /// Looks up a graph container. Errors if the handle was not issued by
    /// this heap.
    pub fn graph(&self, id: GraphId) -> Result<&Graph, CoreError> {
        self.graphs
            .get(id.index())
            .ok_or(CoreError::GraphNotFound { id })
    }

    pub(crate) fn graph_mut(&mut self, id: GraphId) -> Result<&mut Graph, CoreError> {
        self.graphs
            .get_mut(id.index())
            .ok_or(CoreError::GraphNotFound { id })
    }

    /// Returns the label of a node.
    pub fn label(&self, id: NodeId) -> Result<&[u8], CoreError> {
        self.node(id).map(Node::label)
    }

    /// Returns the `(from, to)` labels of an arc.
    pub fn arc_labels(&self, id: ArcId) -> Result<(&[u8], &[u8]), CoreError> {
        let arc = self.arc(id)?;
        Ok((self.label(arc.from)?, self.label(arc.to)?))
    }

    /// Label of an optional node; an absent node has no label.
    pub(crate) fn label_of(&self, id: Option<NodeId>) -> Result<Option<&[u8]>, CoreError> {
        id.map(|id| self.label(id)).transpose()
    }

    /// Number of nodes allocated so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of arcs allocated so far.
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Number of graph containers allocated so far.
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    // -----------------------------------------------------------------------
    // Allocation
    // -----------------------------------------------------------------------

    pub(crate) fn alloc_node(&mut self, node: Node) -> Result<NodeId, CoreError> {
        let id = NodeId(next_index(self.nodes.len(), "node")?);
        push_checked(&mut self.nodes, node, "node")?;
        Ok(id)
    }

    pub(crate) fn alloc_arc(&mut self, arc: Arc) -> Result<ArcId, CoreError> {
        let id = ArcId(next_index(self.arcs.len(), "arc")?);
        push_checked(&mut self.arcs, arc, "arc")?;
        Ok(id)
    }

    pub(crate) fn alloc_graph(&mut self, graph: Graph) -> Result<GraphId, CoreError> {
        let id = GraphId(next_index(self.graphs.len(), "graph")?);
        push_checked(&mut self.graphs, graph, "graph")?;
        Ok(id)
    }

    /// A fresh, unregistered container with the configured capacity.
    pub(crate) fn blank_graph(&self) -> Result<Graph, CoreError> {
        Graph::with_capacity(self.config.initial_capacity)
    }
}

/// Appends to a vector, surfacing allocation failure instead of aborting.
pub(crate) fn push_checked<T>(
    vec: &mut Vec<T>,
    value: T,
    what: &'static str,
) -> Result<(), CoreError> {
    vec.try_reserve(1)
        .map_err(|_| CoreError::ResourceExhausted { what })?;
    vec.push(value);
    Ok(())
}

/// Copies `bytes` into a new buffer, surfacing allocation failure.
pub(crate) fn copy_checked(bytes: &[u8], what: &'static str) -> Result<Vec<u8>, CoreError> {
    let mut out = Vec::new();
    out.try_reserve_exact(bytes.len())
        .map_err(|_| CoreError::ResourceExhausted { what })?;
    out.extend_from_slice(bytes);
    Ok(out)
}

fn next_index(len: usize, what: &'static str) -> Result<u32, CoreError> {
    u32::try_from(len).map_err(|_| CoreError::ResourceExhausted { what })
}
