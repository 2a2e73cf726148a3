//! Graph: an ordered, growable, non-owning collection of nodes and arcs.
//!
//! A [`Graph`] holds node and arc handles only; the objects themselves live
//! in the [`Heap`]. Insertion order is observable (display, iteration and
//! traversal order all depend on it). Duplicate labels and duplicate arcs
//! are allowed and never de-duplicated.
//!
//! Matching for deletion, membership and equality is by label: a node
//! matches when its label is equal, an arc when its `(from, to)` label pair
//! is equal.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::heap::{push_checked, Heap};
use crate::id::{ArcId, GraphId, NodeId};
use crate::ops::{ArithOp, CmpOp};

/// Node and arc lists of one graph value.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeId>,
    arcs: Vec<ArcId>,
}

impl Graph {
    /// Empty lists with room for `capacity` entries each. Growth doubles.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, CoreError> {
        let mut graph = Graph::default();
        graph
            .nodes
            .try_reserve_exact(capacity)
            .map_err(|_| CoreError::ResourceExhausted { what: "graph nodes" })?;
        graph
            .arcs
            .try_reserve_exact(capacity)
            .map_err(|_| CoreError::ResourceExhausted { what: "graph arcs" })?;
        Ok(graph)
    }

    /// Node handles in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Arc handles in insertion order.
    pub fn arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    pub fn node_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn arc_capacity(&self) -> usize {
        self.arcs.capacity()
    }

    pub(crate) fn push_node(&mut self, node: NodeId) -> Result<(), CoreError> {
        push_checked(&mut self.nodes, node, "graph nodes")
    }

    pub(crate) fn push_arc(&mut self, arc: ArcId) -> Result<(), CoreError> {
        push_checked(&mut self.arcs, arc, "graph arcs")
    }
}

/// The entries of `items` accepted by `keep`, in order, in a vector with
/// room for `capacity` entries.
fn retain_checked<T: Copy>(
    items: &[T],
    capacity: usize,
    what: &'static str,
    mut keep: impl FnMut(T) -> Result<bool, CoreError>,
) -> Result<Vec<T>, CoreError> {
    let mut out = Vec::new();
    out.try_reserve_exact(capacity.max(items.len()))
        .map_err(|_| CoreError::ResourceExhausted { what })?;
    for &item in items {
        if keep(item)? {
            out.push(item);
        }
    }
    Ok(out)
}

impl Heap {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// An empty graph.
    pub fn make_graph(&mut self) -> Result<GraphId, CoreError> {
        let graph = self.blank_graph()?;
        self.alloc_graph(graph)
    }

    /// An empty graph with `node` and/or `arc` appended when present.
    pub fn mk_graph(
        &mut self,
        node: Option<NodeId>,
        arc: Option<ArcId>,
    ) -> Result<GraphId, CoreError> {
        let mut graph = self.blank_graph()?;
        if let Some(node) = node {
            self.node(node)?;
            graph.push_node(node)?;
        }
        if let Some(arc) = arc {
            self.arc(arc)?;
            graph.push_arc(arc)?;
        }
        self.alloc_graph(graph)
    }

    /// A new container referencing the same node and arc objects, in the
    /// same order.
    pub fn copy_shallow(&mut self, g: GraphId) -> Result<GraphId, CoreError> {
        let graph = self.shallow(g)?;
        self.alloc_graph(graph)
    }

    fn shallow(&self, g: GraphId) -> Result<Graph, CoreError> {
        let source = self.graph(g)?;
        let mut graph = self.blank_graph()?;
        for &node in source.nodes() {
            graph.push_node(node)?;
        }
        for &arc in source.arcs() {
            graph.push_arc(arc)?;
        }
        Ok(graph)
    }

    /// Shallow copy of an optional graph; absent yields an empty graph.
    fn shallow_or_empty(&self, g: Option<GraphId>) -> Result<Graph, CoreError> {
        match g {
            Some(g) => self.shallow(g),
            None => self.blank_graph(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Appends `n` to `g`, returning `g`. An absent graph is replaced by a
    /// fresh one; an absent node appends nothing.
    pub fn add_node(
        &mut self,
        g: Option<GraphId>,
        n: Option<NodeId>,
    ) -> Result<GraphId, CoreError> {
        let g = match g {
            Some(g) => {
                self.graph(g)?;
                g
            }
            None => self.make_graph()?,
        };
        if let Some(n) = n {
            self.node(n)?;
            self.graph_mut(g)?.push_node(n)?;
        }
        Ok(g)
    }

    /// Appends `a` to `g`, returning `g`. An absent graph is replaced by a
    /// fresh one; an absent arc appends nothing.
    pub fn add_arc(&mut self, g: Option<GraphId>, a: Option<ArcId>) -> Result<GraphId, CoreError> {
        let g = match g {
            Some(g) => {
                self.graph(g)?;
                g
            }
            None => self.make_graph()?,
        };
        if let Some(a) = a {
            self.arc(a)?;
            self.graph_mut(g)?.push_arc(a)?;
        }
        Ok(g)
    }

    /// Removes every node labeled like `n` and every arc touching that label.
    /// Survivors keep their relative order. No-op if either side is absent.
    pub fn delete_node(
        &mut self,
        g: Option<GraphId>,
        n: Option<NodeId>,
    ) -> Result<Option<GraphId>, CoreError> {
        let (Some(gid), Some(n)) = (g, n) else {
            return Ok(g);
        };
        let label = self.label(n)?;
        let graph = self.graph(gid)?;

        let nodes = retain_checked(
            &graph.nodes,
            graph.nodes.capacity(),
            "graph nodes",
            |node| Ok(self.label(node)? != label),
        )?;
        let arcs = retain_checked(&graph.arcs, graph.arcs.capacity(), "graph arcs", |arc| {
            let (from, to) = self.arc_labels(arc)?;
            Ok(from != label && to != label)
        })?;

        let graph = self.graph_mut(gid)?;
        graph.nodes = nodes;
        graph.arcs = arcs;
        Ok(g)
    }

    /// Removes every arc whose `(from, to)` labels equal those of `a`.
    /// No-op if either side is absent.
    pub fn delete_arc(
        &mut self,
        g: Option<GraphId>,
        a: Option<ArcId>,
    ) -> Result<Option<GraphId>, CoreError> {
        let (Some(gid), Some(a)) = (g, a) else {
            return Ok(g);
        };
        let target = self.arc_labels(a)?;
        let graph = self.graph(gid)?;

        let arcs = retain_checked(&graph.arcs, graph.arcs.capacity(), "graph arcs", |arc| {
            Ok(self.arc_labels(arc)? != target)
        })?;

        self.graph_mut(gid)?.arcs = arcs;
        Ok(g)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The node at position `i`; absent when out of range or `g` is absent.
    pub fn get_node(&self, g: Option<GraphId>, i: i32) -> Result<Option<NodeId>, CoreError> {
        let Some(g) = g else {
            return Ok(None);
        };
        let graph = self.graph(g)?;
        Ok(usize::try_from(i)
            .ok()
            .and_then(|i| graph.nodes.get(i).copied()))
    }

    /// The `to` node of the `i`-th arc (insertion order) leaving a node
    /// labeled like `n`.
    pub fn get_neighbour(
        &self,
        g: Option<GraphId>,
        n: Option<NodeId>,
        i: i32,
    ) -> Result<Option<NodeId>, CoreError> {
        let (Some(g), Some(n)) = (g, n) else {
            return Ok(None);
        };
        let Ok(wanted) = usize::try_from(i) else {
            return Ok(None);
        };
        let label = self.label(n)?;
        let mut found = 0usize;
        for &arc in &self.graph(g)?.arcs {
            let arc = self.arc(arc)?;
            if self.label(arc.from)? == label {
                if found == wanted {
                    return Ok(Some(arc.to));
                }
                found += 1;
            }
        }
        Ok(None)
    }

    /// Whether `g` contains a node labeled like `n`.
    pub fn has_node(&self, g: Option<GraphId>, n: Option<NodeId>) -> Result<bool, CoreError> {
        let (Some(g), Some(n)) = (g, n) else {
            return Ok(false);
        };
        for &node in &self.graph(g)?.nodes {
            if self.same_label(node, n)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `g` contains an arc with the same `(from, to)` labels as `a`.
    pub fn has_arc(&self, g: Option<GraphId>, a: Option<ArcId>) -> Result<bool, CoreError> {
        let (Some(g), Some(a)) = (g, a) else {
            return Ok(false);
        };
        let target = self.arc_labels(a)?;
        for &arc in &self.graph(g)?.arcs {
            if self.arc_labels(arc)? == target {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Node count; 0 for an absent graph.
    pub fn size(&self, g: Option<GraphId>) -> Result<usize, CoreError> {
        match g {
            Some(g) => Ok(self.graph(g)?.nodes.len()),
            None => Ok(0),
        }
    }

    /// Arc count; 0 for an absent graph.
    pub fn arc_len(&self, g: Option<GraphId>) -> Result<usize, CoreError> {
        match g {
            Some(g) => Ok(self.graph(g)?.arcs.len()),
            None => Ok(0),
        }
    }

    // -----------------------------------------------------------------------
    // Lifted arithmetic
    // -----------------------------------------------------------------------

    /// Applies a graph-level arithmetic operator. Always returns a new graph.
    pub fn graph_arith(
        &mut self,
        op: ArithOp,
        a: Option<GraphId>,
        b: Option<GraphId>,
    ) -> Result<GraphId, CoreError> {
        let graph = match op {
            ArithOp::Add => self.union(a, b)?,
            ArithOp::Sub | ArithOp::Div => self.difference(a, b)?,
            ArithOp::Mul => self.product(a, b)?,
        };
        self.alloc_graph(graph)
    }

    /// Union: `a` followed by every node and arc of `b`, duplicates kept.
    pub fn graph_add(&mut self, a: Option<GraphId>, b: Option<GraphId>) -> Result<GraphId, CoreError> {
        self.graph_arith(ArithOp::Add, a, b)
    }

    /// Difference: the nodes and arcs of `a` whose labels do not appear in `b`.
    pub fn graph_sub(&mut self, a: Option<GraphId>, b: Option<GraphId>) -> Result<GraphId, CoreError> {
        self.graph_arith(ArithOp::Sub, a, b)
    }

    /// Cartesian product of node pairs and of arc pairs, combined with `+`.
    pub fn graph_mul(&mut self, a: Option<GraphId>, b: Option<GraphId>) -> Result<GraphId, CoreError> {
        self.graph_arith(ArithOp::Mul, a, b)
    }

    /// Division is graph difference.
    pub fn graph_div(&mut self, a: Option<GraphId>, b: Option<GraphId>) -> Result<GraphId, CoreError> {
        self.graph_arith(ArithOp::Div, a, b)
    }

    fn union(&self, a: Option<GraphId>, b: Option<GraphId>) -> Result<Graph, CoreError> {
        let (Some(a), Some(b)) = (a, b) else {
            return self.shallow_or_empty(a.or(b));
        };
        let mut graph = self.shallow(a)?;
        let other = self.graph(b)?;
        for &node in other.nodes() {
            graph.push_node(node)?;
        }
        for &arc in other.arcs() {
            graph.push_arc(arc)?;
        }
        Ok(graph)
    }

    fn difference(&self, a: Option<GraphId>, b: Option<GraphId>) -> Result<Graph, CoreError> {
        let Some(a) = a else {
            return self.blank_graph();
        };
        let Some(b) = b else {
            return self.shallow(a);
        };
        let left = self.graph(a)?;
        let right = self.graph(b)?;

        let mut removed_nodes = HashSet::new();
        removed_nodes
            .try_reserve(right.nodes().len())
            .map_err(|_| CoreError::ResourceExhausted { what: "label set" })?;
        for &node in right.nodes() {
            removed_nodes.insert(self.label(node)?);
        }
        let mut removed_arcs = HashSet::new();
        removed_arcs
            .try_reserve(right.arcs().len())
            .map_err(|_| CoreError::ResourceExhausted { what: "label set" })?;
        for &arc in right.arcs() {
            removed_arcs.insert(self.arc_labels(arc)?);
        }

        let mut graph = self.blank_graph()?;
        for &node in left.nodes() {
            if !removed_nodes.contains(self.label(node)?) {
                graph.push_node(node)?;
            }
        }
        for &arc in left.arcs() {
            if !removed_arcs.contains(&self.arc_labels(arc)?) {
                graph.push_arc(arc)?;
            }
        }
        Ok(graph)
    }

    /// Building the pairs only appends nodes and arcs to the heap, so the
    /// operand lists are read by position while the product grows.
    fn product(&mut self, a: Option<GraphId>, b: Option<GraphId>) -> Result<Graph, CoreError> {
        let mut graph = self.blank_graph()?;
        let (Some(a), Some(b)) = (a, b) else {
            return Ok(graph);
        };
        let (left, right) = (self.graph(a)?, self.graph(b)?);
        let (node_pairs, arc_pairs) = (
            (left.nodes.len(), right.nodes.len()),
            (left.arcs.len(), right.arcs.len()),
        );

        for i in 0..node_pairs.0 {
            for j in 0..node_pairs.1 {
                let x = self.graph(a)?.nodes[i];
                let y = self.graph(b)?.nodes[j];
                let node = self.node_add(Some(x), Some(y))?;
                graph.push_node(node)?;
            }
        }
        for i in 0..arc_pairs.0 {
            for j in 0..arc_pairs.1 {
                let x = self.graph(a)?.arcs[i];
                let y = self.graph(b)?.arcs[j];
                let arc = self.arc_add(Some(x), Some(y))?;
                graph.push_arc(arc)?;
            }
        }
        Ok(graph)
    }

    // -----------------------------------------------------------------------
    // Equality
    // -----------------------------------------------------------------------

    pub fn graph_cmp(
        &self,
        op: CmpOp,
        a: Option<GraphId>,
        b: Option<GraphId>,
    ) -> Result<bool, CoreError> {
        Ok(op.resolve(self.graph_eq(a, b)?))
    }

    /// Positional equality: same counts, node `i` label-equal to node `i`,
    /// arc `i` label-equal to arc `i`. Absent on either side is unequal.
    pub fn graph_eq(&self, a: Option<GraphId>, b: Option<GraphId>) -> Result<bool, CoreError> {
        let (Some(a), Some(b)) = (a, b) else {
            return Ok(false);
        };
        let (left, right) = (self.graph(a)?, self.graph(b)?);
        if left.nodes.len() != right.nodes.len() || left.arcs.len() != right.arcs.len() {
            return Ok(false);
        }
        for (&x, &y) in left.nodes.iter().zip(&right.nodes) {
            if !self.same_label(x, y)? {
                return Ok(false);
            }
        }
        for (&x, &y) in left.arcs.iter().zip(&right.arcs) {
            if self.arc_labels(x)? != self.arc_labels(y)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn graph_ne(&self, a: Option<GraphId>, b: Option<GraphId>) -> Result<bool, CoreError> {
        self.graph_cmp(CmpOp::Ne, a, b)
    }
}
