//! Reachability and shortest-path traversals over a graph container.
//!
//! Traversals work on positions in the graph's node list. A node label is
//! resolved to a position by label match; with duplicate labels, arc
//! destinations and traversal starts resolve to the first match. Every
//! traversal returns a new graph and treats an unknown start or end as an
//! empty result, never an error.
//!
//! Each traversal first walks the graph under a shared borrow and only then
//! allocates the result, so the walk never observes its own output.

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::graph::Graph;
use crate::heap::{push_checked, Heap};
use crate::id::{ArcId, GraphId, NodeId};

/// Label lookup for one graph.
struct LabelIndex<'h> {
    /// label -> (first position, last position)
    positions: IndexMap<&'h [u8], (usize, usize)>,
    /// label -> outgoing arcs in insertion order, with the resolved
    /// destination position when the destination label is in the graph
    outgoing: IndexMap<&'h [u8], Vec<(ArcId, Option<usize>)>>,
}

impl<'h> LabelIndex<'h> {
    fn build(heap: &'h Heap, graph: &Graph) -> Result<Self, CoreError> {
        let mut positions: IndexMap<&[u8], (usize, usize)> = IndexMap::new();
        positions
            .try_reserve(graph.nodes().len())
            .map_err(|_| CoreError::ResourceExhausted { what: "label index" })?;
        for (i, &node) in graph.nodes().iter().enumerate() {
            positions
                .entry(heap.label(node)?)
                .and_modify(|slot| slot.1 = i)
                .or_insert((i, i));
        }

        let mut outgoing: IndexMap<&[u8], Vec<(ArcId, Option<usize>)>> = IndexMap::new();
        outgoing
            .try_reserve(graph.arcs().len())
            .map_err(|_| CoreError::ResourceExhausted { what: "label index" })?;
        for &arc in graph.arcs() {
            let (from, to) = heap.arc_labels(arc)?;
            let dest = positions.get(to).map(|&(first, _)| first);
            push_checked(outgoing.entry(from).or_default(), (arc, dest), "label index")?;
        }

        Ok(LabelIndex {
            positions,
            outgoing,
        })
    }

    fn first(&self, label: &[u8]) -> Option<usize> {
        self.positions.get(label).map(|&(first, _)| first)
    }

    fn last(&self, label: &[u8]) -> Option<usize> {
        self.positions.get(label).map(|&(_, last)| last)
    }

    fn outgoing(&self, label: &[u8]) -> &[(ArcId, Option<usize>)] {
        self.outgoing.get(label).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// What a traversal decided to put in its result graph.
#[derive(Debug, Default)]
struct Walk {
    nodes: Vec<NodeId>,
    arcs: Vec<ArcId>,
    /// Arcs to construct between consecutive entries of `nodes`.
    link_path: bool,
}

/// A vector of `len` copies of `value`, surfacing allocation failure.
fn filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, CoreError> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| CoreError::ResourceExhausted { what: "traversal state" })?;
    out.resize(len, value);
    Ok(out)
}

/// An empty queue with room for every position of a `len`-node graph.
fn queue_for(len: usize) -> Result<VecDeque<usize>, CoreError> {
    let mut queue = VecDeque::new();
    queue
        .try_reserve_exact(len)
        .map_err(|_| CoreError::ResourceExhausted { what: "traversal state" })?;
    Ok(queue)
}

impl Heap {
    /// Breadth-first reachability from `start`.
    ///
    /// The result holds the start node, then every node in the order it is
    /// first discovered, and every arc examined from a dequeued node
    /// (including arcs into nodes already visited).
    pub fn bfs(&mut self, g: Option<GraphId>, start: Option<NodeId>) -> Result<GraphId, CoreError> {
        let walk = self.walk_bfs(g, start)?;
        self.alloc_walk(walk)
    }

    /// Depth-first reachability from `start`, scanning each node's outgoing
    /// arcs in reverse insertion order before pushing their destinations.
    pub fn dfs(&mut self, g: Option<GraphId>, start: Option<NodeId>) -> Result<GraphId, CoreError> {
        let walk = self.walk_dfs(g, start)?;
        self.alloc_walk(walk)
    }

    /// Minimum-arc path from `start` to `end`, as a graph of the path's nodes
    /// joined by freshly built arcs. Empty when `end` is unreachable.
    pub fn shortest_path(
        &mut self,
        g: Option<GraphId>,
        start: Option<NodeId>,
        end: Option<NodeId>,
    ) -> Result<GraphId, CoreError> {
        let walk = self.walk_shortest(g, start, end)?;
        self.alloc_walk(walk)
    }

    fn alloc_walk(&mut self, walk: Walk) -> Result<GraphId, CoreError> {
        let mut graph = self.blank_graph()?;
        for &node in &walk.nodes {
            graph.push_node(node)?;
        }
        for &arc in &walk.arcs {
            graph.push_arc(arc)?;
        }
        if walk.link_path {
            for pair in walk.nodes.windows(2) {
                let arc = self.make_arc(pair[0], pair[1])?;
                graph.push_arc(arc)?;
            }
        }
        self.alloc_graph(graph)
    }

    fn walk_bfs(&self, g: Option<GraphId>, start: Option<NodeId>) -> Result<Walk, CoreError> {
        let (Some(g), Some(start)) = (g, start) else {
            return Ok(Walk::default());
        };
        let graph = self.graph(g)?;
        let index = LabelIndex::build(self, graph)?;
        let Some(start) = index.first(self.label(start)?) else {
            return Ok(Walk::default());
        };

        let nodes = graph.nodes();
        let mut visited = filled(nodes.len(), false)?;
        let mut queue = queue_for(nodes.len())?;
        let mut walk = Walk::default();
        visited[start] = true;
        queue.push_back(start);
        push_checked(&mut walk.nodes, nodes[start], "traversal result")?;

        while let Some(u) = queue.pop_front() {
            for &(arc, dest) in index.outgoing(self.label(nodes[u])?) {
                push_checked(&mut walk.arcs, arc, "traversal result")?;
                if let Some(v) = dest {
                    if !visited[v] {
                        visited[v] = true;
                        queue.push_back(v);
                        push_checked(&mut walk.nodes, nodes[v], "traversal result")?;
                    }
                }
            }
        }

        tracing::trace!(
            graph = %g,
            nodes = walk.nodes.len(),
            arcs = walk.arcs.len(),
            "bfs finished"
        );
        Ok(walk)
    }

    fn walk_dfs(&self, g: Option<GraphId>, start: Option<NodeId>) -> Result<Walk, CoreError> {
        let (Some(g), Some(start)) = (g, start) else {
            return Ok(Walk::default());
        };
        let graph = self.graph(g)?;
        let index = LabelIndex::build(self, graph)?;
        let Some(start) = index.first(self.label(start)?) else {
            return Ok(Walk::default());
        };

        let nodes = graph.nodes();
        let mut visited = filled(nodes.len(), false)?;
        let mut stack = Vec::new();
        let mut walk = Walk::default();
        push_checked(&mut stack, start, "traversal state")?;

        while let Some(u) = stack.pop() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            push_checked(&mut walk.nodes, nodes[u], "traversal result")?;

            for &(arc, dest) in index.outgoing(self.label(nodes[u])?).iter().rev() {
                push_checked(&mut walk.arcs, arc, "traversal result")?;
                if let Some(v) = dest {
                    if !visited[v] {
                        push_checked(&mut stack, v, "traversal state")?;
                    }
                }
            }
        }

        tracing::trace!(
            graph = %g,
            nodes = walk.nodes.len(),
            arcs = walk.arcs.len(),
            "dfs finished"
        );
        Ok(walk)
    }

    fn walk_shortest(
        &self,
        g: Option<GraphId>,
        start: Option<NodeId>,
        end: Option<NodeId>,
    ) -> Result<Walk, CoreError> {
        let (Some(g), Some(start), Some(end)) = (g, start, end) else {
            return Ok(Walk::default());
        };
        let graph = self.graph(g)?;
        let index = LabelIndex::build(self, graph)?;
        let (Some(start), Some(end)) = (
            index.last(self.label(start)?),
            index.last(self.label(end)?),
        ) else {
            return Ok(Walk::default());
        };

        let nodes = graph.nodes();
        let mut prev: Vec<Option<usize>> = filled(nodes.len(), None)?;
        let mut visited = filled(nodes.len(), false)?;
        let mut queue = queue_for(nodes.len())?;
        visited[start] = true;
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            for &(_, dest) in index.outgoing(self.label(nodes[u])?) {
                if let Some(v) = dest {
                    if !visited[v] {
                        visited[v] = true;
                        prev[v] = Some(u);
                        queue.push_back(v);
                    }
                }
            }
        }

        if !visited[end] {
            tracing::trace!(graph = %g, "shortest path: end unreachable");
            return Ok(Walk::default());
        }

        let mut path = Vec::new();
        push_checked(&mut path, nodes[end], "traversal result")?;
        let mut at = end;
        while let Some(p) = prev[at] {
            push_checked(&mut path, nodes[p], "traversal result")?;
            at = p;
        }
        path.reverse();

        Ok(Walk {
            nodes: path,
            arcs: Vec::new(),
            link_path: true,
        })
    }
}
