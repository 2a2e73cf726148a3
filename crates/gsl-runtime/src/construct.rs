//! Value constructors and graph container operations.

use std::ffi::c_char;

use crate::handle::{ArcHandle, GraphHandle, NodeHandle};
use crate::state::{read_str, run};

/// Builds a node from a C string; null gives an empty label.
///
/// # Safety
/// `s` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn makeNode(s: *const c_char) -> NodeHandle {
    // SAFETY: forwarded from the caller.
    let s = unsafe { read_str(s) };
    run("makeNode", |heap| {
        heap.make_node(s.unwrap_or_default()).map(NodeHandle::from)
    })
}

/// Builds an arc between two existing nodes.
///
/// An arc never stores a null endpoint. A null `from` or `to` is logged as
/// an invalid operand and yields a null arc instead of an arc with a
/// missing end.
#[no_mangle]
pub extern "C" fn makeArc(from: NodeHandle, to: NodeHandle) -> ArcHandle {
    run("makeArc", |heap| match (from.id(), to.id()) {
        (Some(from), Some(to)) => heap.make_arc(from, to).map(ArcHandle::from),
        _ => Err(gsl_core::CoreError::InvalidOperand {
            op: "makeArc",
            reason: "arc endpoint is null".to_string(),
        }),
    })
}

/// A new graph holding `node` and `arc` when they are non-null.
#[no_mangle]
pub extern "C" fn makeGraph(node: NodeHandle, arc: ArcHandle) -> GraphHandle {
    run("makeGraph", |heap| heap.mk_graph(node.id(), arc.id()).map(GraphHandle::from))
}

#[no_mangle]
pub extern "C" fn mkGraph(node: NodeHandle, arc: ArcHandle) -> GraphHandle {
    run("mkGraph", |heap| heap.mk_graph(node.id(), arc.id()).map(GraphHandle::from))
}

/// A new graph sharing the nodes and arcs of `g`; empty for null.
#[no_mangle]
pub extern "C" fn copyGraphShallow(g: GraphHandle) -> GraphHandle {
    run("copyGraphShallow", |heap| match g.id() {
        Some(g) => heap.copy_shallow(g).map(GraphHandle::from),
        None => heap.make_graph().map(GraphHandle::from),
    })
}

#[no_mangle]
pub extern "C" fn addNode(g: GraphHandle, n: NodeHandle) -> GraphHandle {
    run("addNode", |heap| heap.add_node(g.id(), n.id()).map(GraphHandle::from))
}

#[no_mangle]
pub extern "C" fn addArc(g: GraphHandle, a: ArcHandle) -> GraphHandle {
    run("addArc", |heap| heap.add_arc(g.id(), a.id()).map(GraphHandle::from))
}

#[no_mangle]
pub extern "C" fn deleteNode(g: GraphHandle, n: NodeHandle) -> GraphHandle {
    run("deleteNode", |heap| heap.delete_node(g.id(), n.id()).map(GraphHandle::from))
}

#[no_mangle]
pub extern "C" fn deleteArc(g: GraphHandle, a: ArcHandle) -> GraphHandle {
    run("deleteArc", |heap| heap.delete_arc(g.id(), a.id()).map(GraphHandle::from))
}

#[no_mangle]
pub extern "C" fn getNode(g: GraphHandle, i: i32) -> NodeHandle {
    run("getNode", |heap| heap.get_node(g.id(), i).map(NodeHandle::from))
}

#[no_mangle]
pub extern "C" fn getNeighbour(g: GraphHandle, n: NodeHandle, i: i32) -> NodeHandle {
    run("getNeighbour", |heap| heap.get_neighbour(g.id(), n.id(), i).map(NodeHandle::from))
}

#[no_mangle]
pub extern "C" fn hasNode(g: GraphHandle, n: NodeHandle) -> bool {
    run("hasNode", |heap| heap.has_node(g.id(), n.id()))
}

#[no_mangle]
pub extern "C" fn hasArc(g: GraphHandle, a: ArcHandle) -> bool {
    run("hasArc", |heap| heap.has_arc(g.id(), a.id()))
}

/// Node count, saturating at `i32::MAX`.
#[no_mangle]
pub extern "C" fn size(g: GraphHandle) -> i32 {
    run("size", |heap| {
        heap.size(g.id())
            .map(|n| i32::try_from(n).unwrap_or(i32::MAX))
    })
}

#[no_mangle]
pub extern "C" fn bfs(g: GraphHandle, start: NodeHandle) -> GraphHandle {
    run("bfs", |heap| heap.bfs(g.id(), start.id()).map(GraphHandle::from))
}

#[no_mangle]
pub extern "C" fn dfs(g: GraphHandle, start: NodeHandle) -> GraphHandle {
    run("dfs", |heap| heap.dfs(g.id(), start.id()).map(GraphHandle::from))
}

#[no_mangle]
pub extern "C" fn shortestPath(g: GraphHandle, start: NodeHandle, end: NodeHandle) -> GraphHandle {
    run("shortestPath", |heap| {
        heap.shortest_path(g.id(), start.id(), end.id())
            .map(GraphHandle::from)
    })
}
