//! Lifted arithmetic and equality over nodes, arcs and graphs.
//!
//! `concatX` and `xAdd` are the two names generated code uses for `+`.

use crate::handle::{ArcHandle, GraphHandle, NodeHandle};
use crate::state::run;

macro_rules! lifted_arith {
    ($handle:ident: $($name:ident => $method:ident),+ $(,)?) => {
        $(
            #[no_mangle]
            pub extern "C" fn $name(a: $handle, b: $handle) -> $handle {
                run(stringify!($name), |heap| heap.$method(a.id(), b.id()).map($handle::from))
            }
        )+
    };
}

macro_rules! lifted_cmp {
    ($handle:ident: $($name:ident => $method:ident),+ $(,)?) => {
        $(
            #[no_mangle]
            pub extern "C" fn $name(a: $handle, b: $handle) -> bool {
                run(stringify!($name), |heap| heap.$method(a.id(), b.id()))
            }
        )+
    };
}

lifted_arith!(NodeHandle:
    concatNode => node_add,
    nodeAdd => node_add,
    nodeSub => node_sub,
    nodeMul => node_mul,
    nodeDiv => node_div,
);

lifted_arith!(ArcHandle:
    concatArc => arc_add,
    arcAdd => arc_add,
    arcSub => arc_sub,
    arcMul => arc_mul,
    arcDiv => arc_div,
);

lifted_arith!(GraphHandle:
    concatGraph => graph_add,
    graphAdd => graph_add,
    graphSub => graph_sub,
    graphMul => graph_mul,
    graphDiv => graph_div,
);

lifted_cmp!(NodeHandle: nodeEq => node_eq, nodeNeq => node_ne);
lifted_cmp!(ArcHandle: arcEq => arc_eq, arcNeq => arc_ne);
lifted_cmp!(GraphHandle: graphEq => graph_eq, graphNeq => graph_ne);
