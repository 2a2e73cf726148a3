//! Value model and algorithms of the graph language runtime.
//!
//! Strings, nodes, arcs and graphs live in a [`Heap`] and are addressed by
//! typed handles. Operators are lifted from the string layer in [`scalar`]
//! to nodes, arcs and graphs; traversals and coercions build new values in
//! the same heap.

pub mod arc;
pub mod coerce;
pub mod display;
pub mod error;
pub mod graph;
pub mod heap;
pub mod id;
pub mod interop;
pub mod node;
pub mod ops;
pub mod scalar;
pub mod snapshot;
pub mod traversal;
pub mod value;

// Re-export commonly used types
pub use coerce::{int_to_string, string_to_int, ValueKind};
pub use error::CoreError;
pub use graph::Graph;
pub use heap::{Arc, Heap, HeapConfig, Node};
pub use id::{ArcId, GraphId, NodeId};
pub use ops::{ArithOp, CmpOp};
pub use snapshot::GraphSnapshot;
pub use value::Value;
