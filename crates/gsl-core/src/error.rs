//! Core error types for gsl-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Absent
//! operands and out-of-range lookups are NOT errors in this crate (they have
//! defined results); these variants cover stale handles, operands the
//! language leaves undefined, and allocation failure.

use thiserror::Error;

use crate::id::{ArcId, GraphId, NodeId};

/// Errors produced by heap operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A node handle does not refer to a live node in this heap.
    #[error("node not found: NodeId({id})")]
    NodeNotFound { id: NodeId },

    /// An arc handle does not refer to a live arc in this heap.
    #[error("arc not found: ArcId({id})")]
    ArcNotFound { id: ArcId },

    /// A graph handle does not refer to a live graph in this heap.
    #[error("graph not found: GraphId({id})")]
    GraphNotFound { id: GraphId },

    /// An operator received an operand it has no defined result for
    /// (e.g. an absent arc in arc arithmetic).
    #[error("invalid operand for {op}: {reason}")]
    InvalidOperand { op: &'static str, reason: String },

    /// Operator applied to value kinds it is not defined for.
    #[error("type mismatch in {op}: {lhs} and {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// A cast outside the allowed coercion lattice.
    #[error("invalid cast from {from} to {to}")]
    InvalidCast {
        from: &'static str,
        to: &'static str,
    },

    /// Allocation (or handle space) could not be obtained.
    #[error("resource exhausted while allocating {what}")]
    ResourceExhausted { what: &'static str },
}

impl CoreError {
    /// Returns `true` for the only failure that must be treated as fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CoreError::ResourceExhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_handle() {
        let err = CoreError::GraphNotFound { id: GraphId(4) };
        assert_eq!(err.to_string(), "graph not found: GraphId(4)");
    }

    #[test]
    fn only_exhaustion_is_fatal() {
        assert!(CoreError::ResourceExhausted { what: "node" }.is_fatal());
        assert!(!CoreError::InvalidOperand {
            op: "arc +",
            reason: "left operand is null".into(),
        }
        .is_fatal());
    }
}
