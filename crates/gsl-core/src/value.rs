//! Tagged values and operator dispatch.
//!
//! [`Value`] is the closed set of kinds a generated program manipulates.
//! Operators are resolved by matching on the `(lhs, rhs)` tag pair, so each
//! kind's semantics stays in its own module and mixing kinds is a
//! [`CoreError::TypeMismatch`].

use serde::{Deserialize, Serialize};

use crate::coerce::{int_to_string, string_to_int, ValueKind};
use crate::error::CoreError;
use crate::heap::Heap;
use crate::id::{ArcId, GraphId, NodeId};
use crate::ops::{ArithOp, CmpOp};
use crate::scalar;

/// A value of one of the language's kinds. Strings carry their bytes and
/// reference kinds an optional handle; `None` is the language's null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Str(Option<Vec<u8>>),
    Node(Option<NodeId>),
    Arc(Option<ArcId>),
    Graph(Option<GraphId>),
    Int(i32),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::Node(_) => ValueKind::Node,
            Value::Arc(_) => ValueKind::Arc,
            Value::Graph(_) => ValueKind::Graph,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns `true` for an absent string, node, arc or graph.
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Value::Str(None) | Value::Node(None) | Value::Arc(None) | Value::Graph(None)
        )
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Some(s.as_bytes().to_vec()))
    }
}

impl From<&[u8]> for Value {
    fn from(s: &[u8]) -> Self {
        Value::Str(Some(s.to_vec()))
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Int(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(Some(id))
    }
}

impl From<ArcId> for Value {
    fn from(id: ArcId) -> Self {
        Value::Arc(Some(id))
    }
}

impl From<GraphId> for Value {
    fn from(id: GraphId) -> Self {
        Value::Graph(Some(id))
    }
}

impl Heap {
    /// Evaluates `lhs op rhs`. Both operands must be the same reference
    /// kind or strings.
    pub fn eval_arith(&mut self, op: ArithOp, lhs: &Value, rhs: &Value) -> Result<Value, CoreError> {
        match (lhs, rhs) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(Some(
                op.apply_str(a.as_deref(), b.as_deref()),
            ))),
            (Value::Node(a), Value::Node(b)) => Ok(Value::Node(Some(self.node_arith(op, *a, *b)?))),
            (Value::Arc(a), Value::Arc(b)) => Ok(Value::Arc(Some(self.arc_arith(op, *a, *b)?))),
            (Value::Graph(a), Value::Graph(b)) => {
                Ok(Value::Graph(Some(self.graph_arith(op, *a, *b)?)))
            }
            _ => Err(CoreError::TypeMismatch {
                op: op.symbol(),
                lhs: lhs.type_name(),
                rhs: rhs.type_name(),
            }),
        }
    }

    /// Evaluates `lhs op rhs` for the equality operators.
    ///
    /// Ints and bools compare by value; the reference kinds use their own
    /// label-based equality, under which null never equals anything.
    pub fn eval_cmp(&self, op: CmpOp, lhs: &Value, rhs: &Value) -> Result<bool, CoreError> {
        let equal = match (lhs, rhs) {
            (Value::Str(a), Value::Str(b)) => scalar::string_eq(a.as_deref(), b.as_deref()),
            (Value::Node(a), Value::Node(b)) => self.node_eq(*a, *b)?,
            (Value::Arc(a), Value::Arc(b)) => self.arc_eq(*a, *b)?,
            (Value::Graph(a), Value::Graph(b)) => self.graph_eq(*a, *b)?,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            _ => {
                return Err(CoreError::TypeMismatch {
                    op: op.symbol(),
                    lhs: lhs.type_name(),
                    rhs: rhs.type_name(),
                })
            }
        };
        Ok(op.resolve(equal))
    }

    /// Casts `value` to `target` along the coercion lattice.
    pub fn cast(&mut self, value: &Value, target: ValueKind) -> Result<Value, CoreError> {
        if !value.kind().can_cast_to(target) {
            return Err(CoreError::InvalidCast {
                from: value.type_name(),
                to: target.name(),
            });
        }
        let cast = match (value, target) {
            (v, t) if v.kind() == t => v.clone(),
            (Value::Str(s), ValueKind::Int) => Value::Int(string_to_int(s.as_deref())),
            (Value::Int(x), ValueKind::Str) => Value::Str(Some(int_to_string(*x).into_bytes())),
            (Value::Str(s), ValueKind::Node) => Value::Node(Some(self.string_to_node(s.as_deref())?)),
            (Value::Node(n), ValueKind::Arc) => Value::Arc(self.node_to_arc(*n)?),
            (Value::Arc(a), ValueKind::Graph) => Value::Graph(Some(self.arc_to_graph(*a)?)),
            _ => {
                return Err(CoreError::InvalidCast {
                    from: value.type_name(),
                    to: target.name(),
                })
            }
        };
        Ok(cast)
    }
}
