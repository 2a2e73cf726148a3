//! Operator families shared by every value kind.
//!
//! The language overloads `+ - * /` and `== !=` across strings, nodes, arcs
//! and graphs. The code generator already knows the static kind at each call
//! site; these enums name the operator independently of the kind so the
//! dispatcher in [`crate::value`] can match on `(op, lhs, rhs)`.

use serde::{Deserialize, Serialize};

use crate::scalar;

/// Binary arithmetic operators.
///
/// - strings: concatenation, character filtering, interleave, filtering
/// - nodes: the string operator applied to labels
/// - arcs: the node operator applied to both endpoints
/// - graphs: union, difference, cartesian product, difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    /// Never distinguished from `Sub` for strings or graphs.
    Div,
}

impl ArithOp {
    /// Applies the operator at the string level.
    pub fn apply_str(self, a: Option<&[u8]>, b: Option<&[u8]>) -> Vec<u8> {
        match self {
            ArithOp::Add => scalar::add(a, b),
            ArithOp::Sub => scalar::sub(a, b),
            ArithOp::Mul => scalar::mul(a, b),
            ArithOp::Div => scalar::div(a, b),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Equality operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Ne,
}

impl CmpOp {
    /// Turns the outcome of an equality test into this operator's result.
    pub fn resolve(self, equal: bool) -> bool {
        match self {
            CmpOp::Eq => equal,
            CmpOp::Ne => !equal,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_str_dispatches_to_scalar_layer() {
        let (ab, cd, abc, b): (&[u8], &[u8], &[u8], &[u8]) = (b"ab", b"cd", b"abc", b"b");
        assert_eq!(ArithOp::Add.apply_str(Some(ab), Some(cd)), b"abcd");
        assert_eq!(ArithOp::Sub.apply_str(Some(abc), Some(b)), b"ac");
        assert_eq!(ArithOp::Mul.apply_str(Some(ab), Some(cd)), b"acbd");
        assert_eq!(ArithOp::Div.apply_str(Some(abc), Some(b)), b"ac");
    }

    #[test]
    fn ne_negates_eq() {
        assert!(CmpOp::Eq.resolve(true));
        assert!(!CmpOp::Ne.resolve(true));
        assert!(CmpOp::Ne.resolve(false));
    }
}
