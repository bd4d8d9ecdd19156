//! Derivatives of the one-argument functions.

use deriv_parser::{ast::Unary, Expr, Operation};
use super::derivative;

/// Differentiates `f(u)` by the chain rule, ignoring the sign flag of the node.
pub(super) fn derive_unary(unary: &Unary) -> Expr {
    let u = unary.operand();
    match unary.op() {
        Operation::Sine => u.clone().cos() * derivative(u),
        Operation::Cosine => -u.clone().sin() * derivative(u),
        Operation::Tangent => derivative(&(u.clone().sin() / u.clone().cos())),
        op => unreachable!("`{:?}` is never stored in a unary node", op),
    }
}
