//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. The children of the expression are always simplified before the rules are
//! tried.
//!
//! Within a module, rules are tried in a fixed order and the first one that applies wins.

pub mod add;
pub mod divide;
pub mod log;
pub mod multiply;
pub mod power;
pub mod root;

use crate::{numerical::Decimals, symbolic::step_collector::StepCollector};
use super::inner_simplify;
use deriv_parser::{Expr, Operation};
use super::step::Step;
use tracing::debug;

/// If the expression is a binary operation of the given kind, calls the given transformation
/// function with the left-hand side, the right-hand side, and the sign of the expression.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_binary(
    expr: &Expr,
    op: Operation,
    f: impl FnOnce(&Expr, &Expr, bool) -> Option<Expr>,
) -> Option<Expr> {
    let binary = expr.as_binary()?;
    if binary.op() == op {
        f(binary.lhs(), binary.rhs(), binary.is_negative())
    } else {
        None
    }
}

/// Records that a rule was applied.
pub(crate) fn record(step: Step, step_collector: &mut dyn StepCollector<Step>) {
    debug!(?step, "applied simplification rule");
    step_collector.push(step);
}

/// Simplifies the result of a rewrite again, since other rules may now apply to it.
///
/// Constants are not rounded here: [`inner_simplify`] rounds the rewritten tree once it is
/// complete, so that intermediate constants are combined exactly.
pub(crate) fn resimplify(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    inner_simplify(expr, Decimals::Unrounded, step_collector)
}

/// Applies all rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| divide::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| log::all(expr, step_collector))
        .or_else(|| root::all(expr, step_collector))
}
