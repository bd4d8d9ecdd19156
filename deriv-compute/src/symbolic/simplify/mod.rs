//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which rewrites an expression into a shorter,
//! equivalent one. The tree is simplified bottom-up: the children of a node are simplified first,
//! then the identities in [`rules`] are tried on the node itself.
//!
//! A subtree that does not depend on the variable is folded into a single number, rounded to the
//! requested precision. When rounding, a number that rounds to the same value as `e` or `π` is
//! replaced by the exact constant.
//!
//! Identities are matched with the structural equality of [`Expr`], so `x/x` simplifies to `1`
//! but `(x+1)/(1+x)` does not.

pub mod rules;
pub mod step;

use crate::{numerical::Decimals, symbolic::step_collector::StepCollector};
use deriv_parser::{ast::Primary, Expr};
use std::f64::consts::{E, PI};
use step::Step;
use tracing::debug;

/// Folds a constant value into a numeric leaf.
fn fold_constant(value: f64, decimals: Decimals) -> Expr {
    let rounded = decimals.round(value);
    if decimals == Decimals::Unrounded {
        return Expr::number(rounded);
    }

    let magnitude = rounded.abs();
    let snapped = [E, PI].into_iter().find(|&c| magnitude == decimals.round(c));
    match snapped {
        Some(c) if rounded < 0.0 => Expr::number(-c),
        Some(c) => Expr::number(c),
        None => Expr::number(rounded),
    }
}

/// Returns true if folding `expr` would not change it.
fn is_folded(expr: &Expr, folded: &Expr) -> bool {
    match (expr.as_leaf(), folded.as_leaf()) {
        (Some(a), Some(b)) => {
            a.is_negative() == b.is_negative()
                && match (a.primary(), b.primary()) {
                    (Primary::Number(a), Primary::Number(b)) => a.to_bits() == b.to_bits(),
                    _ => false,
                }
        },
        _ => false,
    }
}

/// Folds `expr` into a numeric leaf if it is constant.
fn fold(expr: &Expr, decimals: Decimals, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let value = expr.constant()?;
    let folded = fold_constant(value, decimals);
    if !is_folded(expr, &folded) {
        debug!(step = ?Step::FoldConstant, value, "applied simplification rule");
        step_collector.push(Step::FoldConstant);
    }
    Some(folded)
}

/// Base implementation of the simplification algorithm.
pub(crate) fn inner_simplify(
    expr: &Expr,
    decimals: Decimals,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    if let Some(folded) = fold(expr, decimals, step_collector) {
        return folded;
    }

    // simplifying the children can make the node constant, as in `sin(0*x)`
    match expr {
        Expr::Leaf(_) => expr.clone(),
        Expr::Unary(unary) => {
            let operand = inner_simplify(unary.operand(), decimals, step_collector);
            let rebuilt = Expr::unary(unary.op(), operand).with_negative(unary.is_negative());
            fold(&rebuilt, decimals, step_collector).unwrap_or(rebuilt)
        },
        Expr::Binary(binary) => {
            let lhs = inner_simplify(binary.lhs(), decimals, step_collector);
            let rhs = inner_simplify(binary.rhs(), decimals, step_collector);
            let rebuilt = Expr::binary(binary.op(), lhs, rhs).with_negative(binary.is_negative());
            if let Some(folded) = fold(&rebuilt, decimals, step_collector) {
                return folded;
            }
            match rules::all(&rebuilt, step_collector) {
                // rules work without rounding; round the rewritten tree once
                Some(rewritten) => inner_simplify(&rewritten, decimals, step_collector),
                None => rebuilt,
            }
        },
    }
}

/// Simplifies the given expression, rounding constants to `decimals`.
pub fn simplify(expr: &Expr, decimals: Decimals) -> Expr {
    inner_simplify(expr, decimals, &mut ())
}

/// Simplifies the given expression, rounding constants to `decimals`. The rules applied by the
/// simplifier are also collected and returned, in the order they were applied.
pub fn simplify_with_steps(expr: &Expr, decimals: Decimals) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_simplify(expr, decimals, &mut steps);
    (expr, steps)
}

#[cfg(test)]
mod tests {
    use deriv_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parses and simplifies `source` over `x`, then renders the result.
    fn simplified(source: &str, decimals: Decimals) -> String {
        let expr = parse(source, 'x').unwrap();
        simplify(&expr, decimals).display('x').to_string()
    }

    #[test]
    fn add_zero() {
        assert_eq!(simplified("2*x+0", Decimals::Unrounded), "2 * x");
        assert_eq!(simplified("0+x", Decimals::Unrounded), "x");
        assert_eq!(simplified("x-0", Decimals::Unrounded), "x");
        assert_eq!(simplified("0-x", Decimals::Unrounded), "-x");
        assert_eq!(simplified("-(0-x)", Decimals::Unrounded), "x");
    }

    #[test]
    fn multiply_rules() {
        assert_eq!(simplified("0*sin(x)", Decimals::Unrounded), "0");
        assert_eq!(simplified("1*x*1", Decimals::Unrounded), "x");
        assert_eq!(simplified("-1*x", Decimals::Unrounded), "-x");
        assert_eq!(simplified("x*(2-3)", Decimals::Unrounded), "-x");
        assert_eq!(simplified("(x-x*0)*(1+0*x)", Decimals::Unrounded), "x");
    }

    #[test]
    fn divide_rules() {
        assert_eq!(simplified("0/x", Decimals::Unrounded), "0");
        assert_eq!(simplified("x/x", Decimals::Unrounded), "1");
        assert_eq!(simplified("-x/x", Decimals::Unrounded), "-1");
        assert_eq!(simplified("x/(3-2)", Decimals::Unrounded), "x");
        assert_eq!(simplified("x/-1", Decimals::Unrounded), "-x");
        assert_eq!(simplified("x/-2", Decimals::Unrounded), "-(x / 2)");
        assert_eq!(simplified("x/0", Decimals::Unrounded), "NaN");
    }

    #[test]
    fn power_rules() {
        assert_eq!(simplified("x^1", Decimals::Unrounded), "x");
        assert_eq!(simplified("1^x", Decimals::Unrounded), "1");
        assert_eq!(simplified("x^-1", Decimals::Unrounded), "1 / x");
        assert_eq!(simplified("(x+1)^(2-2)", Decimals::Unrounded), "0");
    }

    #[test]
    fn log_rules() {
        assert_eq!(simplified("log(x;x)", Decimals::Unrounded), "1");
        assert_eq!(simplified("log(x;1)", Decimals::Unrounded), "NaN");
        assert_eq!(simplified("log(x;-2)", Decimals::Unrounded), "NaN");
        assert_eq!(simplified("log(x^2;3)", Decimals::Unrounded), "2 * log(x; 3)");
        assert_eq!(simplified("log(3;x^2)", Decimals::Unrounded), "log(3; x) / 2");
    }

    #[test]
    fn root_as_power() {
        assert_eq!(simplified("nrt(x;2)", Decimals::Unrounded), "x^0.5");
        assert_eq!(simplified("nrt(x;1)", Decimals::Unrounded), "x");
    }

    #[test]
    fn rewritten_constants_are_rounded_once() {
        // log(x^2; x^3) = 2 * (log(x; x) / 3) = 2/3
        assert_eq!(simplified("log(x^2;x^3)", Decimals::Digits(2)), "0.67");
        assert_eq!(simplified("nrt(x;3)", Decimals::Digits(2)), "x^0.33");
        assert_eq!(simplified("log(x^2;x^3)*x", Decimals::Digits(3)), "0.667 * x");
    }

    #[test]
    fn functions_keep_their_sign() {
        assert_eq!(simplified("-sin(x*1)", Decimals::Unrounded), "-sin(x)");
        assert_eq!(simplified("cos(0+x)", Decimals::Unrounded), "cos(x)");
    }

    #[test]
    fn constants_are_rounded() {
        assert_eq!(simplified("x + 2/3", Decimals::Digits(3)), "x + 0.667");
        assert_eq!(simplified("x + 2/3", Decimals::Unrounded), format!("x + {}", 2.0 / 3.0));
        assert_eq!(simplified("sin(0)*x + 1", Decimals::Digits(2)), "1");
        assert_eq!(simplified("sin(x*0) + x", Decimals::Unrounded), "x");
    }

    #[test]
    fn constants_snap_to_e_and_pi() {
        assert_eq!(simplified("x * 3.1416", Decimals::Digits(4)), format!("x * {}", PI));
        assert_eq!(simplified("x * -2.718", Decimals::Digits(3)), format!("x * -{}", E));
        assert_eq!(simplified("x * 3.1416", Decimals::Unrounded), "x * 3.1416");
    }

    #[test]
    fn idempotent() {
        let sources = [
            "2*x+0",
            "x*(x+1)/x^2",
            "log(x^3;2)*nrt(x;3)",
            "-(sin(x)*1)/-cos(x)",
            "x^(2/3) - 0*x + 1.23456",
        ];
        for source in sources {
            let expr = parse(source, 'x').unwrap();
            for decimals in [Decimals::Unrounded, Decimals::Digits(2)] {
                let once = simplify(&expr, decimals);
                let twice = simplify(&once, decimals);
                assert_eq!(once, twice, "not idempotent for {:?} at {}", source, decimals);
            }
        }
    }

    #[test]
    fn steps_are_collected() {
        let expr = parse("(x+0)*1", 'x').unwrap();
        let (result, steps) = simplify_with_steps(&expr, Decimals::Unrounded);
        assert_eq!(result, Expr::variable());
        assert_eq!(steps, vec![Step::AddZero, Step::MultiplyOne]);
    }

    #[test]
    fn folding_a_leaf_is_not_a_step() {
        let expr = parse("x*2", 'x').unwrap();
        let (_, steps) = simplify_with_steps(&expr, Decimals::Digits(3));
        assert!(steps.is_empty(), "{:?}", steps);
    }
}
