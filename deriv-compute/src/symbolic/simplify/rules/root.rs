//! Simplification rules for roots.

use crate::symbolic::{
    simplify::{rules::{do_binary, record, resimplify}, step::Step},
    step_collector::StepCollector,
};
use deriv_parser::{Expr, Operation};

/// `nrt(a; b) = a^(1/b)`
pub fn root_as_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::NRoot, |lhs, rhs, negative| {
        let exponent = Expr::number(1.0) / rhs.clone();
        Some(lhs.clone().pow(exponent).negate_if(negative))
    })?;

    record(Step::RootAsPower, step_collector);
    Some(resimplify(&opt, step_collector))
}

/// Applies all root rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    root_as_power(expr, step_collector)
}
