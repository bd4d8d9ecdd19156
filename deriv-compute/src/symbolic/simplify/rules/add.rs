//! Simplification rules for addition and subtraction.

use crate::symbolic::{
    simplify::{rules::{do_binary, record}, step::Step},
    step_collector::StepCollector,
};
use deriv_parser::{Expr, Operation};

/// `0+a = a`
/// `a+0 = a`
/// `a-0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Addition, |lhs, rhs, negative| {
        if *lhs == 0.0 {
            Some(rhs.clone().negate_if(negative))
        } else if *rhs == 0.0 {
            Some(lhs.clone().negate_if(negative))
        } else {
            None
        }
    }).or_else(|| do_binary(expr, Operation::Subtraction, |lhs, rhs, negative| {
        (*rhs == 0.0).then(|| lhs.clone().negate_if(negative))
    }))?;

    // keep the step collection logic outside of the closure to make it implement `FnOnce`
    record(Step::AddZero, step_collector);
    Some(opt)
}

/// `0-a = -a`
pub fn subtract_from_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Subtraction, |lhs, rhs, negative| {
        (*lhs == 0.0).then(|| (-rhs).negate_if(negative))
    })?;

    record(Step::SubtractFromZero, step_collector);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    add_zero(expr, step_collector)
        .or_else(|| subtract_from_zero(expr, step_collector))
}
