//! Simplification rules for multiplication.

use crate::symbolic::{
    simplify::{rules::{do_binary, record}, step::Step},
    step_collector::StepCollector,
};
use deriv_parser::{Expr, Operation};

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Multiplication, |lhs, rhs, _| {
        (*lhs == 0.0 || *rhs == 0.0).then(|| Expr::number(0.0))
    })?;

    record(Step::MultiplyZero, step_collector);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Multiplication, |lhs, rhs, negative| {
        if *lhs == 1.0 {
            Some(rhs.clone().negate_if(negative))
        } else if *rhs == 1.0 {
            Some(lhs.clone().negate_if(negative))
        } else {
            None
        }
    })?;

    record(Step::MultiplyOne, step_collector);
    Some(opt)
}

/// `-1*a = -a`
/// `a*-1 = -a`
pub fn multiply_minus_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Multiplication, |lhs, rhs, negative| {
        if *lhs == -1.0 {
            Some((-rhs).negate_if(negative))
        } else if *rhs == -1.0 {
            Some((-lhs).negate_if(negative))
        } else {
            None
        }
    })?;

    record(Step::MultiplyMinusOne, step_collector);
    Some(opt)
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_minus_one(expr, step_collector))
}
