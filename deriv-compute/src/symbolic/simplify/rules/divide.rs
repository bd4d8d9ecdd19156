//! Simplification rules for division.

use crate::symbolic::{
    simplify::{rules::{do_binary, record, resimplify}, step::Step},
    step_collector::StepCollector,
};
use deriv_parser::{Expr, Operation};

/// `a/0 = NaN`
pub fn divide_by_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Division, |_, rhs, _| {
        (*rhs == 0.0).then(|| Expr::number(f64::NAN))
    })?;

    record(Step::DivideByZero, step_collector);
    Some(opt)
}

/// `0/a = 0`
pub fn divide_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Division, |lhs, _, _| {
        (*lhs == 0.0).then(|| Expr::number(0.0))
    })?;

    record(Step::DivideZero, step_collector);
    Some(opt)
}

/// `a/a = 1`
pub fn divide_self(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Division, |lhs, rhs, negative| {
        (lhs == rhs).then(|| Expr::number(1.0).negate_if(negative))
    })?;

    record(Step::DivideSelf, step_collector);
    Some(opt)
}

/// `a/1 = a`
pub fn divide_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Division, |lhs, rhs, negative| {
        (*rhs == 1.0).then(|| lhs.clone().negate_if(negative))
    })?;

    record(Step::DivideOne, step_collector);
    Some(opt)
}

/// `a/-1 = -a`
pub fn divide_minus_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Division, |lhs, rhs, negative| {
        (*rhs == -1.0).then(|| (-lhs).negate_if(negative))
    })?;

    record(Step::DivideMinusOne, step_collector);
    Some(opt)
}

/// `-a/b = -(a/b)`
/// `a/-b = -(a/b)`
///
/// The quotient without signs is simplified again, since the other rules may now apply to it.
pub fn divide_hoist_sign(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Division, |lhs, rhs, negative| {
        if !lhs.is_negative() && !rhs.is_negative() {
            return None;
        }
        let flip = lhs.is_negative() != rhs.is_negative();
        Some(Expr::binary(Operation::Division, lhs.clone().unsigned(), rhs.clone().unsigned())
            .with_negative(negative != flip))
    })?;

    record(Step::DivideHoistSign, step_collector);
    Some(resimplify(&opt, step_collector))
}

/// Applies all division rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    divide_by_zero(expr, step_collector)
        .or_else(|| divide_zero(expr, step_collector))
        .or_else(|| divide_self(expr, step_collector))
        .or_else(|| divide_one(expr, step_collector))
        .or_else(|| divide_minus_one(expr, step_collector))
        .or_else(|| divide_hoist_sign(expr, step_collector))
}
