//! Simplification rules for power expressions.

use crate::symbolic::{
    simplify::{rules::{do_binary, record, resimplify}, step::Step},
    step_collector::StepCollector,
};
use deriv_parser::{Expr, Operation};

/// `0^0 = 1`
/// `0^a = 0`, for `a > 0`
/// `0^a = NaN`, for `a < 0`
pub fn power_zero_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let mut step = Step::PowerZeroLeft;
    let opt = do_binary(expr, Operation::Exponentiation, |lhs, rhs, negative| {
        if *lhs != 0.0 {
            return None;
        }

        if *rhs == 0.0 {
            step = Step::PowerZeroZero;
            Some(Expr::number(1.0).negate_if(negative))
        } else if rhs.is_positive_constant() {
            Some(Expr::number(0.0))
        } else if rhs.is_negative_constant() {
            step = Step::PowerZeroNegative;
            Some(Expr::number(f64::NAN))
        } else {
            None
        }
    })?;

    record(step, step_collector);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Exponentiation, |lhs, _, negative| {
        (*lhs == 1.0).then(|| Expr::number(1.0).negate_if(negative))
    })?;

    record(Step::PowerOneLeft, step_collector);
    Some(opt)
}

/// `a^0 = 0`
///
/// Note that this disagrees with the usual convention `a^0 = 1`, and with [`power_zero_left`],
/// which gives `0^0 = 1`.
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Exponentiation, |_, rhs, _| {
        (*rhs == 0.0).then(|| Expr::number(0.0))
    })?;

    record(Step::PowerZero, step_collector);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Exponentiation, |lhs, rhs, negative| {
        (*rhs == 1.0).then(|| lhs.clone().negate_if(negative))
    })?;

    record(Step::PowerOne, step_collector);
    Some(opt)
}

/// `a^-1 = 1/a`
pub fn power_minus_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Exponentiation, |lhs, rhs, negative| {
        (*rhs == -1.0).then(|| (Expr::number(1.0) / lhs.clone()).negate_if(negative))
    })?;

    record(Step::PowerMinusOne, step_collector);
    Some(resimplify(&opt, step_collector))
}

/// Applies all power rules.
///
/// A base of zero stops the search even when no rule for it applies.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let zero_base = expr.as_binary()
        .is_some_and(|binary| binary.op() == Operation::Exponentiation && *binary.lhs() == 0.0);
    if zero_base {
        return power_zero_left(expr, step_collector);
    }

    power_one_left(expr, step_collector)
        .or_else(|| power_zero(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_minus_one(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn pow(lhs: f64, rhs: f64) -> Expr {
        Expr::binary(Operation::Exponentiation, Expr::number(lhs), Expr::number(rhs))
    }

    #[test]
    fn zero_base() {
        let mut steps = Vec::new();
        assert_eq!(power_zero_left(&pow(0.0, 0.0), &mut steps), Some(Expr::number(1.0)));
        assert_eq!(power_zero_left(&pow(0.0, 2.0), &mut steps), Some(Expr::number(0.0)));
        assert!(power_zero_left(&pow(0.0, -2.0), &mut steps).is_some_and(|e| e.eval(0.0).is_nan()));
        assert_eq!(steps, vec![Step::PowerZeroZero, Step::PowerZeroLeft, Step::PowerZeroNegative]);
    }

    #[test]
    fn zero_exponent_gives_zero() {
        let expr = Expr::binary(Operation::Exponentiation, Expr::variable(), Expr::number(0.0));
        assert_eq!(all(&expr, &mut ()), Some(Expr::number(0.0)));
    }

    #[test]
    fn zero_base_with_variable_exponent_is_kept() {
        let expr = Expr::binary(Operation::Exponentiation, Expr::number(0.0), Expr::variable());
        assert_eq!(all(&expr, &mut ()), None);
    }

    #[test]
    fn negative_one_exponent() {
        let expr = Expr::binary(Operation::Exponentiation, -Expr::variable(), Expr::number(-1.0));
        let result = all(&expr, &mut ()).unwrap();
        assert_eq!(result.display('x').to_string(), "-(1 / x)");
    }
}
