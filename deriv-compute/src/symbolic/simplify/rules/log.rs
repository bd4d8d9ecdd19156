//! Simplification rules for logarithms.
//!
//! Logarithms are written `log(a; b)`, where `a` is the argument and `b` the base.

use crate::symbolic::{
    simplify::{rules::{do_binary, record, resimplify}, step::Step},
    step_collector::StepCollector,
};
use deriv_parser::{ast::Binary, Expr, Operation};

/// Returns the node if it is an unsigned power.
fn as_power(expr: &Expr) -> Option<&Binary> {
    expr.as_binary()
        .filter(|binary| binary.op() == Operation::Exponentiation && !binary.is_negative())
}

/// `log(a; b) = NaN`, for `a < 0` or `b < 0`
pub fn log_negative(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Logarithm, |lhs, rhs, _| {
        (lhs.is_negative_constant() || rhs.is_negative_constant())
            .then(|| Expr::number(f64::NAN))
    })?;

    record(Step::LogNegative, step_collector);
    Some(opt)
}

/// `log(1; 0) = 0`
/// `log(a; 0) = NaN`
pub fn log_base_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Logarithm, |lhs, rhs, _| {
        if *rhs != 0.0 {
            None
        } else if *lhs == 1.0 {
            Some(Expr::number(0.0))
        } else {
            Some(Expr::number(f64::NAN))
        }
    })?;

    record(Step::LogBaseZero, step_collector);
    Some(opt)
}

/// `log(a; 1) = NaN`
pub fn log_base_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Logarithm, |_, rhs, _| {
        (*rhs == 1.0).then(|| Expr::number(f64::NAN))
    })?;

    record(Step::LogBaseOne, step_collector);
    Some(opt)
}

/// `log(a; a) = 1`
pub fn log_self(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Logarithm, |lhs, rhs, negative| {
        (lhs == rhs).then(|| Expr::number(1.0).negate_if(negative))
    })?;

    record(Step::LogSelf, step_collector);
    Some(opt)
}

/// `log(a^b; c) = b*log(a; c)`
pub fn log_power_argument(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Logarithm, |lhs, rhs, negative| {
        let power = as_power(lhs)?;
        let log = power.lhs().clone().log(rhs.clone());
        Some((power.rhs().clone() * log).negate_if(negative))
    })?;

    record(Step::LogPowerArgument, step_collector);
    Some(resimplify(&opt, step_collector))
}

/// `log(c; a^b) = log(c; a)/b`
pub fn log_power_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_binary(expr, Operation::Logarithm, |lhs, rhs, negative| {
        let power = as_power(rhs)?;
        let log = lhs.clone().log(power.lhs().clone());
        Some((log / power.rhs().clone()).negate_if(negative))
    })?;

    record(Step::LogPowerBase, step_collector);
    Some(resimplify(&opt, step_collector))
}

/// Applies all logarithm rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    log_negative(expr, step_collector)
        .or_else(|| log_base_zero(expr, step_collector))
        .or_else(|| log_base_one(expr, step_collector))
        .or_else(|| log_self(expr, step_collector))
        .or_else(|| log_power_argument(expr, step_collector))
        .or_else(|| log_power_base(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use deriv_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn base_zero() {
        let expr = Expr::number(1.0).log(Expr::number(0.0));
        assert_eq!(log_base_zero(&expr, &mut ()), Some(Expr::number(0.0)));

        let expr = Expr::variable().log(Expr::number(0.0));
        assert!(log_base_zero(&expr, &mut ()).is_some_and(|e| e.eval(1.0).is_nan()));
    }

    #[test]
    fn change_of_base_keeps_the_value() {
        for source in ["log(x^3; 5)", "log(7; x^2)", "-log(x^0.5; x^3)"] {
            let expr = parse(source, 'x').unwrap();
            let simplified = all(&expr, &mut ()).unwrap();
            for x in [1.5, 2.0, 4.0, 9.5] {
                assert_float_relative_eq!(simplified.eval(x), expr.eval(x), 1e-9);
            }
        }
    }

    #[test]
    fn negative_power_is_not_rewritten() {
        let expr = parse("log(-(x^2); 3)", 'x').unwrap();
        assert_eq!(log_power_argument(&expr, &mut ()), None);
    }
}
