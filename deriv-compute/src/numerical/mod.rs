//! Numeric evaluation of expressions.

pub mod decimals;

pub use decimals::{ConfigError, Decimals};
use deriv_parser::Expr;

/// Evaluates `expr` with the variable set to `x`, rounding the result to `decimals`.
///
/// The tree is evaluated without rounding; only the final value is rounded. Domain errors, such
/// as a division by zero or the logarithm of a negative number, produce `NaN` or an infinity
/// instead of an error.
pub fn evaluate(expr: &Expr, x: f64, decimals: Decimals) -> f64 {
    decimals.round(expr.eval(x))
}

#[cfg(test)]
mod tests {
    use deriv_parser::parse;
    use super::*;

    #[test]
    fn evaluate_quotient() {
        let expr = parse("1/(x+1)", 'x').unwrap();
        assert_eq!(evaluate(&expr, 1.0, Decimals::Unrounded), 0.5);
    }

    #[test]
    fn evaluate_rounds_once() {
        let expr = parse("x/3 + x/3 + x/3", 'x').unwrap();
        assert_eq!(evaluate(&expr, 1.0, Decimals::Digits(2)), 1.0);

        let expr = parse("2/3", 'x').unwrap();
        assert_eq!(evaluate(&expr, 0.0, Decimals::Digits(3)), 0.667);
        assert_eq!(evaluate(&expr, 0.0, Decimals::Unrounded), 2.0 / 3.0);
    }

    #[test]
    fn domain_errors_are_values() {
        let expr = parse("1/x", 'x').unwrap();
        assert_eq!(evaluate(&expr, 0.0, Decimals::Digits(2)), f64::INFINITY);

        let expr = parse("log(x;10)", 'x').unwrap();
        assert!(evaluate(&expr, -1.0, Decimals::Digits(2)).is_nan());
    }
}
