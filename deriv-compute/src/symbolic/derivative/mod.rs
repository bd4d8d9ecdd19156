//! Symbolic differentiation.
//!
//! [`derivative`] returns the derivative of a tree with respect to its variable. Rules are
//! applied structurally and the result is not simplified, so it usually contains terms like
//! `x^1 * 1`; pass it through [`simplify`](crate::symbolic::simplify) before showing it.
//!
//! Operations without a rule of their own are first rewritten in terms of ones that have one:
//!
//! ```text
//! a / b      = a * b^-1
//! log(a; b)  = ln(a) / ln(b)
//! nrt(a; b)  = a^(1/b)
//! tg(a)      = sin(a) / cos(a)
//! ```

mod function;

use deriv_parser::{ast::Binary, Expr, Operation};
use std::f64::consts::E;

/// Differentiates a two-operand node, ignoring its sign flag.
fn derive_binary(binary: &Binary) -> Expr {
    let (l, r) = (binary.lhs(), binary.rhs());
    match binary.op() {
        Operation::Addition => derivative(l) + derivative(r),
        Operation::Subtraction => derivative(l) - derivative(r),
        Operation::Multiplication => {
            derivative(l) * r.clone() + l.clone() * derivative(r)
        },
        Operation::Division => {
            derivative(&(l.clone() * r.clone().pow(Expr::number(-1.0))))
        },
        Operation::Exponentiation => match r.constant() {
            Some(c) if c == 1.0 => derivative(l),
            // power rule
            Some(c) => {
                Expr::number(c) * l.clone().pow(Expr::number(c - 1.0)) * derivative(l)
            },
            // d(a^b) = a^b * d(b * ln(a))
            None => {
                let power = Expr::binary(Operation::Exponentiation, l.clone(), r.clone());
                power * derivative(&(r.clone() * l.clone().ln()))
            },
        },
        Operation::Logarithm => match r.constant() {
            Some(base) if base == E => derivative(l) / l.clone(),
            _ => derivative(&(l.clone().ln() / r.clone().ln())),
        },
        Operation::NRoot => {
            derivative(&l.clone().pow(Expr::number(1.0) / r.clone()))
        },
        op => unreachable!("`{:?}` is never stored in a binary node", op),
    }
}

/// Returns the derivative of `expr` with respect to its variable.
///
/// The result is not simplified.
pub fn derivative(expr: &Expr) -> Expr {
    if expr.is_constant() {
        return Expr::number(0.0);
    }

    let derived = match expr {
        Expr::Leaf(_) => Expr::number(1.0),
        Expr::Unary(unary) => function::derive_unary(unary),
        Expr::Binary(binary) => derive_binary(binary),
    };
    derived.negate_if(expr.is_negative())
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use crate::{numerical::Decimals, symbolic::simplify};
    use deriv_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Central finite difference of `expr` at `x`.
    fn finite_difference(expr: &Expr, x: f64) -> f64 {
        let h = 1e-5;
        (expr.eval(x + h) - expr.eval(x - h)) / (2.0 * h)
    }

    /// Checks the symbolic derivative of `source` against a finite difference.
    fn check(source: &str) {
        let expr = parse(source, 'x').unwrap();
        let derived = derivative(&expr);
        for x in [0.3, 0.7, 1.1, 2.5] {
            assert_float_relative_eq!(derived.eval(x), finite_difference(&expr, x), 1e-6);
        }
    }

    /// Differentiates and simplifies `source`, then renders the result.
    fn derived(source: &str) -> String {
        let expr = parse(source, 'x').unwrap();
        simplify(&derivative(&expr), Decimals::Unrounded).display('x').to_string()
    }

    #[test]
    fn polynomial() {
        check("x^3+2*x");
        check("4*x^2 - x + 7");
    }

    #[test]
    fn trigonometric() {
        check("sin(x)*cos(x)");
        check("tg(x)");
        check("-cos(3*x)");
    }

    #[test]
    fn quotient() {
        check("x/(x+1)");
        check("-1/x");
    }

    #[test]
    fn logarithmic() {
        check("log(x;2.718281828)");
        check("log(x;2)");
        check("log(3;x+1)");
    }

    #[test]
    fn composite() {
        check("sin(x^2)");
        check("x^x");
        check("2^sin(x)");
    }

    #[test]
    fn square_root() {
        let expr = parse("nrt(x;2)", 'x').unwrap();
        let derived = simplify(&derivative(&expr), Decimals::Unrounded);
        for x in [0.3, 0.7, 1.1, 2.5] {
            assert_float_relative_eq!(derived.eval(x), 1.0 / (2.0 * x.sqrt()), 1e-12);
        }
    }

    #[test]
    fn constants() {
        assert_eq!(derivative(&parse("sin(2)+3", 'x').unwrap()), Expr::number(0.0));
        assert_eq!(derived("5"), "0");
    }

    #[test]
    fn simplified_forms() {
        assert_eq!(derived("x"), "1");
        assert_eq!(derived("-x"), "-1");
        assert_eq!(derived("x^2"), "2 * x");
        assert_eq!(derived("-(x^2)"), "-(2 * x)");
        assert_eq!(derived("sin(x)"), "cos(x)");
        assert_eq!(derived("cos(x)"), "-sin(x)");
        assert_eq!(derived("log(x;2.718281828459045)"), "1 / x");
    }

    #[test]
    fn result_is_not_simplified() {
        let expr = parse("x^2", 'x').unwrap();
        assert_eq!(derivative(&expr).display('x').to_string(), "2 * x^1 * 1");
    }
}
