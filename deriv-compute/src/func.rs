//! A parsed function of one variable, ready to be evaluated, shown, and differentiated.

use crate::{
    numerical::{self, ConfigError, Decimals},
    symbolic::{derivative, simplify},
};
use deriv_parser::{Error, Expr, Parser};
use std::{fmt, ops::{Add, Div, Mul, Neg, Sub}};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function of one variable.
///
/// A [`Function`] pairs an expression tree with the letter used for its variable and the precision
/// its results are rounded to. Two functions can be combined with the arithmetic operators; the
/// result uses the variable of the left-hand function and the smaller of both precisions, where
/// an unrounded precision takes priority over any digit count.
///
/// ```
/// use deriv_compute::{func::Function, numerical::Decimals};
///
/// let f = Function::new("x^3 + 2*x", 'x', Decimals::Digits(3)).unwrap();
/// assert_eq!(f.evaluate(2.0), 12.0);
///
/// let df = f.derivative();
/// assert_eq!(df.evaluate(2.0), 14.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    expr: Expr,
    variable: char,
    decimals: Decimals,
}

impl Function {
    /// Parses `text` as a function of `variable`.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is not a letter.
    pub fn new(text: &str, variable: char, decimals: Decimals) -> Result<Self, Error> {
        assert!(variable.is_alphabetic(), "the variable must be a letter, found `{}`", variable);
        let variable = variable.to_ascii_lowercase();
        let expr = Parser::new(variable).parse(text)?;
        Ok(Self { expr, variable, decimals })
    }

    /// Wraps an already built tree.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is not a letter.
    pub fn from_expr(expr: Expr, variable: char, decimals: Decimals) -> Self {
        assert!(variable.is_alphabetic(), "the variable must be a letter, found `{}`", variable);
        Self { expr, variable: variable.to_ascii_lowercase(), decimals }
    }

    /// The expression tree of the function.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The letter the variable is written with.
    pub fn variable(&self) -> char {
        self.variable
    }

    /// The precision results are rounded to.
    pub fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Changes the letter used to show the variable. The tree is unaffected.
    pub fn set_variable(&mut self, variable: char) -> Result<(), ConfigError> {
        if !variable.is_alphabetic() {
            return Err(ConfigError::InvalidVariable(variable));
        }
        self.variable = variable.to_ascii_lowercase();
        Ok(())
    }

    /// Changes the precision, given as a digit count or `-1` for unrounded results.
    pub fn set_decimals(&mut self, decimals: i32) -> Result<(), ConfigError> {
        self.decimals = Decimals::try_from(decimals)?;
        Ok(())
    }

    /// Evaluates the function at `x`, rounded to its precision.
    pub fn evaluate(&self, x: f64) -> f64 {
        numerical::evaluate(&self.expr, x, self.decimals)
    }

    /// Returns a closure that evaluates the function.
    pub fn evaluator(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| self.evaluate(x)
    }

    /// Returns the derivative of the function, with the same variable and precision.
    ///
    /// The derivative is simplified without rounding, so that its constants stay exact; only its
    /// results are rounded.
    pub fn derivative(&self) -> Function {
        debug!(function = %self, "computing derivative");
        let derived = simplify(&derivative(&self.expr), Decimals::Unrounded);
        Self { expr: derived, variable: self.variable, decimals: self.decimals }
    }

    /// Returns a closure that evaluates the derivative. The derivative is computed once, when the
    /// closure is created.
    pub fn derivative_evaluator(&self) -> impl Fn(f64) -> f64 {
        let derived = self.derivative();
        move |x| derived.evaluate(x)
    }

    /// Returns the composition `other(self(x))`, using the variable of `other`.
    pub fn substitute_into(&self, other: &Function) -> Function {
        Self {
            expr: other.expr.substitute(&self.expr),
            variable: other.variable,
            decimals: self.decimals.min(other.decimals),
        }
    }

    /// Combines two functions into one, keeping the variable of `self`.
    fn combine(self, rhs: Function, op: impl FnOnce(Expr, Expr) -> Expr) -> Function {
        Self {
            expr: op(self.expr, rhs.expr),
            variable: self.variable,
            decimals: self.decimals.min(rhs.decimals),
        }
    }
}

/// Shows the function simplified to its precision.
impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simplified = simplify(&self.expr, self.decimals);
        write!(f, "{}", simplified.display(self.variable))
    }
}

impl Neg for Function {
    type Output = Function;

    fn neg(self) -> Self::Output {
        Self { expr: -self.expr, ..self }
    }
}

impl Add for Function {
    type Output = Function;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs, Add::add)
    }
}

impl Sub for Function {
    type Output = Function;

    fn sub(self, rhs: Self) -> Self::Output {
        self.combine(rhs, Sub::sub)
    }
}

impl Mul for Function {
    type Output = Function;

    fn mul(self, rhs: Self) -> Self::Output {
        self.combine(rhs, Mul::mul)
    }
}

impl Div for Function {
    type Output = Function;

    fn div(self, rhs: Self) -> Self::Output {
        self.combine(rhs, Div::div)
    }
}
