//! The expression tree produced by the parser and transformed by the rest of the engine.
//!
//! # Sign flag
//!
//! Every node carries a `negative` flag, meaning "this whole subtree is multiplied by `-1`". There
//! is no dedicated negation node: `-(x + 1)` is an [`Expr::Binary`] addition with its flag set.
//! Keeping the sign out of the structure lets `--a` cancel by flipping a flag instead of
//! rewriting the tree, and lets the simplifier see through signs when matching identities.
//!
//! Numeric leaves store the magnitude of their value; the sign always lives in the flag.
//!
//! # Eager constant folding
//!
//! [`Expr::binary`] collapses any operand whose value does not depend on the variable into a
//! single numeric leaf. `x * (2 + 3)` is stored as `x * 5`. The binary node itself is not folded,
//! so `2 + 3` on its own stays an addition until it is simplified.
//!
//! # Structural equality
//!
//! The [`PartialEq`] implementation compares trees **structurally**, with one exception: if
//! either side is constant, the two sides are equal exactly when both are constant and evaluate to
//! the same number, whatever their shape. `2 + 3` equals `5`, and `x + 1` equals `x + 1`, but
//! `x + 1` does **not** equal `1 + x`. Equality is not commutative-aware, and it is not transitive
//! across differently shaped trees that happen to describe the same function.

use crate::op::{Form, Operation};
use std::{
    f64::consts::E,
    ops::{Add, Div, Mul, Neg, Sub},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a leaf stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// The free variable of the function.
    Variable,

    /// A non-negative number.
    Number(f64),
}

/// A leaf of the tree: the variable or a number.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leaf {
    negative: bool,
    primary: Primary,
}

impl Leaf {
    /// What this leaf stands for. A [`Primary::Number`] is never negative.
    pub fn primary(&self) -> Primary {
        self.primary
    }

    /// Returns true if the leaf is negated.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true if the leaf is the variable.
    pub fn is_variable(&self) -> bool {
        self.primary == Primary::Variable
    }
}

/// A keyword function of one argument, such as `sin(x)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    negative: bool,
    op: Operation,
    operand: Box<Expr>,
}

impl Unary {
    /// The function applied to the operand. Always of [`Form::UnaryFunction`].
    pub fn op(&self) -> Operation {
        self.op
    }

    /// The argument of the function.
    pub fn operand(&self) -> &Expr {
        &self.operand
    }

    /// Returns true if the node is negated.
    pub fn is_negative(&self) -> bool {
        self.negative
    }
}

/// An operation with two operands, written either infix (`a + b`) or as a keyword function
/// (`log(a; b)`).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    negative: bool,
    op: Operation,
    lhs: Box<Expr>,
    rhs: Box<Expr>,
}

impl Binary {
    /// The operation. Never of [`Form::UnaryFunction`].
    pub fn op(&self) -> Operation {
        self.op
    }

    /// The left-hand operand; for keyword functions, the first argument.
    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    /// The right-hand operand; for keyword functions, the second argument.
    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    /// Returns true if the node is negated.
    pub fn is_negative(&self) -> bool {
        self.negative
    }
}

/// A node of the expression tree.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// The variable or a number.
    Leaf(Leaf),

    /// `sin`, `cos` or `tg` applied to an operand.
    Unary(Unary),

    /// Any other operation.
    Binary(Binary),
}

impl Expr {
    /// The free variable.
    pub fn variable() -> Self {
        Self::Leaf(Leaf { negative: false, primary: Primary::Variable })
    }

    /// A number. Its sign is stored in the flag and its magnitude in the leaf.
    pub fn number(value: f64) -> Self {
        Self::Leaf(Leaf {
            negative: value < 0.0,
            primary: Primary::Number(value.abs()),
        })
    }

    /// Applies a one-argument function to `operand`.
    ///
    /// # Panics
    ///
    /// Panics if `op` is not a one-argument function. This is a programming error, not an input
    /// error.
    pub fn unary(op: Operation, operand: Expr) -> Self {
        assert!(
            op.form() == Form::UnaryFunction,
            "`{:?}` does not take a single operand",
            op,
        );
        Self::Unary(Unary { negative: false, op, operand: Box::new(operand) })
    }

    /// Combines two operands with a two-operand operation. Constant operands are folded into
    /// numeric leaves.
    ///
    /// # Panics
    ///
    /// Panics if `op` is a one-argument function. This is a programming error, not an input error.
    pub fn binary(op: Operation, lhs: Expr, rhs: Expr) -> Self {
        assert!(op.is_binary(), "`{:?}` does not take two operands", op);
        Self::Binary(Binary {
            negative: false,
            op,
            lhs: Box::new(lhs.folded()),
            rhs: Box::new(rhs.folded()),
        })
    }

    /// Euler's number as a leaf.
    pub fn e() -> Self {
        Self::number(E)
    }

    /// `self ^ exponent`
    pub fn pow(self, exponent: Expr) -> Self {
        Self::binary(Operation::Exponentiation, self, exponent)
    }

    /// `log(self; base)`
    pub fn log(self, base: Expr) -> Self {
        Self::binary(Operation::Logarithm, self, base)
    }

    /// `log(self; e)`
    pub fn ln(self) -> Self {
        self.log(Self::e())
    }

    /// `nrt(self; degree)`
    pub fn nrt(self, degree: Expr) -> Self {
        Self::binary(Operation::NRoot, self, degree)
    }

    /// `sin(self)`
    pub fn sin(self) -> Self {
        Self::unary(Operation::Sine, self)
    }

    /// `cos(self)`
    pub fn cos(self) -> Self {
        Self::unary(Operation::Cosine, self)
    }

    /// `tg(self)`
    pub fn tg(self) -> Self {
        Self::unary(Operation::Tangent, self)
    }

    /// Replaces a constant non-leaf node with the numeric leaf it evaluates to.
    fn folded(self) -> Self {
        match self {
            Self::Leaf(_) => self,
            _ if self.is_constant() => Self::number(self.eval(f64::NAN)),
            _ => self,
        }
    }

    /// Returns true if the node is negated.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.negative,
            Self::Unary(unary) => unary.negative,
            Self::Binary(binary) => binary.negative,
        }
    }

    fn negative_mut(&mut self) -> &mut bool {
        match self {
            Self::Leaf(leaf) => &mut leaf.negative,
            Self::Unary(unary) => &mut unary.negative,
            Self::Binary(binary) => &mut binary.negative,
        }
    }

    /// Returns the same node with its sign flag set to `negative`.
    pub fn with_negative(mut self, negative: bool) -> Self {
        *self.negative_mut() = negative;
        self
    }

    /// Negates the node if `negate` is true.
    pub fn negate_if(self, negate: bool) -> Self {
        if negate {
            -self
        } else {
            self
        }
    }

    /// Returns the same node without its sign.
    pub fn unsigned(self) -> Self {
        self.with_negative(false)
    }

    /// If the node is a leaf, returns it.
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// If the node is a one-argument function, returns it.
    pub fn as_unary(&self) -> Option<&Unary> {
        match self {
            Self::Unary(unary) => Some(unary),
            _ => None,
        }
    }

    /// If the node is a two-operand operation, returns it.
    pub fn as_binary(&self) -> Option<&Binary> {
        match self {
            Self::Binary(binary) => Some(binary),
            _ => None,
        }
    }

    /// Returns the operation at the root of the tree, if it is not a leaf.
    pub fn op(&self) -> Option<Operation> {
        match self {
            Self::Leaf(_) => None,
            Self::Unary(unary) => Some(unary.op),
            Self::Binary(binary) => Some(binary.op),
        }
    }

    /// Returns true if the value of the tree does not depend on the variable.
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Leaf(leaf) => !leaf.is_variable(),
            Self::Unary(unary) => unary.operand.is_constant(),
            Self::Binary(binary) => binary.lhs.is_constant() && binary.rhs.is_constant(),
        }
    }

    /// Returns the value of the tree if it is constant.
    pub fn constant(&self) -> Option<f64> {
        self.is_constant().then(|| self.eval(f64::NAN))
    }

    /// Returns true if the tree is constant and its value is positive.
    pub fn is_positive_constant(&self) -> bool {
        self.constant().is_some_and(|value| value > 0.0)
    }

    /// Returns true if the tree is constant and its value is negative.
    pub fn is_negative_constant(&self) -> bool {
        self.constant().is_some_and(|value| value < 0.0)
    }

    /// Evaluates the tree with the variable set to `x`, without rounding.
    ///
    /// Domain errors are not reported; they produce `NaN` or an infinity, as `f64` arithmetic
    /// does.
    pub fn eval(&self, x: f64) -> f64 {
        let (negative, value) = match self {
            Self::Leaf(leaf) => (leaf.negative, match leaf.primary {
                Primary::Variable => x,
                Primary::Number(n) => n,
            }),
            Self::Unary(unary) => {
                let operand = unary.operand.eval(x);
                (unary.negative, match unary.op {
                    Operation::Sine => operand.sin(),
                    Operation::Cosine => operand.cos(),
                    Operation::Tangent => operand.tan(),
                    op => unreachable!("`{:?}` is never stored in a unary node", op),
                })
            },
            Self::Binary(binary) => {
                let (lhs, rhs) = (binary.lhs.eval(x), binary.rhs.eval(x));
                (binary.negative, match binary.op {
                    Operation::Addition => lhs + rhs,
                    Operation::Subtraction => lhs - rhs,
                    Operation::Multiplication => lhs * rhs,
                    Operation::Division => lhs / rhs,
                    Operation::Exponentiation => lhs.powf(rhs),
                    Operation::Logarithm => log(lhs, rhs),
                    Operation::NRoot => lhs.powf(1.0 / rhs),
                    op => unreachable!("`{:?}` is never stored in a binary node", op),
                })
            },
        };

        if negative {
            -value
        } else {
            value
        }
    }

    /// Replaces every occurrence of the variable with `inner`, producing the composition
    /// `self(inner(x))`.
    pub fn substitute(&self, inner: &Expr) -> Expr {
        match self {
            Self::Leaf(leaf) => match leaf.primary {
                Primary::Variable => inner.clone().negate_if(leaf.negative),
                Primary::Number(_) => self.clone(),
            },
            Self::Unary(unary) => Self::unary(unary.op, unary.operand.substitute(inner))
                .with_negative(unary.negative),
            Self::Binary(binary) => Self::binary(
                binary.op,
                binary.lhs.substitute(inner),
                binary.rhs.substitute(inner),
            ).with_negative(binary.negative),
        }
    }
}

/// `log(value; base)`: `NaN` for base `1`, and for base `0` or `+∞` unless `value` is `1`.
fn log(value: f64, base: f64) -> f64 {
    if value.is_nan() || base.is_nan() || base == 1.0 {
        f64::NAN
    } else if value != 1.0 && (base == 0.0 || base == f64::INFINITY) {
        f64::NAN
    } else {
        value.ln() / base.ln()
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

/// Flips the sign flag of the node.
impl Neg for Expr {
    type Output = Expr;

    fn neg(mut self) -> Self::Output {
        let negative = self.negative_mut();
        *negative = !*negative;
        self
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

/// `a + b`, written as `a - |b|` if `b` is negative.
impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        if rhs.is_negative() {
            Expr::binary(Operation::Subtraction, self, -rhs)
        } else {
            Expr::binary(Operation::Addition, self, rhs)
        }
    }
}

/// `a - b`, written as `a + |b|` if `b` is negative.
impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Self) -> Self::Output {
        if rhs.is_negative() {
            Expr::binary(Operation::Addition, self, -rhs)
        } else {
            Expr::binary(Operation::Subtraction, self, rhs)
        }
    }
}

/// Builds `op(|lhs|, |rhs|)` carrying the combined sign of both operands.
fn hoist_signs(op: Operation, lhs: Expr, rhs: Expr) -> Expr {
    let negative = lhs.is_negative() != rhs.is_negative();
    Expr::binary(op, lhs.unsigned(), rhs.unsigned()).with_negative(negative)
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        hoist_signs(Operation::Multiplication, self, rhs)
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Self) -> Self::Output {
        hoist_signs(Operation::Division, self, rhs)
    }
}

/// Checks if two trees are equal, folding constant trees to their values first.
///
/// For more information, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self.constant(), other.constant()) {
            (Some(lhs), Some(rhs)) => return lhs == rhs,
            (Some(_), None) | (None, Some(_)) => return false,
            (None, None) => (),
        }

        match (self, other) {
            (Self::Leaf(lhs), Self::Leaf(rhs)) => {
                lhs.negative == rhs.negative && lhs.primary == rhs.primary
            },
            (Self::Unary(lhs), Self::Unary(rhs)) => {
                lhs.negative == rhs.negative
                    && lhs.op == rhs.op
                    && lhs.operand == rhs.operand
            },
            (Self::Binary(lhs), Self::Binary(rhs)) => {
                lhs.negative == rhs.negative
                    && lhs.op == rhs.op
                    && lhs.lhs == rhs.lhs
                    && lhs.rhs == rhs.rhs
            },
            _ => false,
        }
    }
}

/// A tree equals a number if it is constant and evaluates to that number.
impl PartialEq<f64> for Expr {
    fn eq(&self, other: &f64) -> bool {
        self.constant() == Some(*other)
    }
}
