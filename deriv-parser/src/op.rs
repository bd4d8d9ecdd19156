//! The closed set of operations an expression can contain, and their properties.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How tightly an operation binds its operands.
///
/// Variants are declared from tightest to loosest, so a **greater** precedence binds **looser**:
/// `Precedence::Term > Precedence::Factor`. The parser splits at the loosest operation first, and
/// the renderer parenthesizes an operand that binds looser than its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Precedence {
    /// Keyword functions, such as `sin(x)` or `log(x; 2)`.
    Function,

    /// `^`
    Exp,

    /// `*`, `/`
    Factor,

    /// `+`, `-`
    Term,
}

impl Precedence {
    /// The numeric level of this precedence, where `0` binds tightest.
    pub fn level(self) -> u8 {
        self as u8
    }
}

/// The syntactic shape of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Form {
    /// Written between its two operands: `a + b`.
    Infix,

    /// A keyword function of one argument: `sin(a)`.
    UnaryFunction,

    /// A keyword function of two arguments separated by `;`: `log(a; b)`.
    BinaryFunction,
}

/// An operation that can appear in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Exponentiation,

    /// `log(value; base)`
    Logarithm,

    /// `nrt(radicand; degree)`
    NRoot,

    Sine,
    Cosine,
    Tangent,
}

impl Operation {
    /// Every operation, in no particular order.
    pub const ALL: [Operation; 10] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
        Self::Exponentiation,
        Self::Logarithm,
        Self::NRoot,
        Self::Sine,
        Self::Cosine,
        Self::Tangent,
    ];

    /// The symbol used to write this operation.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Addition => "+",
            Self::Subtraction => "-",
            Self::Multiplication => "*",
            Self::Division => "/",
            Self::Exponentiation => "^",
            Self::Logarithm => "log",
            Self::NRoot => "nrt",
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::Tangent => "tg",
        }
    }

    /// Looks up the operation written with the given symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Returns the precedence of the operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Logarithm | Self::NRoot | Self::Sine | Self::Cosine | Self::Tangent => Precedence::Function,
            Self::Exponentiation => Precedence::Exp,
            Self::Multiplication | Self::Division => Precedence::Factor,
            Self::Addition | Self::Subtraction => Precedence::Term,
        }
    }

    /// Returns the syntactic form of the operation.
    pub fn form(&self) -> Form {
        match self {
            Self::Sine | Self::Cosine | Self::Tangent => Form::UnaryFunction,
            Self::Logarithm | Self::NRoot => Form::BinaryFunction,
            Self::Addition
                | Self::Subtraction
                | Self::Multiplication
                | Self::Division
                | Self::Exponentiation => Form::Infix,
        }
    }

    /// Returns true if the operation is written as a keyword followed by bracketed arguments.
    pub fn is_keyword(&self) -> bool {
        self.form() != Form::Infix
    }

    /// Returns true if the operation takes two operands.
    pub fn is_binary(&self) -> bool {
        self.form() != Form::UnaryFunction
    }

    /// Returns true if `a op (b op c)` and `(a op b) op c` always agree when mixed with other
    /// operations of the same precedence.
    ///
    /// `a - (b + c)`, `a / (b * c)` and `a^(b^c)` cannot drop their parentheses; `a + (b - c)` and
    /// `a * (b / c)` can.
    pub fn regroups_right(&self) -> bool {
        matches!(self, Self::Addition | Self::Multiplication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_lookup_is_inverse() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operation::from_symbol("tan"), None);
        assert_eq!(Operation::from_symbol(""), None);
    }

    #[test]
    fn precedence_levels() {
        assert_eq!(Operation::Sine.precedence().level(), 0);
        assert_eq!(Operation::NRoot.precedence().level(), 0);
        assert_eq!(Operation::Exponentiation.precedence().level(), 1);
        assert_eq!(Operation::Division.precedence().level(), 2);
        assert_eq!(Operation::Subtraction.precedence().level(), 3);
        assert!(Operation::Addition.precedence() > Operation::Multiplication.precedence());
    }

    #[test]
    fn forms() {
        assert_eq!(Operation::Tangent.form(), Form::UnaryFunction);
        assert_eq!(Operation::Logarithm.form(), Form::BinaryFunction);
        assert_eq!(Operation::Exponentiation.form(), Form::Infix);
        assert!(Operation::Logarithm.is_keyword() && Operation::Logarithm.is_binary());
        assert!(!Operation::Cosine.is_binary());
    }
}
