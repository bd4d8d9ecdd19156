//! Algebraic manipulation of expressions.
//!
//! This module works directly on the [`Expr`](deriv_parser::Expr) trees produced by
//! [`deriv_parser`]. Every operation here is a pure function from one tree to a new one; the input
//! is never modified.
//!
//! # Simplification
//!
//! [`simplify()`] rewrites a tree bottom-up, folding constant subtrees into rounded numbers and
//! applying a fixed set of identities such as `a * 1 = a` or `log(a; a) = 1`. The rules are
//! defined in [`simplify::rules`].
//!
//! ```
//! use deriv_compute::{numerical::Decimals, symbolic::simplify};
//! use deriv_parser::parse;
//!
//! let expr = parse("2*x+0", 'x').unwrap();
//! let simplified = simplify(&expr, Decimals::Unrounded);
//! assert_eq!(simplified.display('x').to_string(), "2 * x");
//! ```
//!
//! Identities are matched with structural equality, so the simplifier cannot tell that `x + 1` and
//! `1 + x` are the same. It does not reorder terms, collect like terms, or expand products.
//!
//! # Differentiation
//!
//! [`derivative()`] returns the symbolic derivative of a tree. Its output is meant to be passed
//! through the simplifier before it is shown:
//!
//! ```
//! use deriv_compute::{numerical::Decimals, symbolic::{derivative, simplify}};
//! use deriv_parser::parse;
//!
//! let expr = parse("x^2", 'x').unwrap();
//! let derived = simplify(&derivative(&expr), Decimals::Unrounded);
//! assert_eq!(derived.display('x').to_string(), "2 * x");
//! ```

pub mod derivative;
pub mod simplify;
pub mod step_collector;

pub use derivative::derivative;
pub use simplify::{simplify, simplify_with_steps};
pub use step_collector::StepCollector;
