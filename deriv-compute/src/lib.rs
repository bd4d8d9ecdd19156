//! Evaluation, simplification and symbolic differentiation of functions of one variable.
//!
//! Expressions are parsed by [`deriv_parser`]. This crate works on the resulting trees:
//!
//! - [`numerical`] evaluates a tree at a point, rounding the result to a [`Decimals`] precision.
//! - [`symbolic`] simplifies trees and computes their derivatives.
//! - [`func`] ties a tree to its variable and precision in a [`Function`].
//!
//! [`Decimals`]: numerical::Decimals
//! [`Function`]: func::Function

pub mod func;
pub mod numerical;
pub mod symbolic;

pub use func::Function;
pub use numerical::{ConfigError, Decimals};
