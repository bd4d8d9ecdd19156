pub mod expr;
pub mod fmt;

pub use expr::{Binary, Expr, Leaf, Primary, Unary};
pub use fmt::ExprDisplay;
