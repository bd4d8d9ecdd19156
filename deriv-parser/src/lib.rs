//! Parser and expression tree for functions of a single variable.
//!
//! Source text is turned into an [`Expr`] by [`parse`], which works directly on the characters of
//! the text using bracket depths instead of a tokenizer. The resulting tree can be evaluated with
//! [`Expr::eval`], and rendered back to text with [`Expr::display`].
//!
//! ```
//! use deriv_parser::parse;
//!
//! let expr = parse("2 * sin(x) + 1", 'x').unwrap();
//! assert_eq!(expr.eval(0.0), 1.0);
//! assert_eq!(expr.display('x').to_string(), "2 * sin(x) + 1");
//! ```

pub mod ast;
pub mod op;
pub mod parser;

pub use ast::Expr;
pub use op::Operation;
pub use parser::{error::Error, parse, Parser};
