use ariadne::Fmt;
use deriv_attrs::ErrorKind;
use deriv_error::{ErrorKind, EXPR};

/// A bracket was opened but never closed, or closed without being opened.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced brackets",
    label = if *opening {
        "this bracket is never closed"
    } else {
        "this bracket does not close anything"
    },
    help = if *opening {
        format!("add a closing {} after the bracketed expression", "`)`".fg(EXPR))
    } else {
        format!("remove it, or add an opening {} before it", "`(`".fg(EXPR))
    },
)]
pub struct UnbalancedBracket {
    /// True if the offending bracket is an opening bracket.
    pub opening: bool,
}

/// A character that cannot appear at this position.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", ch),
    label = "I could not understand this character",
    help = format!(
        "expressions may only contain numbers, the variable, {} and the functions {}",
        "+ - * / ^ ( ) ;".fg(EXPR),
        "sin cos tg log nrt".fg(EXPR),
    ),
)]
pub struct InvalidCharacter {
    /// The offending character.
    pub ch: char,
}

/// An operator or a function argument has nothing on one of its sides.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operand",
    label = format!("I expected to see an {} here", "expression".fg(EXPR)),
)]
pub struct EmptyOperand;

/// A two-argument function was given a single argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes two arguments", function),
    label = "this function needs a second argument",
    help = format!("separate the arguments with a {}, as in {}", "`;`".fg(EXPR), format!("{}(x; 2)", function).fg(EXPR)),
)]
pub struct MissingSeparator {
    /// The symbol of the function.
    pub function: &'static str,
}
