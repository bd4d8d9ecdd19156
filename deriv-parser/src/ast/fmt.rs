use std::fmt::{Display, Formatter, Result};
use super::expr::{Binary, Expr, Primary};
use crate::op::{Form, Operation};

/// A wrapper type that renders an [`Expr`] with a given variable letter. Created with
/// [`Expr::display`].
///
/// The output uses as few parentheses as possible while still parsing back to a tree that
/// evaluates identically.
#[derive(Debug, Clone, Copy)]
pub struct ExprDisplay<'a> {
    expr: &'a Expr,
    variable: char,
}

impl Expr {
    /// Returns a value that renders this tree as text, writing `variable` for the free variable.
    pub fn display(&self, variable: char) -> ExprDisplay<'_> {
        ExprDisplay { expr: self, variable }
    }
}

impl Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        fmt_expr(self.expr, self.variable, f)
    }
}

/// Returns true if the node is a non-keyword operation with two operands.
fn is_infix(expr: &Expr) -> bool {
    expr.as_binary().is_some_and(|binary| binary.op().form() == Form::Infix)
}

/// Returns true if `child` must be parenthesized to keep its grouping as an operand of `parent`.
///
/// Negative infix nodes are always wrapped by their own sign prefix, so they only need extra
/// parentheses as the base of a power, where `-a^b` would read as `-(a^b)`.
fn needs_parens(parent: &Binary, child: &Expr, is_rhs: bool) -> bool {
    let parent_op = parent.op();
    if !is_rhs && parent_op == Operation::Exponentiation && child.is_negative() {
        return true;
    }

    let Some(child) = child.as_binary() else {
        return false;
    };
    if child.is_negative() || child.op().form() != Form::Infix {
        return false;
    }

    let (child_prec, parent_prec) = (child.op().precedence(), parent_op.precedence());
    child_prec > parent_prec
        || is_rhs && child_prec == parent_prec && !parent_op.regroups_right()
}

fn fmt_operand(parent: &Binary, child: &Expr, is_rhs: bool, variable: char, f: &mut Formatter) -> Result {
    if needs_parens(parent, child, is_rhs) {
        write!(f, "(")?;
        fmt_expr(child, variable, f)?;
        write!(f, ")")
    } else {
        fmt_expr(child, variable, f)
    }
}

fn fmt_expr(expr: &Expr, variable: char, f: &mut Formatter) -> Result {
    let wrap_sign = expr.is_negative() && is_infix(expr);
    if wrap_sign {
        write!(f, "-(")?;
    } else if expr.is_negative() {
        write!(f, "-")?;
    }

    match expr {
        Expr::Leaf(leaf) => match leaf.primary() {
            Primary::Variable => write!(f, "{}", variable)?,
            Primary::Number(n) => write!(f, "{}", n)?,
        },
        Expr::Unary(unary) => {
            write!(f, "{}(", unary.op().symbol())?;
            fmt_expr(unary.operand(), variable, f)?;
            write!(f, ")")?;
        },
        Expr::Binary(binary) => match binary.op().form() {
            Form::BinaryFunction => {
                write!(f, "{}(", binary.op().symbol())?;
                fmt_expr(binary.lhs(), variable, f)?;
                write!(f, "; ")?;
                fmt_expr(binary.rhs(), variable, f)?;
                write!(f, ")")?;
            },
            _ => {
                fmt_operand(binary, binary.lhs(), false, variable, f)?;
                match binary.op() {
                    Operation::Exponentiation => write!(f, "^")?,
                    op => write!(f, " {} ", op.symbol())?,
                }
                fmt_operand(binary, binary.rhs(), true, variable, f)?;
            },
        },
    }

    if wrap_sign {
        write!(f, ")")?;
    }
    Ok(())
}
