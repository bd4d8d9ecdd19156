//! Builds an [`Expr`] directly from the characters of the source text, without tokenizing.
//!
//! At every level of recursion, the builder:
//!
//! 1. cleans the text and strips brackets that enclose all of it (see [`scan`]),
//! 2. measures the bracket depth of every character,
//! 3. picks the operation that must be applied **last**: the loosest one among those at the
//!    shallowest depth, preferring the rightmost on ties so that `a - b - c` groups as
//!    `(a - b) - c`,
//! 4. splits the text around that operation and recurses into each side.
//!
//! Text without any operation at the shallowest depth must be the variable or a number.
//!
//! Errors found while building a side are relative to that side's text; the caller shifts them by
//! the side's offset before returning them, so that the error finally returned points into the
//! text given to the parser.

pub mod error;
mod scan;

use crate::{ast::expr::Expr, op::{Form, Operation}};
use error::{
    kind::{EmptyOperand, InvalidCharacter, MissingSeparator, UnbalancedBracket},
    Error,
};
use scan::{span_at, Cleaned};
use std::ops::Range;
use tracing::trace;

/// The operation chosen to split the text, and where it starts in the cleaned text.
#[derive(Debug, Clone, Copy)]
struct Split {
    op: Operation,
    at: usize,
    len: usize,
}

/// Returns true if `c` is the symbol of an infix operation.
fn is_infix_symbol(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^')
}

/// Returns the keyword function whose symbol ends at `end` in the cleaned text, and its length.
fn keyword_ending_at(cleaned: &[Cleaned], end: usize) -> Option<(Operation, usize)> {
    [3, 2].into_iter()
        .filter(|&len| end + 1 >= len)
        .find_map(|len| {
            let symbol = cleaned[end + 1 - len..=end].iter().map(|&(_, c)| c).collect::<String>();
            Operation::from_symbol(&symbol)
                .filter(Operation::is_keyword)
                .map(|op| (op, len))
        })
}

/// Finds the operation to split the cleaned text at, if there is one.
fn find_split(cleaned: &[Cleaned], depths: &[u32]) -> Option<Split> {
    let min = depths.iter().copied().min()?;
    if min > 0 {
        // only bracket groups, with nothing between them
        return None;
    }
    let last = depths.iter().rposition(|&depth| depth == min)?;

    let mut best: Option<Split> = None;
    for i in (0..=last).rev().filter(|&i| depths[i] == min) {
        let c = cleaned[i].1;
        let candidate = if is_infix_symbol(c) {
            // a minus right after another operator is the sign of the operand that follows
            let is_sign = c == '-' && i > 0 && is_infix_symbol(cleaned[i - 1].1);
            if is_sign {
                continue;
            }
            Operation::from_symbol(&c.to_string())
                .map(|op| Split { op, at: i, len: 1 })
        } else {
            keyword_ending_at(cleaned, i)
                .map(|(op, len)| Split { op, at: i + 1 - len, len })
        };

        if let Some(candidate) = candidate {
            if best.map_or(true, |best| candidate.op.precedence() > best.op.precedence()) {
                best = Some(candidate);
            }
        }
    }

    best
}

/// Builds expressions over a single variable.
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    variable: char,
}

impl Parser {
    /// Creates a parser reading `variable` as the free variable. Letters are matched without
    /// regard to case.
    pub fn new(variable: char) -> Self {
        Self { variable: variable.to_ascii_lowercase() }
    }

    /// Parses the whole source text.
    pub fn parse(&self, source: &str) -> Result<Expr, Error> {
        let chars = source.chars().collect::<Vec<_>>();
        self.build(&chars)
    }

    /// Builds the expression in `chars`. Errors are relative to the start of `chars`.
    fn build(&self, chars: &[char]) -> Result<Expr, Error> {
        let cleaned = scan::clean(chars);
        let (cleaned, content) = scan::strip_enclosing(&cleaned, 0..chars.len());
        if cleaned.is_empty() {
            return Err(Error::new(vec![span_at(chars.len(), content.start)], EmptyOperand));
        }

        let depths = scan::depths(cleaned, chars.len())?;
        match find_split(cleaned, &depths) {
            Some(split) => {
                trace!(op = ?split.op, at = cleaned[split.at].0, "split");
                match split.op.form() {
                    Form::Infix => self.build_infix(chars, cleaned, content, split),
                    _ => self.build_keyword(chars, cleaned, &depths, split),
                }
            },
            None => self.build_leaf(chars.len(), cleaned, &depths),
        }
    }

    /// Builds the expression in `chars[range]`, shifting errors back to the start of `chars`.
    fn build_part(&self, chars: &[char], range: Range<usize>) -> Result<Expr, Error> {
        let start = range.start;
        self.build(&chars[range]).map_err(|err| err.offset_by(start))
    }

    /// Builds `left op right`, or `-right` if the operation is a subtraction with nothing on its
    /// left.
    fn build_infix(
        &self,
        chars: &[char],
        cleaned: &[Cleaned],
        content: Range<usize>,
        split: Split,
    ) -> Result<Expr, Error> {
        let at = cleaned[split.at].0;
        let empty_operand = || Error::new(vec![span_at(chars.len(), at)], EmptyOperand);

        if split.at + 1 == cleaned.len() {
            return Err(empty_operand());
        }
        let rhs = self.build_part(chars, at + 1..content.end)?;

        if split.at == 0 {
            return match split.op {
                Operation::Subtraction => Ok(-rhs),
                _ => Err(empty_operand()),
            };
        }
        let lhs = self.build_part(chars, content.start..at)?;

        Ok(Expr::binary(split.op, lhs, rhs))
    }

    /// Builds a keyword function, which must span the whole cleaned text: the keyword, an opening
    /// bracket, the arguments, and the matching closing bracket.
    fn build_keyword(
        &self,
        chars: &[char],
        cleaned: &[Cleaned],
        depths: &[u32],
        split: Split,
    ) -> Result<Expr, Error> {
        let error_at = |i: usize, kind: InvalidCharacter| {
            Error::new(vec![span_at(chars.len(), cleaned[i].0)], kind)
        };
        let empty_at = |i: usize| Error::new(vec![span_at(chars.len(), cleaned[i].0)], EmptyOperand);

        if split.at > 0 {
            return Err(error_at(split.at, InvalidCharacter { ch: cleaned[split.at].1 }));
        }

        let open = split.at + split.len;
        match cleaned.get(open) {
            Some(&(_, '(')) => (),
            Some(&(_, ch)) => return Err(error_at(open, InvalidCharacter { ch })),
            None => return Err(empty_at(split.at)),
        }

        // the matching bracket is the first closing bracket back at the same depth
        let inner_depth = depths[open];
        let Some(close) = (open + 1..cleaned.len())
            .find(|&i| cleaned[i].1 == ')' && depths[i] == inner_depth)
        else {
            return Err(Error::new(
                vec![span_at(chars.len(), cleaned[open].0)],
                UnbalancedBracket { opening: true },
            ));
        };
        if close + 1 < cleaned.len() {
            return Err(error_at(close + 1, InvalidCharacter { ch: cleaned[close + 1].1 }));
        }
        if close == open + 1 {
            return Err(empty_at(open));
        }

        let (args_start, args_end) = (cleaned[open].0 + 1, cleaned[close].0);
        if split.op.form() == Form::UnaryFunction {
            let operand = self.build_part(chars, args_start..args_end)?;
            return Ok(Expr::unary(split.op, operand));
        }

        let Some(separator) = (open + 1..close)
            .find(|&i| cleaned[i].1 == ';' && depths[i] == inner_depth)
        else {
            return Err(Error::new(
                vec![span_at(chars.len(), cleaned[split.at].0)],
                MissingSeparator { function: split.op.symbol() },
            ));
        };
        if separator == open + 1 || separator + 1 == close {
            return Err(empty_at(separator));
        }

        let at = cleaned[separator].0;
        let lhs = self.build_part(chars, args_start..at)?;
        let rhs = self.build_part(chars, at + 1..args_end)?;
        Ok(Expr::binary(split.op, lhs, rhs))
    }

    /// Builds the variable or a number from text that contains no operation.
    fn build_leaf(&self, chars_len: usize, cleaned: &[Cleaned], depths: &[u32]) -> Result<Expr, Error> {
        let text = cleaned.iter().map(|&(_, c)| c).collect::<String>();
        let is_numeric = |c: char| c.is_ascii_digit() || c == '.';

        if cleaned.len() == 1 && cleaned[0].1 == self.variable {
            return Ok(Expr::variable());
        }
        if text.chars().all(is_numeric) {
            if let Ok(value) = text.parse::<f64>() {
                return Ok(Expr::number(value));
            }
        }
        // non-finite constants, as they are rendered
        match text.as_str() {
            "inf" => return Ok(Expr::number(f64::INFINITY)),
            "nan" => return Ok(Expr::number(f64::NAN)),
            _ => (),
        }

        let offending = if text.contains(|c: char| c == '(' || c == ')') {
            self.find_juxtaposed(cleaned, depths)
        } else if cleaned[0].1 == self.variable {
            Some(1)
        } else if let Some(i) = cleaned.iter().position(|&(_, c)| !is_numeric(c)) {
            Some(i)
        } else {
            // only digits and points, so the number has too many points
            let mut points = (0..cleaned.len()).filter(|&i| cleaned[i].1 == '.');
            let first = points.next();
            points.next().or(first)
        };

        let i = offending.unwrap_or(0);
        Err(Error::new(
            vec![span_at(chars_len, cleaned[i].0)],
            InvalidCharacter { ch: cleaned[i].1 },
        ))
    }

    /// Finds the first character that joins two operands without an operation between them, or
    /// that cannot be an operand at all.
    fn find_juxtaposed(&self, cleaned: &[Cleaned], depths: &[u32]) -> Option<usize> {
        let stray_letter = cleaned.iter()
            .zip(depths)
            .position(|(&(_, c), &depth)| depth == 0 && c.is_alphabetic() && c != self.variable);
        let boundary = (1..cleaned.len())
            .find(|&i| cleaned[i].1 == '(' || cleaned[i - 1].1 == ')');

        match (stray_letter, boundary) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Parses `source` as an expression over `variable`.
pub fn parse(source: &str, variable: char) -> Result<Expr, Error> {
    Parser::new(variable).parse(source)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::variable()
    }

    fn n(value: f64) -> Expr {
        Expr::number(value)
    }

    fn parse_x(source: &str) -> Expr {
        parse(source, 'x').unwrap()
    }

    /// Parses `source` over `x`, expecting an error of kind `K` at `offset`.
    fn assert_error<K>(source: &str, offset: usize)
    where
        K: deriv_error::ErrorKind + 'static,
    {
        let err = parse(source, 'x').unwrap_err();
        assert!(err.is::<K>(), "unexpected error kind for {:?}: {:?}", source, err.kind);
        assert_eq!(err.offset(), offset, "wrong offset for {:?}", source);
    }

    #[test]
    fn leaves() {
        assert_eq!(parse_x("x"), x());
        assert_eq!(parse_x("  X "), x());
        assert_eq!(parse_x("3.25"), n(3.25));
        assert_eq!(parse_x("3,25"), n(3.25));
        assert_eq!(parse_x(".5"), n(0.5));
        assert_eq!(parse("t", 't').unwrap(), x());
    }

    #[test]
    fn non_finite_leaves() {
        assert_eq!(parse_x("inf").eval(0.0), f64::INFINITY);
        assert_eq!(parse_x("-inf").eval(0.0), f64::NEG_INFINITY);
        assert!(parse_x("NaN").eval(0.0).is_nan());
        assert!(parse_x("x * nan").eval(1.0).is_nan());

        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(parse_x(&huge).eval(0.0), f64::INFINITY);
        assert_error::<InvalidCharacter>("infinity", 0);
    }

    #[test]
    fn negation() {
        let expr = parse_x("-x");
        assert!(expr.is_negative());
        assert_eq!(expr, -x());
        assert_eq!(parse_x("--x"), x());
        assert_eq!(parse_x("-(-2)"), n(2.0));
    }

    #[test]
    fn precedence() {
        assert_eq!(parse_x("x+2*x"), Expr::binary(
            Operation::Addition,
            x(),
            Expr::binary(Operation::Multiplication, n(2.0), x()),
        ));
        assert_eq!(parse_x("2*x^3"), Expr::binary(
            Operation::Multiplication,
            n(2.0),
            Expr::binary(Operation::Exponentiation, x(), n(3.0)),
        ));
    }

    #[test]
    fn left_associativity() {
        assert_eq!(parse_x("x-1-x"), Expr::binary(
            Operation::Subtraction,
            Expr::binary(Operation::Subtraction, x(), n(1.0)),
            x(),
        ));
        assert_eq!(parse_x("x/2*x"), Expr::binary(
            Operation::Multiplication,
            Expr::binary(Operation::Division, x(), n(2.0)),
            x(),
        ));
        assert_eq!(parse_x("x^2^x"), Expr::binary(
            Operation::Exponentiation,
            Expr::binary(Operation::Exponentiation, x(), n(2.0)),
            x(),
        ));
    }

    #[test]
    fn brackets_group() {
        assert_eq!(parse_x("x-(1-x)"), Expr::binary(
            Operation::Subtraction,
            x(),
            Expr::binary(Operation::Subtraction, n(1.0), x()),
        ));
        assert_eq!(parse_x("((x+1))*x"), Expr::binary(
            Operation::Multiplication,
            Expr::binary(Operation::Addition, x(), n(1.0)),
            x(),
        ));
    }

    #[test]
    fn sign_after_operator() {
        assert_eq!(parse_x("x*-x"), Expr::binary(Operation::Multiplication, x(), -x()));
        assert_eq!(parse_x("x^-2"), Expr::binary(Operation::Exponentiation, x(), n(-2.0)));
        assert_eq!(parse_x("x--x"), Expr::binary(Operation::Subtraction, x(), -x()));
    }

    #[test]
    fn keyword_functions() {
        assert_eq!(parse_x("sin(x)"), x().sin());
        assert_eq!(parse_x("COS( x )"), x().cos());
        assert_eq!(parse_x("tg(x)"), x().tg());
        assert_eq!(parse_x("log(x;2)"), x().log(n(2.0)));
        assert_eq!(parse_x("nrt(x+1;3)"), (x() + n(1.0)).nrt(n(3.0)));
        assert_eq!(parse_x("-sin(x)"), -x().sin());
        assert_eq!(parse_x("2*sin(x)^2"), Expr::binary(
            Operation::Multiplication,
            n(2.0),
            Expr::binary(Operation::Exponentiation, x().sin(), n(2.0)),
        ));
    }

    #[test]
    fn nested_keyword_functions() {
        assert_eq!(parse_x("log(sin(x);nrt(x;2))"), x().sin().log(x().nrt(n(2.0))));
        assert_eq!(parse_x("sin(log(x;2)*x)"), (x().log(n(2.0)) * x()).sin());
    }

    #[test]
    fn constant_operands_are_folded() {
        let expr = parse_x("x*(2+3)");
        let binary = expr.as_binary().unwrap();
        assert!(binary.rhs().as_leaf().is_some());
        assert_eq!(*binary.rhs(), 5.0);
    }

    #[test]
    fn empty_operand() {
        assert_error::<EmptyOperand>("1+*2", 2);
        assert_error::<EmptyOperand>("x+", 1);
        assert_error::<EmptyOperand>("*x", 0);
        assert_error::<EmptyOperand>("", 0);
        assert_error::<EmptyOperand>("x*()", 3);
        assert_error::<EmptyOperand>("sin()", 3);
        assert_error::<EmptyOperand>("sin", 0);
        assert_error::<EmptyOperand>("log(;2)", 4);
        assert_error::<EmptyOperand>("nrt(x; )", 5);
    }

    #[test]
    fn unbalanced_brackets() {
        assert_error::<UnbalancedBracket>("sin(x", 3);
        assert_error::<UnbalancedBracket>("(x+1", 0);
        assert_error::<UnbalancedBracket>("x+1)", 3);
        assert_error::<UnbalancedBracket>("2*(x+(1)", 2);

        let err = parse("x)", 'x').unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&UnbalancedBracket { opening: false }));
    }

    #[test]
    fn missing_separator() {
        assert_error::<MissingSeparator>("log(1)", 0);
        assert_error::<MissingSeparator>("x + nrt(x)", 4);

        let err = parse("nrt(x*(x;2))", 'x').unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&MissingSeparator { function: "nrt" }));
    }

    #[test]
    fn invalid_characters() {
        assert_error::<InvalidCharacter>("sin(x + y)", 8);
        assert_error::<InvalidCharacter>("2x", 1);
        assert_error::<InvalidCharacter>("x2", 1);
        assert_error::<InvalidCharacter>("1.2.3", 3);
        assert_error::<InvalidCharacter>(".", 0);
        assert_error::<InvalidCharacter>("x;2", 1);
        assert_error::<InvalidCharacter>("2 * $", 4);
        assert_error::<InvalidCharacter>("tan(x)", 0);
    }

    #[test]
    fn implicit_multiplication_is_rejected() {
        assert_error::<InvalidCharacter>("2(x+1)", 1);
        assert_error::<InvalidCharacter>("(x+1)x", 5);
        assert_error::<InvalidCharacter>("(x)(x)", 3);
        assert_error::<InvalidCharacter>("2sin(x)", 1);
    }

    #[test]
    fn keyword_must_span_the_operand() {
        assert_error::<InvalidCharacter>("sinx", 3);
        assert_error::<InvalidCharacter>("sin(x)2", 6);
    }

    #[test]
    fn error_offsets_through_nesting() {
        let source = "log(x; 2 * (x + z))";
        let err = parse(source, 'x').unwrap_err();
        assert_eq!(err.spans, vec![16..17]);
        assert_eq!(source.chars().nth(16), Some('z'));
    }
}
