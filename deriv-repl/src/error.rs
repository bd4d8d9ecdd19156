use ariadne::{Color, Label, Report, ReportKind, Source};
use deriv_parser::Error as ParseError;
use std::{io, num::ParseFloatError, ops::Range};

/// Utility enum to package errors that can occur while handling a line of input.
#[derive(Debug)]
pub enum Error {
    /// The line could not be parsed as a function.
    Parse(ParseError),

    /// The point after `=` is not a number.
    Point(ParseFloatError),

    /// A point was given before any function.
    NoFunction,
}

impl Error {
    /// Report this error to stderr.
    pub fn report_to_stderr(&self, input: &str) -> io::Result<()> {
        let report = match self {
            Self::Parse(err) => err.build_report("input"),
            Self::Point(err) => whole_line_report(input, &err.to_string(), "expected a number after `=`"),
            Self::NoFunction => whole_line_report(input, "no function to evaluate", "enter a function first"),
        };
        report.eprint(("input", Source::from(input)))
    }
}

/// Builds a report that points at the whole line.
fn whole_line_report(input: &str, message: &str, label: &str) -> Report<'static, (&'static str, Range<usize>)> {
    let span = 0..input.chars().count();
    Report::build(ReportKind::Error, "input", 0)
        .with_message(message)
        .with_label(Label::new(("input", span)).with_message(label).with_color(Color::Red))
        .finish()
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<ParseFloatError> for Error {
    fn from(err: ParseFloatError) -> Self {
        Self::Point(err)
    }
}
