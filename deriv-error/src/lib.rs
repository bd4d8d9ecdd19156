//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs a kind with the regions of source it points at.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns `self` as [`Any`], so that callers can recover the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
///
/// Spans are measured in characters, not bytes.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// The character offset the error points at, which is the start of its first span.
    pub fn offset(&self) -> usize {
        self.spans.first().map_or(0, |span| span.start)
    }

    /// Moves every span of this error `by` characters to the right.
    ///
    /// An error produced while parsing a substring is relative to that substring; shifting it by
    /// the substring's start makes it relative to the enclosing string.
    pub fn offset_by(mut self, by: usize) -> Self {
        for span in &mut self.spans {
            *span = span.start + by..span.end + by;
        }
        self
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error to `out`, against the given source.
    pub fn write_report(&self, src_id: &str, input: &str, out: impl io::Write) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), out)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not implement `Display`, so this goes through
    /// its `eprint` method instead.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}
