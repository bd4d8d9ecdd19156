pub mod kind;

pub use deriv_error::Error;
use kind::InvalidCharacter;

/// Returns the character the error points at, if the error is about a single character.
pub fn offending_char(error: &Error) -> Option<char> {
    error.downcast_ref::<InvalidCharacter>().map(|kind| kind.ch)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::parse;

    /// Renders the report for parsing `source` without colors.
    fn report(source: &str) -> String {
        let err = parse(source, 'x').unwrap_err();
        let mut out = Vec::new();
        err.write_report("input", source, &mut out).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
    }

    #[test]
    fn offending_char_of_invalid_character() {
        let err = parse("x + y", 'x').unwrap_err();
        assert_eq!(offending_char(&err), Some('y'));

        let err = parse("x +", 'x').unwrap_err();
        assert_eq!(offending_char(&err), None);
    }

    #[test]
    fn report_mentions_message_and_label() {
        let text = report("2 * $");
        assert!(text.contains("unexpected character `$`"), "{}", text);
        assert!(text.contains("I could not understand this character"), "{}", text);
    }

    #[test]
    fn report_for_missing_separator() {
        let text = report("log(x)");
        assert!(text.contains("`log` takes two arguments"), "{}", text);
        assert!(text.contains("log(x; 2)"), "{}", text);
    }

    #[test]
    fn report_for_unclosed_bracket() {
        let text = report("sin(x");
        assert!(text.contains("unbalanced brackets"), "{}", text);
        assert!(text.contains("this bracket is never closed"), "{}", text);
    }
}
