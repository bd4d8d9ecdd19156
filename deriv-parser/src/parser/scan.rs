//! Character-level passes run before every split: cleaning the text, and measuring bracket depth.

use super::error::{kind::UnbalancedBracket, Error};
use std::ops::Range;

/// A character of the cleaned text, paired with its offset in the text it was cleaned from.
pub type Cleaned = (usize, char);

/// Returns the span covering the character at `at`, or an empty span if there is no character
/// there.
pub fn span_at(len: usize, at: usize) -> Range<usize> {
    if at < len {
        at..at + 1
    } else {
        at..at
    }
}

/// Removes whitespace from `chars`, reads the decimal comma as a decimal point, and lower-cases
/// letters.
pub fn clean(chars: &[char]) -> Vec<Cleaned> {
    chars.iter()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(i, &c)| match c {
            ',' => (i, '.'),
            c => (i, c.to_ascii_lowercase()),
        })
        .collect()
}

/// Returns true if the first and last characters are a bracket pair that encloses everything in
/// between.
fn is_enclosed(cleaned: &[Cleaned]) -> bool {
    let [(_, '('), inner @ .., (_, ')')] = cleaned else {
        return false;
    };

    let mut depth = 0i32;
    for &(_, c) in inner {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => (),
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

/// Strips every bracket pair that encloses the whole cleaned text.
///
/// Returns the remaining cleaned text, and the range of `chars` offsets it was taken from.
pub fn strip_enclosing(mut cleaned: &[Cleaned], mut content: Range<usize>) -> (&[Cleaned], Range<usize>) {
    while is_enclosed(cleaned) {
        let (open, close) = (cleaned[0].0, cleaned[cleaned.len() - 1].0);
        content = open + 1..close;
        cleaned = &cleaned[1..cleaned.len() - 1];
    }
    (cleaned, content)
}

/// Computes the bracket depth of every cleaned character.
///
/// An opening bracket has the depth of the characters it encloses, and so does its closing
/// bracket. Every character of a bracketed group therefore sits deeper than its surroundings:
///
/// ```text
/// 2 * ( x + 1 ) ^ 2
/// 0 0 1 1 1 1 1 0 0
/// ```
///
/// `chars_len` is the length of the text the cleaned characters point into, used to build error
/// spans.
pub fn depths(cleaned: &[Cleaned], chars_len: usize) -> Result<Vec<u32>, Error> {
    let mut depths = Vec::with_capacity(cleaned.len());
    let mut open = Vec::new();

    for &(at, c) in cleaned {
        match c {
            '(' => {
                open.push(at);
                depths.push(open.len() as u32);
            },
            ')' => {
                depths.push(open.len() as u32);
                if open.pop().is_none() {
                    return Err(Error::new(
                        vec![span_at(chars_len, at)],
                        UnbalancedBracket { opening: false },
                    ));
                }
            },
            _ => depths.push(open.len() as u32),
        }
    }

    match open.last() {
        Some(&at) => Err(Error::new(
            vec![span_at(chars_len, at)],
            UnbalancedBracket { opening: true },
        )),
        None => Ok(depths),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn text(cleaned: &[Cleaned]) -> String {
        cleaned.iter().map(|&(_, c)| c).collect()
    }

    #[test]
    fn clean_normalizes() {
        let cleaned = clean(&chars(" 2,5 * X "));
        assert_eq!(text(&cleaned), "2.5*x");
        assert_eq!(cleaned.iter().map(|&(at, _)| at).collect::<Vec<_>>(), vec![1, 2, 3, 5, 7]);
    }

    #[test]
    fn strip_outer_pairs() {
        let source = chars("(( x+1 ))");
        let cleaned = clean(&source);
        let (inner, content) = strip_enclosing(&cleaned, 0..source.len());
        assert_eq!(text(inner), "x+1");
        assert_eq!(content, 2..7);
    }

    #[test]
    fn keep_pairs_that_do_not_enclose() {
        let source = chars("(x+1)*(x-1)");
        let cleaned = clean(&source);
        let (inner, content) = strip_enclosing(&cleaned, 0..source.len());
        assert_eq!(text(inner), "(x+1)*(x-1)");
        assert_eq!(content, 0..11);
    }

    #[test]
    fn depth_of_groups() {
        let cleaned = clean(&chars("2*(x+1)^2"));
        assert_eq!(depths(&cleaned, 9).unwrap(), vec![0, 0, 1, 1, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn depth_of_consecutive_closes() {
        let cleaned = clean(&chars("((x))+1"));
        assert_eq!(depths(&cleaned, 7).unwrap(), vec![1, 2, 2, 2, 1, 0, 0]);
    }

    #[test]
    fn unclosed_bracket() {
        let err = depths(&clean(&chars("(x*(x+1)")), 8).unwrap_err();
        assert!(err.is::<UnbalancedBracket>());
        assert_eq!(err.downcast_ref(), Some(&UnbalancedBracket { opening: true }));
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn stray_closing_bracket() {
        let err = depths(&clean(&chars("x)+(1")), 5).unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&UnbalancedBracket { opening: false }));
        assert_eq!(err.spans, vec![1..2]);
    }
}
